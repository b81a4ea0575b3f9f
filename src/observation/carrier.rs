//! Frequency bands and carrier wavelengths
use gnss::prelude::{Constellation, SV};

use crate::constants::Constants;

/// Frequency band an observation code belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Carrier {
    /// L1 (GPS, QZSS, SBAS), E1 (Galileo), G1 (Glonass), B1C (BeiDou)
    L1,
    /// L2 (GPS, QZSS), G2 (Glonass), B1I (BeiDou)
    L2,
    /// L5 (GPS, QZSS, SBAS, IRNSS), E5a (Galileo), G3 (Glonass), B2a (BeiDou)
    L5,
    /// L6 (QZSS LEX), E6 (Galileo), B3 (BeiDou)
    L6,
    /// E5b (Galileo), B2I (BeiDou)
    L7,
    /// E5a+b (Galileo)
    L8,
    /// S band (IRNSS)
    S,
}

impl Carrier {
    /// All bands, in frequency index order
    pub const ALL: [Self; 7] = [
        Self::L1,
        Self::L2,
        Self::L5,
        Self::L6,
        Self::L7,
        Self::L8,
        Self::S,
    ];
    /// Frequency index (0: L1, 1: L2, 2: L5 ...)
    pub fn index(&self) -> usize {
        match self {
            Self::L1 => 0,
            Self::L2 => 1,
            Self::L5 => 2,
            Self::L6 => 3,
            Self::L7 => 4,
            Self::L8 => 5,
            Self::S => 6,
        }
    }
    /// Band identified by its frequency index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L5 => write!(f, "L5"),
            Self::L6 => write!(f, "L6"),
            Self::L7 => write!(f, "L7"),
            Self::L8 => write!(f, "L8"),
            Self::S => write!(f, "S"),
        }
    }
}

/// Carrier wavelength (m) of `sv` at `frequency` index
/// (0: L1, 1: L2, 2: L5/G3/B3, 3: L6, 4: E5b, 5: E5a+b).
/// Glonass G1 and G2 depend on the FDMA frequency `channel` of the vehicle:
/// None is returned when it is not known. BeiDou indexes are B1I, B2I and B3I.
/// None for any other combination.
/// ```
/// use rtkcore::{observation::wavelength, prelude::*};
/// let g01 = SV::new(Constellation::GPS, 1);
/// let lambda = wavelength(g01, 0, None).unwrap();
/// assert!((lambda - 0.190293672798).abs() < 1.0E-9);
/// ```
pub fn wavelength(sv: SV, frequency: usize, channel: Option<i8>) -> Option<f64> {
    let freq = match sv.constellation {
        Constellation::Glonass => match (frequency, channel) {
            (0, Some(k)) => Constants::FREQ_G1 + Constants::DFREQ_G1 * k as f64,
            (1, Some(k)) => Constants::FREQ_G2 + Constants::DFREQ_G2 * k as f64,
            (2, _) => Constants::FREQ_G3,
            _ => return None,
        },
        Constellation::BeiDou => match frequency {
            0 => Constants::FREQ_B1,
            1 => Constants::FREQ_B2,
            2 => Constants::FREQ_B3,
            _ => return None,
        },
        _ => match frequency {
            0 => Constants::FREQ_L1,
            1 => Constants::FREQ_L2,
            2 => Constants::FREQ_L5,
            3 => Constants::FREQ_L6,
            4 => Constants::FREQ_E5B,
            5 => Constants::FREQ_E5AB,
            _ => return None,
        },
    };
    Some(Constants::SPEED_OF_LIGHT / freq)
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn frequency_indexes() {
        for (i, carrier) in Carrier::ALL.iter().enumerate() {
            assert_eq!(carrier.index(), i);
            assert_eq!(Carrier::from_index(i), Some(*carrier));
        }
        assert_eq!(Carrier::from_index(7), None);
        assert_eq!(Carrier::L7.to_string(), "L7");
    }
    #[test]
    fn gps_galileo_wavelengths() {
        let g01 = SV::new(Constellation::GPS, 1);
        let e11 = SV::new(Constellation::Galileo, 11);
        let l1 = wavelength(g01, 0, None).unwrap();
        let l2 = wavelength(g01, 1, None).unwrap();
        assert!((l1 - 0.190293672798).abs() < 1.0E-9);
        assert!((l2 - 0.244210213425).abs() < 1.0E-9);
        // same plan for every CDMA constellation but BeiDou
        assert_eq!(wavelength(e11, 0, None), Some(l1));
        assert_eq!(
            wavelength(e11, 4, None),
            Some(Constants::SPEED_OF_LIGHT / 1.20714E9)
        );
        assert!(wavelength(g01, 6, None).is_none());
    }
    #[test]
    fn glonass_channels() {
        let r01 = SV::new(Constellation::Glonass, 1);
        assert!(wavelength(r01, 0, None).is_none());
        assert!(wavelength(r01, 1, None).is_none());
        let g1 = wavelength(r01, 0, Some(-7)).unwrap();
        assert!((g1 - Constants::SPEED_OF_LIGHT / 1598.0625E6).abs() < 1.0E-12);
        let g2 = wavelength(r01, 1, Some(6)).unwrap();
        assert!((g2 - Constants::SPEED_OF_LIGHT / 1248.625E6).abs() < 1.0E-12);
        // CDMA G3 does not depend on the channel
        assert_eq!(wavelength(r01, 2, None), wavelength(r01, 2, Some(3)));
        assert!(wavelength(r01, 3, Some(0)).is_none());
    }
    #[test]
    fn beidou_wavelengths() {
        let c06 = SV::new(Constellation::BeiDou, 6);
        let b1 = wavelength(c06, 0, None).unwrap();
        assert!((b1 - Constants::SPEED_OF_LIGHT / 1561.098E6).abs() < 1.0E-12);
        assert!(wavelength(c06, 2, None).unwrap() < wavelength(c06, 1, None).unwrap());
        assert!(wavelength(c06, 3, None).is_none());
    }
}
