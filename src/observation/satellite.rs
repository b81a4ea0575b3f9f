//! Satellite numbering, identifiers and selection
use gnss::prelude::{Constellation, SV};
use log::trace;

/// Continuous satellite numbering: constellation, lowest and highest
/// system PRN, and offset between system PRN and [SV] PRN
/// (J01 is QZSS PRN 193, S20 is SBAS PRN 120)
const BLOCKS: [(Constellation, u16, u16, u16); 7] = [
    (Constellation::GPS, 1, 32, 0),
    (Constellation::Glonass, 1, 27, 0),
    (Constellation::Galileo, 1, 36, 0),
    (Constellation::QZSS, 193, 202, 192),
    (Constellation::BeiDou, 1, 63, 0),
    (Constellation::IRNSS, 1, 14, 0),
    (Constellation::SBAS, 120, 158, 100),
];

/// Number of satellites covered by the continuous numbering
pub const MAX_SATELLITES: usize = 32 + 27 + 36 + 10 + 63 + 14 + 39;

fn block(constellation: Constellation) -> Option<usize> {
    if constellation.is_sbas() {
        return Some(BLOCKS.len() - 1);
    }
    BLOCKS.iter().position(|(c, _, _, _)| *c == constellation)
}

/// Continuous satellite number, from 1 to [MAX_SATELLITES],
/// of this vehicle. None when its PRN is out of range.
/// SBAS vehicles of every augmentation system share one block.
pub fn satellite_number(sv: SV) -> Option<usize> {
    let index = block(sv.constellation)?;
    let (_, min, max, offset) = BLOCKS[index];
    let prn = sv.prn as u16 + offset;
    if prn < min || prn > max {
        return None;
    }
    let base = BLOCKS[..index]
        .iter()
        .map(|(_, min, max, _)| (max - min + 1) as usize)
        .sum::<usize>();
    Some(base + (prn - min) as usize + 1)
}

/// Vehicle designated by its continuous satellite number.
/// SBAS vehicles are returned as [Constellation::SBAS].
pub fn satellite_from_number(sat: usize) -> Option<SV> {
    if sat == 0 {
        return None;
    }
    let mut n = sat - 1;
    for (constellation, min, max, offset) in BLOCKS.iter() {
        let size = (max - min + 1) as usize;
        if n < size {
            let prn = min + n as u16 - offset;
            return Some(SV::new(*constellation, prn as u8));
        }
        n -= size;
    }
    None
}

/// System letter of identifiers
fn system_letter(constellation: Constellation) -> Option<char> {
    match constellation {
        Constellation::GPS => Some('G'),
        Constellation::Glonass => Some('R'),
        Constellation::Galileo => Some('E'),
        Constellation::QZSS => Some('J'),
        Constellation::BeiDou => Some('C'),
        Constellation::IRNSS => Some('I'),
        _ => None,
    }
}

/// Identifier of this vehicle: "G05", "R24", "J01" ...
/// SBAS vehicles are identified by their three digit PRN, like "120".
/// ```
/// use rtkcore::{observation::satellite_id, prelude::*};
/// assert_eq!(satellite_id(SV::new(Constellation::QZSS, 2)).unwrap(), "J02");
/// assert_eq!(satellite_id(SV::new(Constellation::EGNOS, 23)).unwrap(), "123");
/// ```
pub fn satellite_id(sv: SV) -> Option<String> {
    satellite_number(sv)?;
    if sv.constellation.is_sbas() {
        return Some(format!("{:03}", sv.prn as u16 + 100));
    }
    let letter = system_letter(sv.constellation)?;
    Some(format!("{}{:02}", letter, sv.prn))
}

/// Parses a vehicle identifier: "G05", "E11", "S20" ... or a plain PRN number,
/// which designates GPS (1-32), SBAS (120-158) or QZSS (193-202) vehicles.
pub fn parse_satellite_id(id: &str) -> Option<SV> {
    let id = id.trim();
    if let Ok(prn) = id.parse::<u16>() {
        let sv = match prn {
            1..=32 => SV::new(Constellation::GPS, prn as u8),
            120..=158 => SV::new(Constellation::SBAS, (prn - 100) as u8),
            193..=202 => SV::new(Constellation::QZSS, (prn - 192) as u8),
            _ => return None,
        };
        return Some(sv);
    }
    let mut chars = id.chars();
    let letter = chars.next()?;
    let prn = chars.as_str().trim().parse::<u8>().ok()?;
    let constellation = match letter {
        'G' => Constellation::GPS,
        'R' => Constellation::Glonass,
        'E' => Constellation::Galileo,
        'J' => Constellation::QZSS,
        'C' => Constellation::BeiDou,
        'I' => Constellation::IRNSS,
        'S' => Constellation::SBAS,
        _ => return None,
    };
    let sv = SV::new(constellation, prn);
    satellite_number(sv).map(|_| sv)
}

/// Vehicles and constellations to process
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteSelection {
    /// Constellations to process. Empty: all of them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub constellations: Vec<Constellation>,
    /// Vehicles never processed
    #[cfg_attr(feature = "serde", serde(default))]
    pub excluded: Vec<SV>,
    /// Vehicles processed whatever their constellation and health status
    #[cfg_attr(feature = "serde", serde(default))]
    pub included: Vec<SV>,
}

impl SatelliteSelection {
    fn selects(&self, constellation: Constellation) -> bool {
        self.constellations.is_empty()
            || self
                .constellations
                .iter()
                .any(|c| *c == constellation || (c.is_sbas() && constellation.is_sbas()))
    }
}

/// Returns true if `sv` should not be processed.
/// `health` is the broadcast health flag, None when no ephemeris is available:
/// such vehicles are always excluded. Otherwise, a vehicle listed in `selection`
/// is excluded or included as requested, a vehicle of a constellation that is
/// not selected is excluded, and any vehicle reporting a non null health flag
/// is excluded. The lowest QZSS health bit (LEX signal) is ignored.
pub fn is_excluded(sv: SV, health: Option<u32>, selection: Option<&SatelliteSelection>) -> bool {
    let Some(mut health) = health else {
        trace!("{} - ephemeris unavailable", sv);
        return true;
    };
    if let Some(selection) = selection {
        if selection.excluded.contains(&sv) {
            trace!("{} - excluded satellite", sv);
            return true;
        }
        if selection.included.contains(&sv) {
            return false;
        }
        if !selection.selects(sv.constellation) {
            trace!("{} - unselected constellation", sv);
            return true;
        }
    }
    if sv.constellation == Constellation::QZSS {
        health &= 0xFE;
    }
    if health != 0 {
        trace!("{} - unhealthy satellite: {:02x}", sv, health);
        return true;
    }
    false
}
