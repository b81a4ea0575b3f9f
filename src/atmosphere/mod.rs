//! Atmospheric propagation delays
use log::trace;

use crate::{
    cfg::Config,
    geodesy::{geometry::AzEl, GeodeticPosition},
    time::Instant,
};

mod iono;
mod tropo;

pub use iono::{ionosphere_mapping, pierce_point, KbModel};
pub use tropo::{niell, saastamoinen, troposphere_mapping};

/// Slant delays along one line of sight
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtmosphericDelays {
    /// L1 ionospheric delay (m)
    pub iono: f64,
    /// Tropospheric delay (m)
    pub tropo: f64,
}

impl AtmosphericDelays {
    /// Total delay (m)
    pub fn total(&self) -> f64 {
        self.iono + self.tropo
    }
}

/// Slant tropospheric delay (m): Saastamoinen zenith delays
/// projected with the Niell mapping functions.
pub fn mapped_troposphere_delay(
    t: Instant,
    pos: &GeodeticPosition,
    azel: &AzEl,
    humidity: f64,
) -> f64 {
    let zenith = AzEl {
        azimuth: 0.0,
        elevation: std::f64::consts::FRAC_PI_2,
    };
    let zhd = saastamoinen(pos, &zenith, 0.0);
    let zwd = saastamoinen(pos, &zenith, humidity) - zhd;
    let (dry, wet) = troposphere_mapping(t, pos, azel);
    zhd * dry + zwd * wet
}

/// Evaluates the delays selected by `cfg`, at `t_gpst`, for a receiver
/// located at `pos` and a satellite seen at `azel`.
/// Satellites below the elevation mask are not modeled.
pub fn slant_delays(
    cfg: &Config,
    kb: &KbModel,
    t_gpst: Instant,
    pos: &GeodeticPosition,
    azel: &AzEl,
) -> AtmosphericDelays {
    let mut delays = AtmosphericDelays::default();
    if azel.elevation < cfg.elevation_mask() {
        return delays;
    }
    if cfg.modeling.iono_delay {
        delays.iono = kb.delay(t_gpst, pos, azel);
    }
    if cfg.modeling.tropo_delay {
        delays.tropo = if cfg.modeling.tropo_mapping {
            mapped_troposphere_delay(t_gpst, pos, azel, cfg.relative_humidity)
        } else {
            saastamoinen(pos, azel, cfg.relative_humidity)
        };
    }
    trace!("{}: atmospheric delays {:?}", t_gpst, delays);
    delays
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cfg::Modeling;
    #[test]
    fn masked_satellites() {
        let cfg = Config::default();
        let pos = geodetic!(43.6, 1.4, 150.0);
        let t = instant!(2021, 3, 1, 12, 0, 0);
        let delays = slant_delays(
            &cfg,
            &KbModel::FALLBACK,
            t,
            &pos,
            &AzEl::from_degrees(10.0, 10.0),
        );
        assert_eq!(delays, AtmosphericDelays::default());
    }
    #[test]
    fn modeling_switches() {
        let pos = geodetic!(43.6, 1.4, 150.0);
        let t = instant!(2021, 3, 1, 12, 0, 0);
        let azel = AzEl::from_degrees(200.0, 40.0);

        let cfg = Config::default();
        let delays = slant_delays(&cfg, &KbModel::FALLBACK, t, &pos, &azel);
        assert_eq!(delays.iono, KbModel::FALLBACK.delay(t, &pos, &azel));
        assert_eq!(delays.tropo, saastamoinen(&pos, &azel, 0.7));
        assert_eq!(delays.total(), delays.iono + delays.tropo);

        let cfg = Config {
            modeling: Modeling {
                iono_delay: false,
                tropo_mapping: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let delays = slant_delays(&cfg, &KbModel::FALLBACK, t, &pos, &azel);
        assert_eq!(delays.iono, 0.0);
        // both projections agree within a few centimeters at 40°
        let flat = saastamoinen(&pos, &azel, 0.7);
        assert!((delays.tropo - flat).abs() < 0.05, "{} {}", delays.tropo, flat);
    }
    #[test]
    fn mapped_zenith() {
        let pos = geodetic!(-33.9, 18.4, 10.0);
        let t = instant!(2020, 7, 1, 0, 0, 0);
        let zenith = AzEl::default();
        let mapped = mapped_troposphere_delay(t, &pos, &zenith, 0.5);
        let direct = saastamoinen(&pos, &zenith, 0.5);
        assert!((mapped - direct).abs() < 1E-3);
    }
}
