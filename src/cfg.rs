//! Atmosphere and geometry modeling options
use crate::{
    constants::Constants,
    observation::{SatelliteSelection, SnrMask},
};

fn default_elevation_mask() -> f64 {
    15.0
}

fn default_humidity() -> f64 {
    0.7
}

fn default_shell_height() -> f64 {
    Constants::HION
}

fn default_iono() -> bool {
    true
}

fn default_tropo() -> bool {
    true
}

fn default_tropo_mapping() -> bool {
    false
}

fn default_windup() -> bool {
    false
}

/// Which physical effects get modeled
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modeling {
    /// Broadcast (Klobuchar) ionospheric delay
    #[cfg_attr(feature = "serde", serde(default = "default_iono"))]
    pub iono_delay: bool,
    /// Saastamoinen tropospheric delay
    #[cfg_attr(feature = "serde", serde(default = "default_tropo"))]
    pub tropo_delay: bool,
    /// Map zenith tropospheric delays with the Niell mapping functions,
    /// instead of the flat earth 1/cos(z) projection
    #[cfg_attr(feature = "serde", serde(default = "default_tropo_mapping"))]
    pub tropo_mapping: bool,
    /// Carrier phase windup
    #[cfg_attr(feature = "serde", serde(default = "default_windup"))]
    pub phase_windup: bool,
}

impl Default for Modeling {
    fn default() -> Self {
        Self {
            iono_delay: default_iono(),
            tropo_delay: default_tropo(),
            tropo_mapping: default_tropo_mapping(),
            phase_windup: default_windup(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Minimal elevation angle (°). Satellites below that angle
    /// are not modeled nor considered in DOP evaluation.
    #[cfg_attr(feature = "serde", serde(default = "default_elevation_mask"))]
    pub elevation_mask_deg: f64,
    /// Relative humidity (0.0 - 1.0) of the standard atmosphere
    #[cfg_attr(feature = "serde", serde(default = "default_humidity"))]
    pub relative_humidity: f64,
    /// Height of the ionospheric single layer (m)
    #[cfg_attr(feature = "serde", serde(default = "default_shell_height"))]
    pub iono_shell_height_m: f64,
    /// modeling
    #[cfg_attr(feature = "serde", serde(default))]
    pub modeling: Modeling,
    /// Signal strength mask, disabled by default
    #[cfg_attr(feature = "serde", serde(default))]
    pub snr_mask: SnrMask,
    /// Vehicles and constellations to process, all of them by default
    #[cfg_attr(feature = "serde", serde(default))]
    pub selection: SatelliteSelection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elevation_mask_deg: default_elevation_mask(),
            relative_humidity: default_humidity(),
            iono_shell_height_m: default_shell_height(),
            modeling: Modeling::default(),
            snr_mask: SnrMask::default(),
            selection: SatelliteSelection::default(),
        }
    }
}

impl Config {
    /// Elevation mask (rad)
    pub fn elevation_mask(&self) -> f64 {
        self.elevation_mask_deg * Constants::D2R
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.elevation_mask_deg, 15.0);
        assert_eq!(cfg.relative_humidity, 0.7);
        assert_eq!(cfg.iono_shell_height_m, 350.0E3);
        assert!(cfg.modeling.iono_delay);
        assert!(cfg.modeling.tropo_delay);
        assert!(!cfg.modeling.tropo_mapping);
        assert!(!cfg.modeling.phase_windup);
        assert!((cfg.elevation_mask() - 15.0_f64.to_radians()).abs() < 1E-15);
        assert!(!cfg.snr_mask.rover && !cfg.snr_mask.base);
        assert!(cfg.selection.constellations.is_empty());
    }
    #[cfg(feature = "serde")]
    #[test]
    fn deserialization() {
        use gnss::prelude::Constellation;
        let cfg: Config = serde_json::from_str(
            r#"{
                "elevation_mask_deg": 10.0,
                "modeling": {
                    "tropo_mapping": true
                },
                "snr_mask": {
                    "rover": true
                },
                "selection": {
                    "constellations": ["GPS", "Galileo"]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.elevation_mask_deg, 10.0);
        assert_eq!(cfg.relative_humidity, 0.7);
        assert!(cfg.modeling.tropo_mapping);
        assert!(cfg.modeling.iono_delay);
        assert!(cfg.snr_mask.rover);
        assert!(!cfg.snr_mask.base);
        assert_eq!(cfg.snr_mask.mask[0][0], 0.0);
        assert_eq!(
            cfg.selection.constellations,
            vec![Constellation::GPS, Constellation::Galileo]
        );

        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
    }
}
