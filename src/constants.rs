//! Physical and geodetic constants

use std::f64::consts::PI;

/// Constant values used in this crate
pub struct Constants;

impl Constants {
    /// Speed of light in vacuum (m.s⁻¹)
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

    /// WGS84 semi major axis (m)
    pub const RE_WGS84: f64 = 6_378_137.0;

    /// WGS84 flattening
    pub const FE_WGS84: f64 = 1.0 / 298.257223563;

    /// WGS84 earth angular velocity (rad.s⁻¹)
    pub const OMEGA_EARTH: f64 = 7.2921151467E-5;

    /// Astronomical unit (m)
    pub const AU: f64 = 149_597_870_691.0;

    /// Ionospheric shell height used by the single layer model (m)
    pub const HION: f64 = 350_000.0;

    /// Degrees to radians
    pub const D2R: f64 = PI / 180.0;

    /// Radians to degrees
    pub const R2D: f64 = 180.0 / PI;

    /// Arc seconds to radians
    pub const AS2R: f64 = Self::D2R / 3600.0;

    /// L1 / E1 carrier frequency (Hz)
    pub const FREQ_L1: f64 = 1.57542E9;

    /// L2 carrier frequency (Hz)
    pub const FREQ_L2: f64 = 1.22760E9;

    /// L5 / E5a carrier frequency (Hz)
    pub const FREQ_L5: f64 = 1.17645E9;

    /// L6 / E6 carrier frequency (Hz)
    pub const FREQ_L6: f64 = 1.27875E9;

    /// E5b carrier frequency (Hz)
    pub const FREQ_E5B: f64 = 1.20714E9;

    /// E5a+b carrier frequency (Hz)
    pub const FREQ_E5AB: f64 = 1.191795E9;

    /// Glonass G1 base frequency (Hz)
    pub const FREQ_G1: f64 = 1.60200E9;

    /// Glonass G1 channel spacing (Hz)
    pub const DFREQ_G1: f64 = 0.56250E6;

    /// Glonass G2 base frequency (Hz)
    pub const FREQ_G2: f64 = 1.24600E9;

    /// Glonass G2 channel spacing (Hz)
    pub const DFREQ_G2: f64 = 0.43750E6;

    /// Glonass G3 carrier frequency (Hz)
    pub const FREQ_G3: f64 = 1.202025E9;

    /// BeiDou B1I carrier frequency (Hz)
    pub const FREQ_B1: f64 = 1.561098E9;

    /// BeiDou B2I carrier frequency (Hz)
    pub const FREQ_B2: f64 = 1.20714E9;

    /// BeiDou B3I carrier frequency (Hz)
    pub const FREQ_B3: f64 = 1.26852E9;

    /// Seconds per day
    pub const SECONDS_PER_DAY: f64 = 86_400.0;

    /// Seconds per week
    pub const SECONDS_PER_WEEK: f64 = 604_800.0;

    /// Squared first eccentricity of the WGS84 ellipsoid
    pub const fn e2_wgs84() -> f64 {
        Self::FE_WGS84 * (2.0 - Self::FE_WGS84)
    }
}
