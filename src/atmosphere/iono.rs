//! Ionospheric delay: broadcast (Klobuchar) model and single layer geometry
use std::f64::consts::PI;

use crate::{
    constants::Constants,
    geodesy::{geometry::AzEl, GeodeticPosition},
    time::Instant,
};

/// Klobuchar model payload
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KbModel {
    /// Alpha coefficients
    /// ([sec], [sec.semi-circle⁻¹], [sec.semi-circle⁻²], [sec.semi-circle⁻³])
    pub alpha: (f64, f64, f64, f64),
    /// Beta coefficients
    /// ([sec], [sec.semi-circle⁻¹], [sec.semi-circle⁻²], [sec.semi-circle⁻³])
    pub beta: (f64, f64, f64, f64),
}

impl KbModel {
    /// Coefficients broadcast on 2004/01/01,
    /// used when the model is not known.
    pub const FALLBACK: Self = Self {
        alpha: (0.1118E-07, -0.7451E-08, -0.5961E-07, 0.1192E-06),
        beta: (0.1167E+06, -0.2294E+06, -0.1311E+06, 0.1049E+07),
    };

    pub fn new(alpha: [f64; 4], beta: [f64; 4]) -> Self {
        Self {
            alpha: (alpha[0], alpha[1], alpha[2], alpha[3]),
            beta: (beta[0], beta[1], beta[2], beta[3]),
        }
    }
    /// True when all coefficients are null.
    pub fn is_null(&self) -> bool {
        let (a0, a1, a2, a3) = self.alpha;
        let (b0, b1, b2, b3) = self.beta;
        [a0, a1, a2, a3, b0, b1, b2, b3]
            .iter()
            .map(|c| c * c)
            .sum::<f64>()
            <= 0.0
    }
    /// L1 ionospheric delay (m) at `t_gpst`, for a receiver located at `pos`
    /// and a satellite seen at `azel`. Null coefficients are replaced by
    /// [KbModel::FALLBACK]. The delay is null for satellites below the horizon
    /// and receivers lower than -1000 m.
    pub fn delay(&self, t_gpst: Instant, pos: &GeodeticPosition, azel: &AzEl) -> f64 {
        if pos.height < -1.0E3 || azel.elevation <= 0.0 {
            return 0.0;
        }
        let model = if self.is_null() {
            &Self::FALLBACK
        } else {
            self
        };
        let el = azel.elevation / PI;

        // earth centered angle (semi-circle)
        let psi = 0.0137 / (el + 0.11) - 0.022;

        // sub ionospheric latitude, longitude (semi-circle)
        let phi = (pos.lat / PI + psi * azel.azimuth.cos()).clamp(-0.416, 0.416);
        let lam = pos.lon / PI + psi * azel.azimuth.sin() / (phi * PI).cos();

        // geomagnetic latitude (semi-circle)
        let phi = phi + 0.064 * ((lam - 1.617) * PI).cos();

        // local time (s)
        let (_, tow) = t_gpst.to_gpst_week();
        let mut tt = 43200.0 * lam + tow;
        tt -= (tt / 86400.0).floor() * 86400.0;

        // slant factor
        let f = 1.0 + 16.0 * (0.53 - el).powi(3);

        let (a0, a1, a2, a3) = model.alpha;
        let (b0, b1, b2, b3) = model.beta;
        let amp = (a0 + phi * (a1 + phi * (a2 + phi * a3))).max(0.0);
        let per = (b0 + phi * (b1 + phi * (b2 + phi * b3))).max(72000.0);
        let x = 2.0 * PI * (tt - 50400.0) / per;

        let delay = if x.abs() < 1.57 {
            5.0E-9 + amp * (1.0 + x * x * (-0.5 + x * x / 24.0))
        } else {
            5.0E-9
        };
        Constants::SPEED_OF_LIGHT * f * delay
    }
}

/// Single layer mapping function: slant to vertical delay ratio
/// for a thin shell located `shell_height` (m) above the ellipsoid.
/// Receivers above the shell get a unit ratio.
pub fn ionosphere_mapping(pos: &GeodeticPosition, azel: &AzEl, shell_height: f64) -> f64 {
    if pos.height >= shell_height {
        return 1.0;
    }
    let ratio = (Constants::RE_WGS84 + pos.height) / (Constants::RE_WGS84 + shell_height);
    1.0 / (ratio * (PI / 2.0 - azel.elevation).sin()).asin().cos()
}

/// Ionospheric pierce point, on a thin shell `shell_height` above
/// a sphere of radius `earth_radius` (same units), and slant factor.
/// Only valid for receivers on the earth surface.
pub fn pierce_point(
    pos: &GeodeticPosition,
    azel: &AzEl,
    earth_radius: f64,
    shell_height: f64,
) -> (GeodeticPosition, f64) {
    let rp = earth_radius / (earth_radius + shell_height) * azel.elevation.cos();
    let ap = PI / 2.0 - azel.elevation - rp.asin();
    let (sinap, cosap) = ap.sin_cos();
    let tanap = ap.tan();
    let (sinaz, cosaz) = azel.azimuth.sin_cos();

    let lat = (pos.lat.sin() * cosap + pos.lat.cos() * sinap * cosaz).asin();

    // the pierce point may lie across the pole
    let across_pole = (pos.lat > 70.0 * Constants::D2R && tanap * cosaz > (PI / 2.0 - pos.lat).tan())
        || (pos.lat < -70.0 * Constants::D2R && -tanap * cosaz > (PI / 2.0 + pos.lat).tan());
    let lon = if across_pole {
        pos.lon + PI - (sinap * sinaz / lat.cos()).asin()
    } else {
        pos.lon + (sinap * sinaz / lat.cos()).asin()
    };
    (
        GeodeticPosition::new(lat, lon, shell_height),
        1.0 / (1.0 - rp * rp).sqrt(),
    )
}
