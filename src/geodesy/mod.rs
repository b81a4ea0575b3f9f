//! Geodesy and Earth orientation
//!
//! ECEF vectors and rotations are expressed with [nalgebra] types.
//! [GeodeticPosition] latitude and longitude are always stored in radians.
use nalgebra::{Matrix3, Vector3};

use crate::{constants::Constants, error::Error, matrix::normalize3};

mod coords;

pub mod erp;
pub mod geometry;
pub mod nutation;
pub mod orientation;
pub mod pcv;
pub mod sunmoon;
pub mod windup;

/// Geodetic coordinates over the WGS84 ellipsoid
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticPosition {
    /// Latitude (rad)
    pub lat: f64,
    /// Longitude (rad)
    pub lon: f64,
    /// Ellipsoidal height (m)
    pub height: f64,
}

impl GeodeticPosition {
    /// Builds a [GeodeticPosition] from latitude and longitude in radians.
    pub fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }
    /// Builds a [GeodeticPosition] from latitude and longitude in decimal degrees.
    pub fn from_degrees(lat: f64, lon: f64, height: f64) -> Self {
        Self::new(lat * Constants::D2R, lon * Constants::D2R, height)
    }
    /// Returns (latitude, longitude) in decimal degrees, and height in meters.
    pub fn to_degrees(&self) -> (f64, f64, f64) {
        (
            self.lat * Constants::R2D,
            self.lon * Constants::R2D,
            self.height,
        )
    }
}

/// Frame rotation about the X axis.
pub fn rot_x(t: f64) -> Matrix3<f64> {
    let (s, c) = t.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Frame rotation about the Y axis.
pub fn rot_y(t: f64) -> Matrix3<f64> {
    let (s, c) = t.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Frame rotation about the Z axis.
pub fn rot_z(t: f64) -> Matrix3<f64> {
    let (s, c) = t.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Converts decimal degrees to (degrees, minutes, seconds), seconds
/// being rounded to `decimals` digits. A rounded value of 60 seconds
/// is carried into the minutes, then into the degrees.
/// The sign is carried by the degrees.
/// ```
/// use rtkcore::geodesy::deg_to_dms;
/// assert_eq!(deg_to_dms(-12.5, 3), [-12.0, 30.0, 0.0]);
/// assert_eq!(deg_to_dms(1.0 - 1.0E-9, 2), [1.0, 0.0, 0.0]);
/// ```
pub fn deg_to_dms(deg: f64, decimals: i32) -> [f64; 3] {
    let sign = if deg < 0.0 { -1.0 } else { 1.0 };
    let unit = 0.1_f64.powi(decimals);
    let a = deg.abs();
    let mut d = a.floor();
    let a = (a - d) * 60.0;
    let mut m = a.floor();
    let a = (a - m) * 60.0;
    let mut s = (a / unit + 0.5).floor() * unit;
    if s >= 60.0 {
        s = 0.0;
        m += 1.0;
        if m >= 60.0 {
            m = 0.0;
            d += 1.0;
        }
    }
    [sign * d, m, s]
}

/// Converts (degrees, minutes, seconds) to decimal degrees.
/// A negative zero degree field (-0°) keeps its sign.
pub fn dms_to_deg(dms: &[f64; 3]) -> f64 {
    let sign = if dms[0].is_sign_negative() { -1.0 } else { 1.0 };
    sign * (dms[0].abs() + dms[1] / 60.0 + dms[2] / 3600.0)
}

/// Unit vector, [Error::DegenerateVector] for a null vector.
pub(crate) fn normalize(v: &Vector3<f64>) -> Result<Vector3<f64>, Error> {
    let u = normalize3(&[v[0], v[1], v[2]])?;
    Ok(Vector3::from(u))
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn degrees() {
        let pos = geodetic!(45.0, -90.0, 100.0);
        assert!((pos.lat - std::f64::consts::FRAC_PI_4).abs() < 1E-15);
        assert!((pos.lon + std::f64::consts::FRAC_PI_2).abs() < 1E-15);
        let (lat, lon, h) = pos.to_degrees();
        assert!((lat - 45.0).abs() < 1E-12);
        assert!((lon + 90.0).abs() < 1E-12);
        assert_eq!(h, 100.0);
    }
    #[test]
    fn rotations() {
        let t = 0.3;
        for r in [rot_x(t), rot_y(t), rot_z(t)] {
            let id = r * r.transpose();
            assert!((id - Matrix3::identity()).norm() < 1E-14);
            assert!((r.determinant() - 1.0).abs() < 1E-14);
        }
        // frame rotation: X axis seen from a frame rotated by +90° about Z
        let v = rot_z(std::f64::consts::FRAC_PI_2) * Vector3::new(1.0, 0.0, 0.0);
        assert!((v - Vector3::new(0.0, -1.0, 0.0)).norm() < 1E-15);
        assert!((rot_x(t) * rot_x(-t) - Matrix3::identity()).norm() < 1E-14);
    }
    #[test]
    fn dms() {
        assert_eq!(deg_to_dms(30.5, 2), [30.0, 30.0, 0.0]);
        assert_eq!(deg_to_dms(-0.25, 4), [0.0, 15.0, 0.0]);
        assert_eq!(dms_to_deg(&deg_to_dms(-0.25, 4)), -0.25);
        assert!((dms_to_deg(&[-1.0, 30.0, 0.0]) + 1.5).abs() < 1E-15);
        assert!((dms_to_deg(&[1.0, 30.0, 36.0]) - 1.51).abs() < 1E-12);
        // seconds rounding carries into minutes and degrees
        assert_eq!(deg_to_dms(10.0 + 59.0 / 60.0 + 59.9999 / 3600.0, 2), [11.0, 0.0, 0.0]);
        assert_eq!(deg_to_dms(10.0 + 20.0 / 60.0 + 59.996 / 3600.0, 2), [10.0, 21.0, 0.0]);

        let deg = 123.456789;
        let back = dms_to_deg(&deg_to_dms(deg, 6));
        assert!((back - deg).abs() < 1E-9);
    }
}
