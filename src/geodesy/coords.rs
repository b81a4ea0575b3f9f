//! ECEF, geodetic and local ENU frames
use nalgebra::{Matrix3, Vector3};

use crate::{constants::Constants, geodesy::GeodeticPosition};

/// Height iteration stops once the auxiliary z term moves by less than this (m)
const ITERATION_THRESHOLD: f64 = 1.0E-4;

/// Safety net: the iteration converges within a handful of steps
const MAX_ITERATIONS: usize = 64;

impl GeodeticPosition {
    /// Converts ECEF coordinates (m) to geodetic coordinates.
    /// Positions on the polar axis get a ±90° latitude and a null longitude.
    pub fn from_ecef(r: &Vector3<f64>) -> Self {
        let e2 = Constants::e2_wgs84();
        let r2 = r[0] * r[0] + r[1] * r[1];
        let mut v = Constants::RE_WGS84;
        let mut z = r[2];
        let mut zk = 0.0;
        let mut iter = 0;
        while (z - zk).abs() >= ITERATION_THRESHOLD && iter < MAX_ITERATIONS {
            zk = z;
            let sinp = z / (r2 + z * z).sqrt();
            v = Constants::RE_WGS84 / (1.0 - e2 * sinp * sinp).sqrt();
            z = r[2] + v * e2 * sinp;
            iter += 1;
        }
        let (lat, lon) = if r2 > 1.0E-12 {
            ((z / r2.sqrt()).atan(), r[1].atan2(r[0]))
        } else if r[2] > 0.0 {
            (std::f64::consts::FRAC_PI_2, 0.0)
        } else {
            (-std::f64::consts::FRAC_PI_2, 0.0)
        };
        Self {
            lat,
            lon,
            height: (r2 + z * z).sqrt() - v,
        }
    }
    /// Converts to ECEF coordinates (m).
    pub fn to_ecef(&self) -> Vector3<f64> {
        let (sinp, cosp) = self.lat.sin_cos();
        let (sinl, cosl) = self.lon.sin_cos();
        let e2 = Constants::e2_wgs84();
        let v = Constants::RE_WGS84 / (1.0 - e2 * sinp * sinp).sqrt();
        Vector3::new(
            (v + self.height) * cosp * cosl,
            (v + self.height) * cosp * sinl,
            (v * (1.0 - e2) + self.height) * sinp,
        )
    }
    /// ECEF to local East North Up rotation matrix, at this location.
    pub fn enu_rotation(&self) -> Matrix3<f64> {
        let (sinp, cosp) = self.lat.sin_cos();
        let (sinl, cosl) = self.lon.sin_cos();
        Matrix3::new(
            -sinl,
            cosl,
            0.0,
            -sinp * cosl,
            -sinp * sinl,
            cosp,
            cosp * cosl,
            cosp * sinl,
            sinp,
        )
    }
    /// Projects an ECEF vector onto the local ENU frame.
    pub fn ecef_to_enu(&self, r: &Vector3<f64>) -> Vector3<f64> {
        self.enu_rotation() * r
    }
    /// Converts a local ENU vector to the ECEF frame.
    pub fn enu_to_ecef(&self, e: &Vector3<f64>) -> Vector3<f64> {
        self.enu_rotation().transpose() * e
    }
    /// Converts an ECEF covariance matrix to the local ENU frame.
    pub fn covariance_to_enu(&self, p: &Matrix3<f64>) -> Matrix3<f64> {
        let e = self.enu_rotation();
        e * p * e.transpose()
    }
    /// Converts a local ENU covariance matrix to the ECEF frame.
    pub fn covariance_to_ecef(&self, q: &Matrix3<f64>) -> Matrix3<f64> {
        let e = self.enu_rotation();
        e.transpose() * q * e
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn equatorial_radius() {
        let pos = GeodeticPosition::from_ecef(&Vector3::new(Constants::RE_WGS84, 0.0, 0.0));
        assert!(pos.lat.abs() < 1E-12);
        assert!(pos.lon.abs() < 1E-12);
        assert!(pos.height.abs() < 1E-6);
    }
    #[test]
    fn polar_axis() {
        let b = Constants::RE_WGS84 * (1.0 - Constants::FE_WGS84);
        let pos = GeodeticPosition::from_ecef(&Vector3::new(0.0, 0.0, b + 10.0));
        assert_eq!(pos.lat, std::f64::consts::FRAC_PI_2);
        assert_eq!(pos.lon, 0.0);
        assert!((pos.height - 10.0).abs() < 1E-6);

        let pos = GeodeticPosition::from_ecef(&Vector3::new(0.0, 0.0, -b));
        assert_eq!(pos.lat, -std::f64::consts::FRAC_PI_2);
        assert!(pos.height.abs() < 1E-6);
    }
    #[test]
    fn geodetic_ecef() {
        for (lat, lon, h) in [
            (43.5606, 1.4813, 152.0),
            (-33.8688, 151.2093, 58.0),
            (78.2232, 15.6267, 450.0),
            (-88.9, -120.0, 2800.0),
            (0.0, 179.9, -25.0),
        ] {
            let pos = geodetic!(lat, lon, h);
            let r = pos.to_ecef();
            let back = GeodeticPosition::from_ecef(&r);
            assert!((back.to_ecef() - r).norm() < 1E-6, "({}, {}, {})", lat, lon, h);
            assert!((back.lat - pos.lat).abs() < 1E-10);
            assert!((back.lon - pos.lon).abs() < 1E-10);
            assert!((back.height - h).abs() < 1E-4);
        }
    }
    #[test]
    fn enu_frame() {
        let pos = geodetic!(0.0, 90.0, 0.0);
        // local east is -X, local up is +Y
        let enu = pos.ecef_to_enu(&Vector3::new(-1.0, 0.0, 0.0));
        assert!((enu - Vector3::new(1.0, 0.0, 0.0)).norm() < 1E-15);
        let enu = pos.ecef_to_enu(&Vector3::new(0.0, 1.0, 0.0));
        assert!((enu - Vector3::new(0.0, 0.0, 1.0)).norm() < 1E-15);
        let enu = pos.ecef_to_enu(&Vector3::new(0.0, 0.0, 1.0));
        assert!((enu - Vector3::new(0.0, 1.0, 0.0)).norm() < 1E-15);

        let pos = geodetic!(48.85, 2.35, 35.0);
        let v = Vector3::new(12.0, -3.5, 7.25);
        assert!((pos.enu_to_ecef(&pos.ecef_to_enu(&v)) - v).norm() < 1E-12);
    }
    #[test]
    fn covariances() {
        let pos = geodetic!(-23.5, -46.6, 760.0);
        let p = Matrix3::new(4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 9.0);
        let q = pos.covariance_to_enu(&p);
        // rotation preserves the trace and symmetry
        assert!((q.trace() - p.trace()).abs() < 1E-12);
        assert!((q - q.transpose()).norm() < 1E-12);
        assert!((pos.covariance_to_ecef(&q) - p).norm() < 1E-12);
    }
}
