//! Line of sight geometry: distance, azimuth and elevation, dilution of precision
use nalgebra::Vector3;

use crate::{
    constants::Constants,
    error::Error,
    geodesy::{normalize, GeodeticPosition},
    matrix::{Matrix, Transpose},
};

/// Geometric distance (m) between satellite `rs` and receiver `rr` (ECEF, m),
/// including the Sagnac effect, and the receiver to satellite unit vector.
/// Satellites located within the earth ellipsoid are rejected.
pub fn geometric_distance(
    rs: &Vector3<f64>,
    rr: &Vector3<f64>,
) -> Result<(f64, Vector3<f64>), Error> {
    if rs.norm() < Constants::RE_WGS84 {
        return Err(Error::BelowEarthSurface);
    }
    let e = rs - rr;
    let r = e.norm();
    let e = normalize(&e)?;
    let sagnac =
        Constants::OMEGA_EARTH * (rs[0] * rr[1] - rs[1] * rr[0]) / Constants::SPEED_OF_LIGHT;
    Ok((r + sagnac, e))
}

/// Azimuth and elevation angles
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AzEl {
    /// Azimuth (rad), within [0, 2π)
    pub azimuth: f64,
    /// Elevation (rad), within [-π/2, π/2]
    pub elevation: f64,
}

impl Default for AzEl {
    /// Zenith
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: std::f64::consts::FRAC_PI_2,
        }
    }
}

impl AzEl {
    /// Builds [AzEl] from angles expressed in degrees.
    pub fn from_degrees(azimuth: f64, elevation: f64) -> Self {
        Self {
            azimuth: azimuth * Constants::D2R,
            elevation: elevation * Constants::D2R,
        }
    }
    /// Azimuth and elevation of the receiver to satellite unit vector `e` (ECEF),
    /// seen from `pos`. Positions deep below the ellipsoid are considered
    /// degenerate and return the zenith.
    pub fn from_line_of_sight(pos: &GeodeticPosition, e: &Vector3<f64>) -> Self {
        if pos.height <= -Constants::RE_WGS84 {
            return Self::default();
        }
        let enu = pos.ecef_to_enu(e);
        let mut azimuth = if enu[0] * enu[0] + enu[1] * enu[1] < 1.0E-12 {
            0.0
        } else {
            enu[0].atan2(enu[1])
        };
        if azimuth < 0.0 {
            azimuth += 2.0 * std::f64::consts::PI;
        }
        Self {
            azimuth,
            elevation: enu[2].clamp(-1.0, 1.0).asin(),
        }
    }
}

/// Dilution of precision
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dop {
    /// Geometric DOP
    pub gdop: f64,
    /// Position DOP
    pub pdop: f64,
    /// Horizontal DOP
    pub hdop: f64,
    /// Vertical DOP
    pub vdop: f64,
}

impl Dop {
    /// Minimal number of satellites
    pub const MIN_SATELLITES: usize = 4;

    /// Evaluates DOPs for satellites seen at `azel`, ignoring those below
    /// `elevation_mask` (rad) or below the horizon.
    /// All DOPs are null when less than 4 satellites remain
    /// or when the geometry is degenerate.
    pub fn new(azel: &[AzEl], elevation_mask: f64) -> Self {
        let rows = azel
            .iter()
            .filter(|azel| azel.elevation >= elevation_mask && azel.elevation > 0.0)
            .flat_map(|azel| {
                let (sinel, cosel) = azel.elevation.sin_cos();
                [
                    cosel * azel.azimuth.sin(),
                    cosel * azel.azimuth.cos(),
                    sinel,
                    1.0,
                ]
            })
            .collect::<Vec<_>>();
        let n = rows.len() / 4;
        if n < Self::MIN_SATELLITES {
            return Self::default();
        }
        Self::from_design(n, rows).unwrap_or_default()
    }
    fn from_design(n: usize, rows: Vec<f64>) -> Result<Self, Error> {
        // one column per satellite
        let h = Matrix::from_column_major(4, n, rows)?;
        let mut q = Matrix::multiply(Transpose::No, Transpose::Yes, &h, &h)?;
        q.invert()?;
        let (qe, qn, qu, qc) = (q[(0, 0)], q[(1, 1)], q[(2, 2)], q[(3, 3)]);
        Ok(Self {
            gdop: (qe + qn + qu + qc).sqrt(),
            pdop: (qe + qn + qu).sqrt(),
            hdop: (qe + qn).sqrt(),
            vdop: qu.sqrt(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn distance() {
        let rr = Vector3::new(Constants::RE_WGS84, 0.0, 0.0);
        let rs = Vector3::new(Constants::RE_WGS84 + 2.0E7, 0.0, 0.0);
        let (r, e) = geometric_distance(&rs, &rr).unwrap();
        assert_eq!(r, 2.0E7);
        assert_eq!(e, Vector3::new(1.0, 0.0, 0.0));

        // sagnac effect
        let rs = Vector3::new(1.5E7, 2.0E7, 0.0);
        let (r, _) = geometric_distance(&rs, &rr).unwrap();
        let sagnac = Constants::OMEGA_EARTH * (-2.0E7 * Constants::RE_WGS84)
            / Constants::SPEED_OF_LIGHT;
        assert!((r - (rs - rr).norm() - sagnac).abs() < 1E-6);
        assert!(sagnac < -30.0);

        let rs = Vector3::new(6.0E6, 0.0, 0.0);
        assert!(matches!(
            geometric_distance(&rs, &rr),
            Err(Error::BelowEarthSurface)
        ));
        assert!(matches!(
            geometric_distance(&rr, &rr),
            Err(Error::DegenerateVector)
        ));
    }
    #[test]
    fn azimuth_elevation() {
        let pos = geodetic!(0.0, 0.0, 0.0);
        let azel = AzEl::from_line_of_sight(&pos, &Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(azel.azimuth, 0.0);
        assert!((azel.elevation - std::f64::consts::FRAC_PI_2).abs() < 1E-12);

        // east, 45° above horizon
        let e = Vector3::new(1.0, 1.0, 0.0) / 2.0_f64.sqrt();
        let azel = AzEl::from_line_of_sight(&pos, &e);
        assert!((azel.azimuth - std::f64::consts::FRAC_PI_2).abs() < 1E-12);
        assert!((azel.elevation - std::f64::consts::FRAC_PI_4).abs() < 1E-12);

        // west, below horizon: azimuth is wrapped
        let e = Vector3::new(-1.0, -1.0, 0.0) / 2.0_f64.sqrt();
        let azel = AzEl::from_line_of_sight(&pos, &e);
        assert!((azel.azimuth - 1.5 * std::f64::consts::PI).abs() < 1E-12);
        assert!((azel.elevation + std::f64::consts::FRAC_PI_4).abs() < 1E-12);

        let deep = GeodeticPosition::new(0.3, 0.2, -7.0E6);
        assert_eq!(AzEl::from_line_of_sight(&deep, &e), AzEl::default());
    }
    #[test]
    fn dilution() {
        let zenith = AzEl::from_degrees(0.0, 90.0);
        let sats = [
            zenith,
            AzEl::from_degrees(0.0, 30.0),
            AzEl::from_degrees(120.0, 30.0),
            AzEl::from_degrees(240.0, 30.0),
        ];
        let dop = Dop::new(&sats, 10.0 * Constants::D2R);
        assert!(dop.gdop > dop.pdop);
        assert!(dop.pdop > dop.hdop);
        assert!((dop.pdop * dop.pdop - dop.hdop * dop.hdop - dop.vdop * dop.vdop).abs() < 1E-9);
        // 3 satellites evenly spread in azimuth at 30° of elevation:
        // hdop² = 2 / (3/2 cos²(30°)) = 16/9
        assert!((dop.hdop * dop.hdop - 16.0 / 9.0).abs() < 1E-9);

        // elevation mask leaves a single satellite
        let dop = Dop::new(&sats, 45.0 * Constants::D2R);
        assert_eq!(dop, Dop::default());
        assert_eq!(Dop::new(&sats[..3], 0.0), Dop::default());

        // degenerate geometry
        let sats = [zenith; 5];
        assert_eq!(Dop::new(&sats, 0.0), Dop::default());
    }
}
