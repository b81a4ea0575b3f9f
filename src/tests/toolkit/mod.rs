use nalgebra::Vector3;

use crate::geodesy::{geometry::AzEl, GeodeticPosition};

/// Nominal GPS satellite range (m)
pub const SATELLITE_RANGE: f64 = 20_200.0E3;

/*
 * Test: panic if both vectors differ by more than tolerance (m)
 */
pub fn assert_vector_eq(lhs: &Vector3<f64>, rhs: &Vector3<f64>, tolerance: f64) {
    let err = (lhs - rhs).norm();
    if err > tolerance {
        panic!(
            "({:.6}, {:.6}, {:.6}) != ({:.6}, {:.6}, {:.6}) err={:.3e}",
            lhs[0], lhs[1], lhs[2], rhs[0], rhs[1], rhs[2], err
        );
    }
}

/*
 * Builds satellite positions (ECEF) seen at given angles from receiver
 */
pub fn sky(pos: &GeodeticPosition, azel: &[AzEl]) -> Vec<Vector3<f64>> {
    let rr = pos.to_ecef();
    azel.iter()
        .map(|azel| {
            let (sinel, cosel) = azel.elevation.sin_cos();
            let los = Vector3::new(
                cosel * azel.azimuth.sin(),
                cosel * azel.azimuth.cos(),
                sinel,
            );
            rr + pos.enu_to_ecef(&los) * SATELLITE_RANGE
        })
        .collect()
}

/*
 * Typical open sky geometry
 */
pub fn open_sky() -> Vec<AzEl> {
    [
        (0.0, 85.0),
        (45.0, 40.0),
        (135.0, 30.0),
        (225.0, 50.0),
        (315.0, 25.0),
        (90.0, 20.0),
    ]
    .iter()
    .map(|(az, el)| AzEl::from_degrees(*az, *el))
    .collect()
}
