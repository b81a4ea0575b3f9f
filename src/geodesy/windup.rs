//! Carrier phase windup
use log::trace;
use nalgebra::Vector3;

use crate::{
    error::Error,
    geodesy::{
        erp::ErpValues, normalize, orientation::EarthOrientation, sunmoon::sun_moon_ecef,
        GeodeticPosition,
    },
    time::{leap::LeapSeconds, Instant},
};

/// Phase windup (cycles) for satellite `rs` and receiver `rr` (ECEF, m),
/// the Sun being located at `sun` (ECEF, m).
///
/// The result is unwrapped against `previous`, the value returned
/// at the previous epoch for the same satellite (0.0 initially), so the
/// caller needs to keep track of one running phase per satellite.
pub fn phase_windup_from_sun(
    sun: &Vector3<f64>,
    rs: &Vector3<f64>,
    rr: &Vector3<f64>,
    previous: f64,
) -> Result<f64, Error> {
    // satellite to receiver
    let ek = normalize(&(rr - rs))?;

    // satellite antenna: z toward earth center, y normal to the sun plane
    let ezs = normalize(&(-rs))?;
    let ess = normalize(&(sun - rs))?;
    let eys = normalize(&ezs.cross(&ess))?;
    let exs = eys.cross(&ezs);

    // receiver antenna: x north, y west
    let enu = GeodeticPosition::from_ecef(rr).enu_rotation();
    let exr = enu.row(1).transpose();
    let eyr = -enu.row(0).transpose();

    let eks = ek.cross(&eys);
    let ekr = ek.cross(&eyr);
    let ds = exs - ek * ek.dot(&exs) - eks;
    let dr = exr - ek * ek.dot(&exr) + ekr;

    let cosp = (ds.dot(&dr) / ds.norm() / dr.norm()).clamp(-1.0, 1.0);
    let mut ph = cosp.acos() / 2.0 / std::f64::consts::PI;
    if ek.dot(&ds.cross(&dr)) < 0.0 {
        ph = -ph;
    }
    Ok(ph + (previous - ph + 0.5).floor())
}

/// Phase windup (cycles) at `t_gpst`, for satellite `rs` and receiver `rr`
/// (ECEF, m), unwrapped against the `previous` running value.
/// On error, the caller should keep the previous value.
pub fn phase_windup(
    orientation: &mut EarthOrientation,
    leap: &LeapSeconds,
    t_gpst: Instant,
    rs: &Vector3<f64>,
    rr: &Vector3<f64>,
    previous: f64,
) -> Result<f64, Error> {
    let t_utc = leap.gpst_to_utc(t_gpst);
    let (sun, _, _) = sun_moon_ecef(orientation, leap, t_utc, &ErpValues::default());
    let phw = phase_windup_from_sun(&sun, rs, rr, previous)?;
    trace!("windup: t={} phw={:.4}", t_gpst, phw);
    Ok(phw)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::Constants;
    #[test]
    fn zenith_geometry() {
        let rr = Vector3::new(Constants::RE_WGS84, 0.0, 0.0);
        let rs = Vector3::new(Constants::RE_WGS84 + 2.0E7, 0.0, 0.0);

        let sun = Vector3::new(0.0, Constants::AU, 0.0);
        let phw = phase_windup_from_sun(&sun, &rs, &rr, 0.0).unwrap();
        assert!((phw + 0.25).abs() < 1E-9, "phw {}", phw);

        let sun = Vector3::new(0.0, -Constants::AU, 0.0);
        let phw = phase_windup_from_sun(&sun, &rs, &rr, 0.0).unwrap();
        assert!((phw - 0.25).abs() < 1E-9, "phw {}", phw);
    }
    #[test]
    fn unwrapping() {
        let rr = GeodeticPosition::from_degrees(43.56, 1.48, 150.0).to_ecef();
        let rs = Vector3::new(1.5E7, 5.0E6, 2.1E7);
        let sun = Vector3::new(-1.2E11, 8.0E10, 3.0E10);
        let ph = phase_windup_from_sun(&sun, &rs, &rr, 0.0).unwrap();
        assert!(ph.abs() <= 0.5);
        let phw = phase_windup_from_sun(&sun, &rs, &rr, 5.0 + ph).unwrap();
        assert!((phw - ph - 5.0).abs() < 1E-12);
        let phw = phase_windup_from_sun(&sun, &rs, &rr, -3.0 + ph + 0.2).unwrap();
        assert!((phw - ph + 3.0).abs() < 1E-12);
    }
    #[test]
    fn degenerate_geometry() {
        let rr = Vector3::new(Constants::RE_WGS84, 0.0, 0.0);
        let sun = Vector3::new(0.0, Constants::AU, 0.0);
        assert!(matches!(
            phase_windup_from_sun(&sun, &rr, &rr, 0.0),
            Err(Error::DegenerateVector)
        ));
        // sun aligned with the satellite and earth center
        let rs = Vector3::new(2.6E7, 0.0, 0.0);
        let sun = Vector3::new(Constants::AU, 0.0, 0.0);
        assert!(phase_windup_from_sun(&sun, &rs, &rr, 0.0).is_err());
    }
    #[test]
    fn continuity() {
        let leap = LeapSeconds::default();
        let mut eo = EarthOrientation::new();
        let rr = GeodeticPosition::from_degrees(35.0, 139.0, 40.0).to_ecef();
        let mut t = instant!(2021, 5, 5, 10, 0, 0);
        let mut phw = 0.0;
        for i in 0..10 {
            let angle = i as f64 * 1.0E-3;
            let rs = Vector3::new(
                -2.0E7 * angle.cos(),
                1.4E7 + 2.0E7 * angle.sin(),
                1.2E7,
            );
            let next = phase_windup(&mut eo, &leap, t, &rs, &rr, phw).unwrap();
            if i > 0 {
                assert!((next - phw).abs() < 0.05, "windup jump {} {}", phw, next);
            }
            phw = next;
            t = t + 30.0;
        }
    }
}
