//! Low precision Sun and Moon positions, suited to
//! antenna and tidal corrections rather than precise ephemerides.
use log::trace;
use nalgebra::Vector3;

use crate::{
    constants::Constants,
    geodesy::{erp::ErpValues, nutation::fundamental_arguments, orientation::EarthOrientation},
    time::{leap::LeapSeconds, Instant, J2000},
};

/// Sun and Moon geocentric positions in the ECI frame (m), at `t_ut1`.
pub fn sun_moon_eci(t_ut1: Instant) -> (Vector3<f64>, Vector3<f64>) {
    let t = t_ut1.diff(&Instant::from_calendar(J2000)) / 86400.0 / 36525.0;
    let f = fundamental_arguments(t);

    // obliquity of the ecliptic
    let eps = 23.439291 - 0.0130042 * t;
    let (sine, cose) = (eps * Constants::D2R).sin_cos();

    // sun
    let ms = 357.5277233 + 35999.05034 * t;
    let ls = 280.460
        + 36000.770 * t
        + 1.914666471 * (ms * Constants::D2R).sin()
        + 0.019994643 * (2.0 * ms * Constants::D2R).sin();
    let rs = Constants::AU
        * (1.000140612
            - 0.016708617 * (ms * Constants::D2R).cos()
            - 0.000139589 * (2.0 * ms * Constants::D2R).cos());
    let (sinl, cosl) = (ls * Constants::D2R).sin_cos();
    let sun = Vector3::new(rs * cosl, rs * cose * sinl, rs * sine * sinl);

    // moon
    let lm = 218.32 + 481267.883 * t + 6.29 * f[0].sin() - 1.27 * (f[0] - 2.0 * f[3]).sin()
        + 0.66 * (2.0 * f[3]).sin()
        + 0.21 * (2.0 * f[0]).sin()
        - 0.19 * f[1].sin()
        - 0.11 * (2.0 * f[2]).sin();
    let pm = 5.13 * f[2].sin() + 0.28 * (f[0] + f[2]).sin()
        - 0.28 * (f[2] - f[0]).sin()
        - 0.17 * (f[2] - 2.0 * f[3]).sin();
    let parallax = 0.9508
        + 0.0518 * f[0].cos()
        + 0.0095 * (f[0] - 2.0 * f[3]).cos()
        + 0.0078 * (2.0 * f[3]).cos()
        + 0.0028 * (2.0 * f[0]).cos();
    let rm = Constants::RE_WGS84 / (parallax * Constants::D2R).sin();
    let (sinl, cosl) = (lm * Constants::D2R).sin_cos();
    let (sinp, cosp) = (pm * Constants::D2R).sin_cos();
    let moon = Vector3::new(
        rm * cosp * cosl,
        rm * (cose * cosp * sinl - sine * sinp),
        rm * (sine * cosp * sinl + cose * sinp),
    );

    trace!(
        "sun={:.3} {:.3} {:.3} moon={:.3} {:.3} {:.3}",
        sun[0],
        sun[1],
        sun[2],
        moon[0],
        moon[1],
        moon[2]
    );
    (sun, moon)
}

/// Sun and Moon positions in the ECEF frame (m), with the Greenwich
/// mean sidereal time (rad), at `t_utc`.
pub fn sun_moon_ecef(
    orientation: &mut EarthOrientation,
    leap: &LeapSeconds,
    t_utc: Instant,
    erp: &ErpValues,
) -> (Vector3<f64>, Vector3<f64>, f64) {
    let (sun, moon) = sun_moon_eci(t_utc + erp.ut1_utc);
    let (u, gmst) = orientation.eci_to_ecef(leap, t_utc, erp);
    (u * sun, u * moon, gmst)
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn distances() {
        let mut t = instant!(2018, 1, 1, 0, 0, 0);
        for _ in 0..60 {
            let (sun, moon) = sun_moon_eci(t);
            let ds = sun.norm() / Constants::AU;
            assert!(ds > 0.98 && ds < 1.02, "sun {}", ds);
            let dm = moon.norm();
            assert!(dm > 3.5E8 && dm < 4.1E8, "moon {}", dm);
            t = t + 6.0 * 86400.0;
        }
    }
    #[test]
    fn equinox() {
        // 2020/03/20 03:50 UTC: the sun crosses the celestial equator
        let (sun, _) = sun_moon_eci(instant!(2020, 3, 20, 3, 50, 0));
        let declination = (sun[2] / sun.norm()).asin();
        assert!(declination.abs() < 0.01 * Constants::D2R);
        // right ascension 0h
        assert!(sun[0] > 0.0);
        assert!(sun[1].abs() / sun.norm() < 1.0E-3);

        // june solstice: maximal declination
        let (sun, _) = sun_moon_eci(instant!(2020, 6, 20, 21, 44, 0));
        let declination = (sun[2] / sun.norm()).asin() * Constants::R2D;
        assert!((declination - 23.44).abs() < 0.01);
    }
    #[test]
    fn ecef_frame() {
        let leap = LeapSeconds::default();
        let mut eo = EarthOrientation::new();
        // local noon on the greenwich meridian, close to the equinox
        let t = instant!(2020, 3, 20, 12, 7, 0);
        let (sun, moon, _) = sun_moon_ecef(&mut eo, &leap, t, &ErpValues::default());
        let (_, moon_eci) = sun_moon_eci(t);
        assert!((moon.norm() - moon_eci.norm()).abs() < 1.0E-3);
        let lon = sun[1].atan2(sun[0]) * Constants::R2D;
        assert!(lon.abs() < 1.0, "sun longitude {}", lon);
        let lat = (sun[2] / sun.norm()).asin() * Constants::R2D;
        assert!(lat.abs() < 1.0, "sun latitude {}", lat);
    }
}
