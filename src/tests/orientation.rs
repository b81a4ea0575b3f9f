use std::thread;

use nalgebra::Vector3;

use crate::{
    constants::Constants,
    geodesy::{
        erp::ErpTable,
        orientation::{EarthOrientation, SharedEarthOrientation},
        sunmoon::sun_moon_ecef,
        windup::phase_windup,
    },
    tests::toolkit::SATELLITE_RANGE,
    time::leap::{LeapSeconds, SharedLeapSeconds},
};

const ERP: &str = "VERSION 2
  MJD         X        Y     UT1-UTC    LOD   Xsig   Ysig   UTsig LODsig  Nr Nf Nt     Xrt    Yrt  Xrtsig Yrtsig
59274.50  50000  350000  -1800000  2000  10  10  1  1  10 10 0  100  -200  10  10
59275.50  50100  349800  -1800200  2100  10  10  1  1  10 10 0  100  -200  10  10
59276.50  50200  349600  -1800400  2200  10  10  1  1  10 10 0  100  -200  10  10
";

#[test]
fn shared_and_local_orientations_agree() {
    let table = ErpTable::parse(ERP.as_bytes()).unwrap();
    let leap = LeapSeconds::default();
    let t_gpst = instant!(2021, 3, 2, 0, 0, 0);
    let t_utc = leap.gpst_to_utc(t_gpst);
    assert!((leap.utc_to_gpst(t_utc).diff(&t_gpst)).abs() < 1E-9);

    let erp = table.values_at(&leap, t_gpst).unwrap();
    assert!(erp.ut1_utc < -0.18 && erp.ut1_utc > -0.181);

    let mut local = EarthOrientation::new();
    let (u, gmst) = local.eci_to_ecef(&leap, t_utc, &erp);

    let shared = SharedEarthOrientation::new();
    let shared_leap = SharedLeapSeconds::new(leap.clone());
    let handles = (0..4)
        .map(|i| {
            let shared = shared.clone();
            let shared_leap = shared_leap.clone();
            thread::spawn(move || {
                // each thread alternates between two instants
                let t = t_utc + (i % 2) as f64 * 60.0;
                shared.eci_to_ecef(&shared_leap, t, &erp)
            })
        })
        .collect::<Vec<_>>();
    for (i, handle) in handles.into_iter().enumerate() {
        let (u_shared, gmst_shared) = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(u_shared, u);
            assert_eq!(gmst_shared, gmst);
        } else {
            let (u_later, _) = local.eci_to_ecef(&leap, t_utc + 60.0, &erp);
            assert_eq!(u_shared, u_later);
        }
    }
}

#[test]
fn windup_along_a_pass() {
    let leap = LeapSeconds::default();
    let mut orientation = EarthOrientation::new();
    let rr = geodetic!(45.0, 5.0, 200.0).to_ecef();

    // satellite moving along a great circle, 12 hour period
    let radius = Constants::RE_WGS84 + SATELLITE_RANGE;
    let omega = 2.0 * std::f64::consts::PI / 43200.0;
    let t0 = instant!(2021, 3, 1, 6, 0, 0);

    let mut windup = 0.0;
    let mut previous = None;
    for k in 0..120 {
        let t = t0 + k as f64 * 30.0;
        let angle = omega * k as f64 * 30.0;
        let rs = Vector3::new(
            radius * angle.cos(),
            radius * angle.sin() * 0.5,
            radius * angle.sin() * 0.75_f64.sqrt(),
        );
        windup = phase_windup(&mut orientation, &leap, t, &rs, &rr, windup).unwrap();
        if let Some(previous) = previous {
            let step: f64 = windup - previous;
            assert!(step.abs() < 0.1, "windup jump {} at epoch {}", step, k);
        }
        previous = Some(windup);
    }

    // sun direction is a unit vector away from earth
    let (sun, moon, _) = sun_moon_ecef(&mut orientation, &leap, t0, &Default::default());
    assert!(sun.norm() > 0.98 * Constants::AU);
    assert!(moon.norm() > 3.5E8 && moon.norm() < 4.1E8);
}
