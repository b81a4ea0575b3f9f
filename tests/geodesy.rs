use nalgebra::{Matrix3, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use rtkcore::{
    geodesy::{deg_to_dms, dms_to_deg, geometry::geometric_distance},
    geodetic,
    prelude::*,
};

#[test]
fn ecef_round_trip() {
    let mut rng = StdRng::seed_from_u64(84);
    for _ in 0..10_000 {
        let pos = geodetic!(
            rng.gen_range(-89.0..89.0),
            rng.gen_range(-180.0..180.0),
            rng.gen_range(-500.0..40_000.0)
        );
        let r = pos.to_ecef();
        let back = GeodeticPosition::from_ecef(&r).to_ecef();
        assert!((back - r).norm() < 1.0E-6, "{:?}", pos);
    }
}

#[test]
fn equatorial_radius() {
    let pos = GeodeticPosition::from_ecef(&Vector3::new(6378137.0, 0.0, 0.0));
    assert!(pos.lat.abs() < 1.0E-12);
    assert!(pos.lon.abs() < 1.0E-12);
    assert!(pos.height.abs() < 1.0E-6);
}

#[test]
fn enu_covariance() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let pos = geodetic!(rng.gen_range(-80.0..80.0), rng.gen_range(-180.0..180.0), 0.0);
        let (se, sn, su) = (
            rng.gen_range(0.01..1.0),
            rng.gen_range(0.01..1.0),
            rng.gen_range(0.01..3.0),
        );
        let q = Matrix3::from_diagonal(&Vector3::new(se * se, sn * sn, su * su));
        let p = pos.covariance_to_ecef(&q);
        // rotation preserves the trace and symmetry
        assert!((p.trace() - q.trace()).abs() < 1.0E-12);
        assert!((p - p.transpose()).norm() < 1.0E-12);
        let back = pos.covariance_to_enu(&p);
        assert!((back - q).norm() < 1.0E-12);
    }
}

#[test]
fn sexagesimal_angles() {
    let mut rng = StdRng::seed_from_u64(60);
    for _ in 0..1000 {
        let deg = rng.gen_range(-180.0..180.0);
        let dms = deg_to_dms(deg, 6);
        assert!(dms[1] < 60.0 && dms[2] < 60.0, "{:?}", dms);
        assert!((dms_to_deg(&dms) - deg).abs() < 1.0E-9, "{} {:?}", deg, dms);
    }
}

#[test]
fn satellite_below_surface() {
    let rr = geodetic!(45.0, 5.0, 0.0).to_ecef();
    let rs = Vector3::new(6.0E6, 0.0, 0.0);
    assert!(matches!(
        geometric_distance(&rs, &rr),
        Err(Error::BelowEarthSurface)
    ));
}

#[test]
fn pcv_repository() {
    let g05 = SV::new(Constellation::GPS, 5);
    let mut repo = PcvRepository::default();
    assert!(repo.is_empty());
    repo.push(Pcv {
        sv: Some(g05),
        code: "G050".to_string(),
        ..Default::default()
    });
    repo.push(Pcv {
        antenna: "ASH701945E_M    SNOW".to_string(),
        ..Default::default()
    });
    assert_eq!(repo.len(), 2);
    let t = instant_now();
    assert!(repo.search(Some(g05), "", t).is_some());
    assert!(repo.search(None, "ASH701945E_M SNOW", t).is_some());
    assert!(repo.search(None, "ASH701945E_M NONE", t).is_some());
    assert!(repo.search(None, "AOAD/M_T", t).is_none());
}

fn instant_now() -> Instant {
    Instant::from_gpst_week(2300, 0.0)
}
