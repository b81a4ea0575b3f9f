use nalgebra::Vector3;

use crate::{
    atmosphere::{slant_delays, KbModel},
    cfg::Config,
    geodesy::{
        geometry::{geometric_distance, AzEl, Dop},
        GeodeticPosition,
    },
    matrix::Matrix,
    tests::toolkit::{assert_vector_eq, open_sky, sky},
};

/// Pseudo range model: geometry, receiver clock and atmosphere
fn model(
    cfg: &Config,
    rs: &Vector3<f64>,
    rr: &Vector3<f64>,
    clock: f64,
) -> (f64, Vector3<f64>, AzEl) {
    let t = instant!(2021, 3, 1, 12, 0, 0);
    let (r, e) = geometric_distance(rs, rr).unwrap();
    let pos = GeodeticPosition::from_ecef(rr);
    let azel = AzEl::from_line_of_sight(&pos, &e);
    let delays = slant_delays(cfg, &KbModel::FALLBACK, t, &pos, &azel);
    (r + clock + delays.total(), e, azel)
}

#[test]
fn single_point_positioning() {
    let cfg = Config::default();
    let truth = geodetic!(43.6, 1.4, 150.0);
    let rr = truth.to_ecef();
    let clock = 1234.5;
    let sats = sky(&truth, &open_sky());
    let pr = sats
        .iter()
        .map(|rs| model(&cfg, rs, &rr, clock).0)
        .collect::<Vec<_>>();

    let mut x = rr + Vector3::new(3.0E3, -2.0E3, 4.0E3);
    let mut dtr = 0.0;
    let mut covariance = None;
    for _ in 0..10 {
        let mut a = Matrix::zeros(4, sats.len()).unwrap();
        let mut y = Vec::with_capacity(sats.len());
        for (j, rs) in sats.iter().enumerate() {
            let (modeled, e, _) = model(&cfg, rs, &x, dtr);
            for i in 0..3 {
                a[(i, j)] = -e[i];
            }
            a[(3, j)] = 1.0;
            y.push(pr[j] - modeled);
        }
        let (dx, cov) = Matrix::least_squares(&a, &y).unwrap();
        x += Vector3::new(dx[0], dx[1], dx[2]);
        dtr += dx[3];
        covariance = Some(cov);
    }
    assert_vector_eq(&x, &rr, 1.0E-4);
    assert!((dtr - clock).abs() < 1.0E-4, "clock {}", dtr);

    // the solution covariance holds the dilution of precision
    let q = covariance.unwrap();
    let dop = Dop::new(&open_sky(), cfg.elevation_mask());
    let gdop = (0..4).map(|i| q[(i, i)]).sum::<f64>().sqrt();
    let pdop = (0..3).map(|i| q[(i, i)]).sum::<f64>().sqrt();
    assert!((gdop - dop.gdop).abs() < 1.0E-6, "{} {}", gdop, dop.gdop);
    assert!((pdop - dop.pdop).abs() < 1.0E-6, "{} {}", pdop, dop.pdop);
}

#[test]
fn line_of_sight_angles() {
    let truth = geodetic!(-33.9, 18.4, 10.0);
    let rr = truth.to_ecef();
    let angles = open_sky();
    for (rs, expected) in sky(&truth, &angles).iter().zip(angles.iter()) {
        let (_, e) = geometric_distance(rs, &rr).unwrap();
        let azel = AzEl::from_line_of_sight(&truth, &e);
        // azimuth may wrap around north
        let daz = (azel.azimuth - expected.azimuth).sin();
        assert!(daz.abs() < 1.0E-9);
        assert!((azel.elevation - expected.elevation).abs() < 1.0E-9);
    }
}

#[test]
fn masked_geometry() {
    // raising the mask above most satellites leaves too few of them
    let dop = Dop::new(&open_sky(), 45.0_f64.to_radians());
    assert_eq!(dop, Dop::default());
    let cfg = Config::default();
    let dop = Dop::new(&open_sky(), cfg.elevation_mask());
    assert!(dop.gdop > dop.pdop && dop.pdop > dop.hdop);
}
