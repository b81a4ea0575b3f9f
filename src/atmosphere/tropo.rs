//! Tropospheric delay: Saastamoinen model and Niell mapping functions
use std::f64::consts::PI;

use log::trace;

use crate::{
    constants::Constants,
    geodesy::{geometry::AzEl, GeodeticPosition},
    time::Instant,
};

/// Sea level temperature of the standard atmosphere (°C)
const SEA_LEVEL_TEMPERATURE: f64 = 15.0;

/// Niell hydrostatic (a, b, c) average coefficients
const NMF_HYDRO_AVERAGE: [(f64, [f64; 3]); 5] = [
    (15.0, [1.2769934E-3, 2.9153695E-3, 62.610505E-3]),
    (30.0, [1.2683230E-3, 2.9152299E-3, 62.837393E-3]),
    (45.0, [1.2465397E-3, 2.9288445E-3, 63.721774E-3]),
    (60.0, [1.2196049E-3, 2.9022565E-3, 63.824265E-3]),
    (75.0, [1.2045996E-3, 2.9024912E-3, 64.258455E-3]),
];

/// Niell hydrostatic (a, b, c) seasonal amplitudes
const NMF_HYDRO_AMPLITUDE: [(f64, [f64; 3]); 5] = [
    (15.0, [0.0, 0.0, 0.0]),
    (30.0, [1.2709626E-5, 2.1414979E-5, 9.0128400E-5]),
    (45.0, [2.6523662E-5, 3.0160779E-5, 4.3497037E-5]),
    (60.0, [3.4000452E-5, 7.2562722E-5, 84.795348E-5]),
    (75.0, [4.1202191E-5, 11.723375E-5, 170.37206E-5]),
];

/// Niell wet (a, b, c) coefficients
const NMF_WET: [(f64, [f64; 3]); 5] = [
    (15.0, [5.8021897E-4, 1.4275268E-3, 4.3472961E-2]),
    (30.0, [5.6794847E-4, 1.5138625E-3, 4.6729510E-2]),
    (45.0, [5.8118019E-4, 1.4572752E-3, 4.3908931E-2]),
    (60.0, [5.9727542E-4, 1.5007428E-3, 4.4626982E-2]),
    (75.0, [6.1641693E-4, 1.7599082E-3, 5.4736038E-2]),
];

/// Niell height correction (a, b, c)
const NMF_HEIGHT: [f64; 3] = [2.53E-5, 5.49E-3, 1.14E-3];

/// Linear interpolation over the 15° latitude grid,
/// values being held constant beyond 15° and 75°.
fn interpolate_latitude(lut: &[(f64, [f64; 3]); 5], lat_ddeg: f64) -> [f64; 3] {
    let i = (lat_ddeg / 15.0) as i64;
    if i < 1 {
        return lut[0].1;
    }
    if i > 4 {
        return lut[4].1;
    }
    let i = i as usize;
    let w = lat_ddeg / 15.0 - i as f64;
    let (c0, c1) = (lut[i - 1].1, lut[i].1);
    [
        c0[0] * (1.0 - w) + c1[0] * w,
        c0[1] * (1.0 - w) + c1[1] * w,
        c0[2] * (1.0 - w) + c1[2] * w,
    ]
}

/// Continued fraction mapping function, normalized to unity at zenith.
fn continued_fraction(el: f64, coefs: &[f64; 3]) -> f64 {
    let [a, b, c] = *coefs;
    let sinel = el.sin();
    (1.0 + a / (1.0 + b / (1.0 + c))) / (sinel + (a / (sinel + b / (sinel + c))))
}

/// Slant tropospheric delay (m) from the standard atmosphere and the
/// Saastamoinen model, `humidity` being the relative humidity (0.0 - 1.0).
/// The delay is null for satellites below the horizon
/// and for heights outside [-100, 10000] m.
pub fn saastamoinen(pos: &GeodeticPosition, azel: &AzEl, humidity: f64) -> f64 {
    if pos.height < -100.0 || pos.height > 1.0E4 || azel.elevation <= 0.0 {
        return 0.0;
    }
    // standard atmosphere
    let hgt = pos.height.max(0.0);
    let pres = 1013.25 * (1.0 - 2.2557E-5 * hgt).powf(5.2568);
    let temp = SEA_LEVEL_TEMPERATURE - 6.5E-3 * hgt + 273.16;
    let e = 6.108 * humidity * ((17.15 * temp - 4684.0) / (temp - 38.45)).exp();

    let cosz = (PI / 2.0 - azel.elevation).cos();
    let trph =
        0.0022768 * pres / (1.0 - 0.00266 * (2.0 * pos.lat).cos() - 0.00028 * hgt / 1.0E3) / cosz;
    let trpw = 0.002277 * (1255.0 / temp + 0.05) * e / cosz;
    trph + trpw
}

/// Niell (hydrostatic, wet) mapping functions at `t`.
/// Both are null for satellites below the horizon.
pub fn niell(t: Instant, pos: &GeodeticPosition, azel: &AzEl) -> (f64, f64) {
    let el = azel.elevation;
    if el <= 0.0 {
        return (0.0, 0.0);
    }
    let lat = pos.lat * Constants::R2D;

    // phase, from day of year 28, shifted by half a year in the south
    let y = (t.day_of_year() - 28.0) / 365.25 + if lat < 0.0 { 0.5 } else { 0.0 };
    let cosy = (2.0 * PI * y).cos();
    let lat = lat.abs();

    let avg = interpolate_latitude(&NMF_HYDRO_AVERAGE, lat);
    let amp = interpolate_latitude(&NMF_HYDRO_AMPLITUDE, lat);
    let ah = [
        avg[0] - amp[0] * cosy,
        avg[1] - amp[1] * cosy,
        avg[2] - amp[2] * cosy,
    ];
    let aw = interpolate_latitude(&NMF_WET, lat);

    // ellipsoidal height, rather than height above sea level
    let dm = (1.0 / el.sin() - continued_fraction(el, &NMF_HEIGHT)) * pos.height / 1.0E3;
    (
        continued_fraction(el, &ah) + dm,
        continued_fraction(el, &aw),
    )
}

/// Tropospheric (hydrostatic, wet) mapping functions at `t`.
/// Both are null for heights outside [-1000, 20000] m.
pub fn troposphere_mapping(t: Instant, pos: &GeodeticPosition, azel: &AzEl) -> (f64, f64) {
    trace!(
        "tropmapf: pos={:.6} {:.6} {:.1} azel={:.1} {:.1}",
        pos.lat * Constants::R2D,
        pos.lon * Constants::R2D,
        pos.height,
        azel.azimuth * Constants::R2D,
        azel.elevation * Constants::R2D
    );
    if pos.height < -1.0E3 || pos.height > 2.0E4 {
        return (0.0, 0.0);
    }
    niell(t, pos, azel)
}
