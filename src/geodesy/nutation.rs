//! IAU 1980 nutation
use std::f64::consts::PI;

use crate::constants::Constants;

/// Delaunay arguments (l, l', F, D, Ω): constant term (deg) and
/// polynomial coefficients (arcsec) in Julian centuries of TT.
const DELAUNAY: [[f64; 5]; 5] = [
    [134.96340251, 1717915923.2178, 31.8792, 0.051635, -0.00024470],
    [357.52910918, 129596581.0481, -0.5532, 0.000136, -0.00001149],
    [93.27209062, 1739527262.8478, -12.7512, -0.001037, 0.00000417],
    [297.85019547, 1602961601.2090, -6.3706, 0.006593, -0.00003169],
    [125.04455501, -6962890.2665, 7.4722, 0.007702, -0.00005939],
];

/// One term of the luni-solar nutation series
#[derive(Debug, Copy, Clone)]
struct NutationTerm {
    /// Delaunay argument multipliers
    multipliers: [i8; 5],
    /// Longitude amplitude (0.1 mas) and its rate (0.1 mas per century)
    psi: (f64, f64),
    /// Obliquity amplitude (0.1 mas) and its rate (0.1 mas per century)
    eps: (f64, f64),
}

impl NutationTerm {
    const fn new(
        multipliers: [i8; 5],
        psi: f64,
        psi_rate: f64,
        eps: f64,
        eps_rate: f64,
    ) -> Self {
        Self {
            multipliers,
            psi: (psi, psi_rate),
            eps: (eps, eps_rate),
        }
    }
}

const IAU1980: [NutationTerm; 106] = [
    NutationTerm::new([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    NutationTerm::new([0, 0, 2, -2, 2], -13187.0, -1.6, 5736.0, -3.1),
    NutationTerm::new([0, 0, 2, 0, 2], -2274.0, -0.2, 977.0, -0.5),
    NutationTerm::new([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    NutationTerm::new([0, -1, 0, 0, 0], -1426.0, 3.4, 54.0, -0.1),
    NutationTerm::new([1, 0, 0, 0, 0], 712.0, 0.1, -7.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 2], -517.0, 1.2, 224.0, -0.6),
    NutationTerm::new([0, 0, 2, 0, 1], -386.0, -0.4, 200.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 2], -301.0, 0.0, 129.0, -0.1),
    NutationTerm::new([0, -1, 2, -2, 2], 217.0, -0.5, -95.0, 0.3),
    NutationTerm::new([-1, 0, 0, 2, 0], 158.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 1], 129.0, 0.1, -70.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 2], 123.0, 0.0, -53.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 1], 63.0, 0.1, -33.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 0], 63.0, 0.0, -2.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 2], -59.0, 0.0, 26.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 1], -58.0, -0.1, 32.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 1], -51.0, 0.0, 27.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 0], -48.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 1], 46.0, 0.0, -24.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 2], -38.0, 0.0, 16.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 2], -31.0, 0.0, 13.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 0], 29.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 2], 29.0, 0.0, -12.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 0], 26.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 0], -22.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 1], 21.0, 0.0, -10.0, 0.0),
    NutationTerm::new([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    NutationTerm::new([0, 2, 2, -2, 2], -16.0, 0.1, 7.0, 0.0),
    NutationTerm::new([-1, 0, 0, 2, 1], 16.0, 0.0, -8.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    NutationTerm::new([1, 0, 0, -2, 1], -13.0, 0.0, 7.0, 0.0),
    NutationTerm::new([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 0], 11.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 1], -10.0, 0.0, 5.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 2], -8.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 2], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 1], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, 1, 0, -2, 0], -7.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 2], 7.0, 0.0, -3.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 2], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 0], 6.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 1], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([0, 0, 0, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, -1, 2, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, -1, 0, 0, 0], 5.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 0, -1, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 0, 1, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, -2, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, 0, 0], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([1, 1, 0, 0, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, -1, 0, -1, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, -1, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([3, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 0], 3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 4, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, 0, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, -2, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 0, 0, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 1], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([3, 0, 0, 0, 0], 2.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 2, 0, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, 2, 1, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 1], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, 1, 0, -2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 0, -4, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, -4, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, 4, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, -1, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 4, 2], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 2, 2, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 4, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 2, -2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([3, 0, 2, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 4, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 1, 0, -2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 1], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, -1, 0, -2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 0, 1, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, -1, 0, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 1, 0], 1.0, 0.0, 0.0, 0.0),
];

/// Fundamental arguments (rad) at `t` Julian centuries of TT since J2000
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let tt = [t, t * t, t * t * t, t * t * t * t];
    DELAUNAY.map(|coefs| {
        let mut f = coefs[0] * 3600.0;
        for j in 0..4 {
            f += coefs[j + 1] * tt[j];
        }
        (f * Constants::AS2R) % (2.0 * PI)
    })
}

/// Nutation in longitude and obliquity (Δψ, Δε) in radians,
/// at `t` Julian centuries of TT since J2000, from the fundamental arguments `f`.
pub fn nutation_iau1980(t: f64, f: &[f64; 5]) -> (f64, f64) {
    let (mut dpsi, mut deps) = (0.0, 0.0);
    for term in IAU1980.iter() {
        let ang = term
            .multipliers
            .iter()
            .zip(f.iter())
            .map(|(m, f)| *m as f64 * f)
            .sum::<f64>();
        dpsi += (term.psi.0 + term.psi.1 * t) * ang.sin();
        deps += (term.eps.0 + term.eps.1 * t) * ang.cos();
    }
    (dpsi * 1E-4 * Constants::AS2R, deps * 1E-4 * Constants::AS2R)
}
