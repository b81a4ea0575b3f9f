//! ECI to ECEF transformation (IAU 1976 precession, IAU 1980 nutation)
use std::sync::Arc;

use log::trace;
use nalgebra::Matrix3;
use parking_lot::RwLock;

use crate::{
    constants::Constants,
    geodesy::{
        erp::ErpValues,
        nutation::{fundamental_arguments, nutation_iau1980},
        rot_x, rot_y, rot_z,
    },
    time::{
        leap::{LeapSeconds, SharedLeapSeconds},
        Instant, J2000,
    },
};

/// Cached rotation is reused within this time span (s)
const CACHE_TOLERANCE: f64 = 0.01;

/// TT - GPST (s)
const TT_GPST: f64 = 19.0 + 32.184;

/// Computes the ECI to ECEF rotation matrix and the Greenwich mean sidereal
/// time (rad), at `t_utc`, `t_gpst` being the same instant expressed in GPST.
/// This is never cached: prefer [EarthOrientation] in processing loops.
pub fn celestial_to_terrestrial(
    t_utc: Instant,
    t_gpst: Instant,
    erp: &ErpValues,
) -> (Matrix3<f64>, f64) {
    // julian centuries of terrestrial time
    let t = (t_gpst.diff(&Instant::from_calendar(J2000)) + TT_GPST) / 86400.0 / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;

    let f = fundamental_arguments(t);

    // precession
    let ze = (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * Constants::AS2R;
    let th = (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * Constants::AS2R;
    let z = (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * Constants::AS2R;
    let eps = (84381.448 - 46.8150 * t - 0.00059 * t2 + 0.001813 * t3) * Constants::AS2R;
    let p = rot_z(-z) * rot_y(th) * rot_z(-ze);

    // nutation
    let (dpsi, deps) = nutation_iau1980(t, &f);
    let n = rot_x(-eps - deps) * rot_z(-dpsi) * rot_x(eps);

    // apparent sidereal time
    let gmst = t_utc.gmst(erp.ut1_utc);
    let gast = gmst
        + dpsi * eps.cos()
        + (0.00264 * f[4].sin() + 0.000063 * (2.0 * f[4]).sin()) * Constants::AS2R;

    // polar motion
    let w = rot_y(-erp.xp) * rot_x(-erp.yp);
    let u = w * rot_z(gast) * n * p;

    trace!("eci2ecef: t={} gmst={:.12} gast={:.12}", t_utc, gmst, gast);
    (u, gmst)
}

#[derive(Debug, Copy, Clone)]
struct CachedRotation {
    t_utc: Instant,
    erp: ErpValues,
    rotation: Matrix3<f64>,
    gmst: f64,
}

/// ECI to ECEF transformation, with a single slot cache.
/// The last rotation is reused when the following request is issued
/// within 10 ms with identical Earth rotation parameters.
#[derive(Debug, Default, Clone)]
pub struct EarthOrientation {
    cache: Option<CachedRotation>,
}

impl EarthOrientation {
    pub fn new() -> Self {
        Self::default()
    }
    fn lookup(&self, t_utc: Instant, erp: &ErpValues) -> Option<(Matrix3<f64>, f64)> {
        let cached = self.cache.as_ref()?;
        if t_utc.diff(&cached.t_utc).abs() < CACHE_TOLERANCE && cached.erp == *erp {
            trace!("eci2ecef: t={} (cached)", t_utc);
            Some((cached.rotation, cached.gmst))
        } else {
            None
        }
    }
    fn update(&mut self, t_utc: Instant, t_gpst: Instant, erp: &ErpValues) -> (Matrix3<f64>, f64) {
        let (rotation, gmst) = celestial_to_terrestrial(t_utc, t_gpst, erp);
        self.cache = Some(CachedRotation {
            t_utc,
            erp: *erp,
            rotation,
            gmst,
        });
        (rotation, gmst)
    }
    /// Returns the ECI to ECEF rotation matrix and the Greenwich mean
    /// sidereal time (rad) at `t_utc`. `leap` converts UTC to terrestrial time.
    pub fn eci_to_ecef(
        &mut self,
        leap: &LeapSeconds,
        t_utc: Instant,
        erp: &ErpValues,
    ) -> (Matrix3<f64>, f64) {
        if let Some(cached) = self.lookup(t_utc, erp) {
            return cached;
        }
        self.update(t_utc, leap.utc_to_gpst(t_utc), erp)
    }
    /// Drops the cached rotation.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

/// [EarthOrientation] that may be shared between threads
#[derive(Debug, Default, Clone)]
pub struct SharedEarthOrientation(Arc<RwLock<EarthOrientation>>);

impl SharedEarthOrientation {
    pub fn new() -> Self {
        Self::default()
    }
    /// Thread safe [EarthOrientation::eci_to_ecef].
    /// Cache verification and update happen under the same write lock.
    pub fn eci_to_ecef(
        &self,
        leap: &SharedLeapSeconds,
        t_utc: Instant,
        erp: &ErpValues,
    ) -> (Matrix3<f64>, f64) {
        if let Some(cached) = self.0.read().lookup(t_utc, erp) {
            return cached;
        }
        let t_gpst = leap.utc_to_gpst(t_utc);
        let mut orientation = self.0.write();
        if let Some(cached) = orientation.lookup(t_utc, erp) {
            return cached;
        }
        orientation.update(t_utc, t_gpst, erp)
    }
    pub fn invalidate(&self) {
        self.0.write().invalidate();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn rotation_matrix() {
        let leap = LeapSeconds::default();
        let t = instant!(2020, 3, 20, 12, 0, 0);
        let mut eo = EarthOrientation::new();
        let (u, gmst) = eo.eci_to_ecef(&leap, t, &ErpValues::default());
        assert!((u * u.transpose() - Matrix3::identity()).norm() < 1E-12);
        assert!((u.determinant() - 1.0).abs() < 1E-12);
        assert_eq!(gmst, t.gmst(0.0));
        // earth rotation dominates, precession accumulated since J2000 is about 1000"
        let residual = (u - rot_z(gmst)).norm();
        assert!(residual < 2.0E-2, "residual {}", residual);
        assert!(residual > 1.0E-3, "residual {}", residual);
    }
    #[test]
    fn polar_motion() {
        let leap = LeapSeconds::default();
        let t = instant!(2021, 8, 1, 6, 30, 0);
        let erp = ErpValues {
            xp: 0.2 * Constants::AS2R,
            yp: 0.35 * Constants::AS2R,
            ut1_utc: -0.15,
            lod: 0.0,
        };
        let (u0, _) = celestial_to_terrestrial(t, leap.utc_to_gpst(t), &ErpValues {
            ut1_utc: erp.ut1_utc,
            ..Default::default()
        });
        let (u, gmst) = celestial_to_terrestrial(t, leap.utc_to_gpst(t), &erp);
        assert!((u - rot_y(-erp.xp) * rot_x(-erp.yp) * u0).norm() < 1E-12);
        assert_eq!(gmst, t.gmst(-0.15));
    }
    #[test]
    fn cache() {
        let leap = LeapSeconds::default();
        let t = instant!(2019, 1, 1, 0, 0, 0);
        let erp = ErpValues::default();
        let mut eo = EarthOrientation::new();
        let (u0, _) = eo.eci_to_ecef(&leap, t, &erp);
        // within tolerance: the cached rotation is returned as is
        let (u1, _) = eo.eci_to_ecef(&leap, t + 0.005, &erp);
        assert_eq!(u0, u1);
        // beyond tolerance: earth rotated
        let (u2, _) = eo.eci_to_ecef(&leap, t + 1.0, &erp);
        assert_ne!(u0, u2);
        // different parameters invalidate the slot
        let erp = ErpValues {
            xp: 1.0E-6,
            ..Default::default()
        };
        let (u3, _) = eo.eci_to_ecef(&leap, t + 1.0, &erp);
        assert_ne!(u2, u3);
        let (u4, _) = celestial_to_terrestrial(t + 1.0, leap.utc_to_gpst(t + 1.0), &erp);
        assert_eq!(u3, u4);
    }
    #[test]
    fn shared_cache() {
        let leap = SharedLeapSeconds::default();
        let eo = SharedEarthOrientation::new();
        let t = instant!(2022, 2, 2, 2, 2, 2);
        let erp = ErpValues::default();
        let handles = (0..4)
            .map(|i| {
                let (eo, leap) = (eo.clone(), leap.clone());
                std::thread::spawn(move || eo.eci_to_ecef(&leap, t + i as f64 * 0.001, &erp))
            })
            .collect::<Vec<_>>();
        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        // all requests fall within the same cache slot
        for (u, gmst) in results.iter() {
            assert_eq!(*u, results[0].0);
            assert_eq!(*gmst, results[0].1);
        }
    }
}
