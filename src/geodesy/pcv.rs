//! Antenna phase center offsets and variations
use gnss::prelude::SV;
use log::{trace, warn};

use crate::{constants::Constants, geodesy::geometry::AzEl, matrix::dot, time::Instant};

/// Number of frequencies described by a [Pcv]
pub const NUM_FREQUENCIES: usize = 3;

/// Number of variation nodes
pub const NUM_VARIATION_NODES: usize = 19;

/// Phase center description of one antenna
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pcv {
    /// Satellite this antenna is mounted on.
    /// None for receiver antennas.
    pub sv: Option<SV>,
    /// Antenna type, possibly followed by the radome type,
    /// for example "TRM59800.00     SCIS"
    pub antenna: String,
    /// Serial number or satellite code
    pub code: String,
    /// Start of validity, None for ever
    pub valid_from: Option<Instant>,
    /// End of validity, None for ever
    pub valid_until: Option<Instant>,
    /// Phase center offsets, per frequency (m).
    /// Receiver antennas: east, north, up.
    /// Satellite antennas: x, y, z in the body frame.
    pub offsets: [[f64; 3]; NUM_FREQUENCIES],
    /// Phase center variations, per frequency (m).
    /// Receiver antennas: every 5° of zenith angle, from 0 to 90°.
    /// Satellite antennas: every 1° of nadir angle, from 0 to 18°.
    pub variations: [[f64; NUM_VARIATION_NODES]; NUM_FREQUENCIES],
}

/// Linear interpolation of variations sampled every 5°, at `angle` (deg).
/// Values are held constant beyond 90°.
pub fn interpolate_variation(angle: f64, var: &[f64; NUM_VARIATION_NODES]) -> f64 {
    let a = angle / 5.0;
    let i = a as i64;
    if i < 0 {
        return var[0];
    }
    if i >= NUM_VARIATION_NODES as i64 - 1 {
        return var[NUM_VARIATION_NODES - 1];
    }
    let i = i as usize;
    var[i] * (1.0 - a + i as f64) + var[i + 1] * (a - i as f64)
}

impl Pcv {
    /// True if this description applies at `t`.
    pub fn is_valid(&self, t: Instant) -> bool {
        if let Some(start) = self.valid_from {
            if start.diff(&t) > 0.0 {
                return false;
            }
        }
        if let Some(end) = self.valid_until {
            if end.diff(&t) < 0.0 {
                return false;
            }
        }
        true
    }
    /// Receiver antenna range offsets (m), per frequency, toward
    /// a satellite seen at `azel`. `delta` is the antenna reference point
    /// offset (east, north, up, in m). Variations are only applied when
    /// `variations` is set.
    pub fn receiver_antenna_offsets(
        &self,
        delta: &[f64; 3],
        azel: &AzEl,
        variations: bool,
    ) -> [f64; NUM_FREQUENCIES] {
        let (sinel, cosel) = azel.elevation.sin_cos();
        let e = [azel.azimuth.sin() * cosel, azel.azimuth.cos() * cosel, sinel];
        let mut dant = [0.0; NUM_FREQUENCIES];
        for (i, dant) in dant.iter_mut().enumerate() {
            let off = [
                self.offsets[i][0] + delta[0],
                self.offsets[i][1] + delta[1],
                self.offsets[i][2] + delta[2],
            ];
            *dant = -dot(&off, &e);
            if variations {
                *dant += interpolate_variation(
                    90.0 - azel.elevation * Constants::R2D,
                    &self.variations[i],
                );
            }
        }
        trace!(
            "antmodel: azel={:.1} {:.1} dant={:?}",
            azel.azimuth * Constants::R2D,
            azel.elevation * Constants::R2D,
            dant
        );
        dant
    }
    /// Satellite antenna phase center variations (m), per frequency,
    /// at `nadir` angle (rad).
    pub fn satellite_antenna_offsets(&self, nadir: f64) -> [f64; NUM_FREQUENCIES] {
        let mut dant = [0.0; NUM_FREQUENCIES];
        for (i, dant) in dant.iter_mut().enumerate() {
            // 1° grid
            *dant = interpolate_variation(nadir * Constants::R2D * 5.0, &self.variations[i]);
        }
        trace!("antmodel_s: nadir={:.1} dant={:?}", nadir * Constants::R2D, dant);
        dant
    }
}

/// Collection of [Pcv] descriptions
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PcvRepository {
    pcvs: Vec<Pcv>,
}

impl PcvRepository {
    pub fn new(pcvs: Vec<Pcv>) -> Self {
        Self { pcvs }
    }
    pub fn push(&mut self, pcv: Pcv) {
        self.pcvs.push(pcv);
    }
    pub fn len(&self) -> usize {
        self.pcvs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pcvs.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Pcv> {
        self.pcvs.iter()
    }
    /// Searches the antenna of satellite `sv`, valid at `t`.
    pub fn search_satellite(&self, sv: SV, t: Instant) -> Option<&Pcv> {
        self.pcvs
            .iter()
            .find(|pcv| pcv.sv == Some(sv) && pcv.is_valid(t))
    }
    /// Searches receiver `antenna` type. The type is made of the antenna name,
    /// optionally followed by the radome name. An exact match (antenna and radome)
    /// is preferred, then a description of the same antenna with another radome.
    pub fn search_receiver(&self, antenna: &str) -> Option<&Pcv> {
        let types = antenna.split_whitespace().take(2).collect::<Vec<_>>();
        let main = *types.first()?;
        let mut receivers = self.pcvs.iter().filter(|pcv| pcv.sv.is_none());
        if let Some(pcv) = receivers
            .clone()
            .find(|pcv| types.iter().all(|t| pcv.antenna.contains(t)))
        {
            return Some(pcv);
        }
        let pcv = receivers.find(|pcv| pcv.antenna.starts_with(main))?;
        warn!("pcv without radome is used type={}", antenna);
        Some(pcv)
    }
    /// Searches satellite `sv` antenna valid at `t`, or `antenna` receiver
    /// antenna when `sv` is None.
    pub fn search(&self, sv: Option<SV>, antenna: &str, t: Instant) -> Option<&Pcv> {
        match sv {
            Some(sv) => self.search_satellite(sv, t),
            None => self.search_receiver(antenna),
        }
    }
}
