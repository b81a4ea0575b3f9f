//! Elevation dependent signal strength mask
use crate::{constants::Constants, geodesy::pcv::NUM_FREQUENCIES};

/// Number of elevation bins of a [SnrMask], centered on 5°, 15° ... 85°
pub const NUM_SNR_BINS: usize = 9;

/// Receiver the observations come from
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Receiver {
    /// Mobile receiver
    #[default]
    Rover,
    /// Reference station
    Base,
}

/// Minimal C/N0 (dB.Hz) per frequency and elevation bin.
/// Between bin centers, the threshold is interpolated linearly.
/// Below 5° (above 85°) the first (last) bin applies.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnrMask {
    /// Apply this mask to rover observations
    #[cfg_attr(feature = "serde", serde(default))]
    pub rover: bool,
    /// Apply this mask to base station observations
    #[cfg_attr(feature = "serde", serde(default))]
    pub base: bool,
    /// Thresholds (dB.Hz), per frequency index
    #[cfg_attr(feature = "serde", serde(default))]
    pub mask: [[f64; NUM_SNR_BINS]; NUM_FREQUENCIES],
}

impl SnrMask {
    /// Builds a mask applying to both receivers
    pub fn new(mask: [[f64; NUM_SNR_BINS]; NUM_FREQUENCIES]) -> Self {
        Self {
            rover: true,
            base: true,
            mask,
        }
    }
    /// Minimal C/N0 (dB.Hz) at `frequency` index and `elevation` (rad)
    pub fn threshold(&self, frequency: usize, elevation: f64) -> Option<f64> {
        let mask = self.mask.get(frequency)?;
        let a = (elevation * Constants::R2D + 5.0) / 10.0;
        let i = a.floor();
        let a = a - i;
        let threshold = if i < 1.0 {
            mask[0]
        } else if i > (NUM_SNR_BINS - 1) as f64 {
            mask[NUM_SNR_BINS - 1]
        } else {
            let i = i as usize;
            (1.0 - a) * mask[i - 1] + a * mask[i]
        };
        Some(threshold)
    }
    /// Returns true when `snr` (dB.Hz), observed by `receiver`
    /// at `frequency` index and `elevation` (rad), lies below the mask.
    /// Disabled masks and unknown frequencies never mask anything.
    pub fn is_masked(&self, receiver: Receiver, frequency: usize, elevation: f64, snr: f64) -> bool {
        let enabled = match receiver {
            Receiver::Rover => self.rover,
            Receiver::Base => self.base,
        };
        if !enabled {
            return false;
        }
        match self.threshold(frequency, elevation) {
            Some(threshold) => snr < threshold,
            None => false,
        }
    }
}
