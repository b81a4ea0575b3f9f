//! Carrier smoothing of pseudo range observations
use std::collections::HashMap;

use bitflags::bitflags;
use gnss::prelude::SV;
use log::{debug, trace};

use crate::{
    geodesy::pcv::NUM_FREQUENCIES,
    observation::{wavelength, Receiver},
};

bitflags! {
    /// Loss of lock indicator attached to a phase observation
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LliFlags: u8 {
        /// Lock lost since previous observation: cycle slip is possible
        const LOCK_LOSS = 0x01;
        /// Half cycle ambiguity
        const HALF_CYCLE_SLIP = 0x02;
        /// Observed under anti spoofing
        const UNDER_ANTI_SPOOFING = 0x04;
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct HatchState {
    /// Smoothed pseudo range (m)
    smoothed: f64,
    /// Previous phase observation (cycles)
    phase: f64,
    /// Epochs accumulated since last reset
    epochs: usize,
}

/// Hatch filter: pseudo ranges are smoothed by the carrier phase variation,
/// with one state per receiver, vehicle and frequency.
#[derive(Debug, Clone)]
pub struct HatchFilter {
    window: usize,
    states: HashMap<(Receiver, SV, usize), HatchState>,
}

impl HatchFilter {
    /// Builds a filter averaging over `window` epochs (at least one).
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            states: HashMap::new(),
        }
    }
    /// Smoothing window (epochs)
    pub fn window(&self) -> usize {
        self.window
    }
    /// Forgets every smoothing state
    pub fn reset(&mut self) {
        self.states.clear();
    }
    /// Smooths `pseudo_range` (m) with `phase` (cycles), both observed by
    /// `receiver` on `sv` at `frequency` index, `wavelength` being the carrier
    /// wavelength (m). Any loss of lock flag restarts the average.
    /// Returns the smoothed pseudo range once `window` epochs have been
    /// accumulated. Null observations are ignored and do not alter the state.
    pub fn smooth(
        &mut self,
        receiver: Receiver,
        sv: SV,
        frequency: usize,
        pseudo_range: f64,
        phase: f64,
        wavelength: f64,
        lli: LliFlags,
    ) -> Option<f64> {
        if pseudo_range == 0.0 || phase == 0.0 {
            return None;
        }
        let n = self.window as f64;
        let state = self.states.entry((receiver, sv, frequency)).or_default();
        if !lli.is_empty() {
            trace!("{} - hatch filter reset on frequency #{}", sv, frequency);
            state.epochs = 0;
        }
        if state.epochs == 0 {
            state.smoothed = pseudo_range;
        } else {
            let dcp = wavelength * (phase - state.phase);
            state.smoothed = pseudo_range / n + (state.smoothed + dcp) * (n - 1.0) / n;
        }
        state.epochs = state.epochs.saturating_add(1);
        state.phase = phase;
        if state.epochs < self.window {
            None
        } else {
            Some(state.smoothed)
        }
    }
}

/// Raw observations of one vehicle at one epoch.
/// Null values stand for missing observations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Observation {
    /// Receiver
    pub receiver: Receiver,
    /// Observed vehicle
    pub sv: SV,
    /// Glonass FDMA frequency channel
    pub glonass_channel: Option<i8>,
    /// Pseudo ranges (m), per frequency index
    pub pseudo_range: [f64; NUM_FREQUENCIES],
    /// Carrier phases (cycles), per frequency index
    pub phase: [f64; NUM_FREQUENCIES],
    /// Loss of lock indicators, per frequency index
    pub lli: [LliFlags; NUM_FREQUENCIES],
}

/// Replaces pseudo ranges of chronologically sorted `observations` by their
/// Hatch filtered value, over `window` epochs. Pseudo ranges are nulled until
/// the window is filled, or when the carrier wavelength is unknown.
pub fn carrier_smoothing(observations: &mut [Observation], window: usize) {
    debug!(
        "carrier smoothing: {} observations, window={}",
        observations.len(),
        window
    );
    let mut filter = HatchFilter::new(window);
    for obs in observations.iter_mut() {
        for j in 0..NUM_FREQUENCIES {
            if obs.pseudo_range[j] == 0.0 || obs.phase[j] == 0.0 {
                continue;
            }
            let Some(lambda) = wavelength(obs.sv, j, obs.glonass_channel) else {
                debug!("{} - unknown wavelength on frequency #{}", obs.sv, j);
                obs.pseudo_range[j] = 0.0;
                continue;
            };
            obs.pseudo_range[j] = filter
                .smooth(
                    obs.receiver,
                    obs.sv,
                    j,
                    obs.pseudo_range[j],
                    obs.phase[j],
                    lambda,
                    obs.lli[j],
                )
                .unwrap_or(0.0);
        }
    }
}
