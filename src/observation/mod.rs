//! Observation codes and measurement conditioning
//!
//! Observation codes and their tracking priorities, continuous satellite
//! numbering and selection, carrier wavelengths, signal strength masking
//! and carrier smoothing of pseudo ranges.
mod carrier;
mod code;
mod satellite;
mod smoothing;
mod snr;

pub use carrier::{wavelength, Carrier};
pub use code::{Code, CodePriorities, FORCED_PRIORITY, MAX_PRIORITY_LENGTH, NUM_CODES};
pub use satellite::{
    is_excluded, parse_satellite_id, satellite_from_number, satellite_id, satellite_number,
    SatelliteSelection, MAX_SATELLITES,
};
pub use smoothing::{carrier_smoothing, HatchFilter, LliFlags, Observation};
pub use snr::{Receiver, SnrMask, NUM_SNR_BINS};
