//! State estimation: Kalman measurement update and fixed interval smoothing
mod kalman;
mod smoother;

pub use kalman::kalman_update;
pub use smoother::{fixed_interval_smoother, SmoothedState};
