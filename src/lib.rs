#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::too_many_arguments)]

/*
 * RTKCORE is part of the rtk-rs framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * This framework is shipped under the Mozilla Public License V2.
 *
 * Documentation: https://github.com/rtk-rs/rtkcore
 */

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[macro_use]
pub(crate) mod macros;

pub mod atmosphere;
pub mod bits;
pub mod cfg;
pub mod filter;
pub mod geodesy;
pub mod matrix;
pub mod observation;
pub mod time;

mod constants;
mod error;
mod io;

#[cfg(test)]
mod tests;

pub use constants::Constants;
pub use error::Error;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        atmosphere::{AtmosphericDelays, KbModel},
        cfg::{Config, Modeling},
        constants::Constants,
        error::Error,
        filter::{fixed_interval_smoother, kalman_update, SmoothedState},
        geodesy::{
            erp::{ErpRecord, ErpTable, ErpValues},
            geometry::{AzEl, Dop},
            orientation::{EarthOrientation, SharedEarthOrientation},
            pcv::{Pcv, PcvRepository},
            GeodeticPosition,
        },
        matrix::{Matrix, Transpose},
        observation::{
            Carrier, Code, CodePriorities, HatchFilter, LliFlags, Observation, Receiver,
            SatelliteSelection, SnrMask,
        },
        time::{
            leap::{LeapSecond, LeapSeconds, SharedLeapSeconds},
            Instant,
        },
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Epoch, TimeScale};
}
