//! integrated tests
pub mod toolkit;

mod orientation;
mod positioning;
