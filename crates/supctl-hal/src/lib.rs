//! supctl process execution layer.
//!
//! External commands are "world-touching" and go through this crate so that
//! the client logic above it can be tested against `FakeHal`.

pub mod hal;

pub use hal::{FakeHal, FakeResponse, Operation, ProcessOps, SystemHal};
pub use supctl_error::{HalError, HalResult};
