//! HAL trait definitions and implementations.
//!
//! `ProcessOps` is the only seam between the client and the host. `SystemHal`
//! spawns real processes; `FakeHal` records invocations and replays scripted
//! results.

pub mod fake_hal;
pub mod process_ops;
pub mod system_hal;

pub use fake_hal::{FakeHal, FakeResponse, Operation};
pub use process_ops::{combined_output, output_failed, ProcessOps};
pub use system_hal::SystemHal;
