//! supctl core library.
//!
//! A thin client over the `supervisorctl` command-line tool: it builds the
//! argument vector, runs the tool through [`supctl_hal::ProcessOps`] and turns
//! the plain-text `status` report into [`ProgramInfo`] records.
//!
//! ```no_run
//! use supctl_core::{ClientConfig, StatusOptions, SupervisorClient};
//!
//! let client = SupervisorClient::new(ClientConfig::default());
//! for program in client.status(&StatusOptions::all())? {
//!     println!("{} {}", program.name, program.state);
//! }
//! client.restart("web")?;
//! # Ok::<(), supctl_core::CtlError>(())
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod logging;
pub mod state;
pub mod status;

pub use client::{StatusOptions, SupervisorClient, TOLERATED_STATUS_EXIT_CODES};
pub use command::{build_args, ControlAction};
pub use config::{ClientConfig, DEFAULT_PROGRAM};
pub use state::{ProgramState, STATE_TABLE};
pub use status::{parse_status_line, parse_status_output, ProgramInfo};
pub use supctl_error::{Action, CtlError, CtlResult, HalError, ParseError};
