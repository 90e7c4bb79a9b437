//! Program run states reported by supervisorctl.

use serde::{Serialize, Serializer};
use std::fmt;

/// Run state of a managed program.
///
/// Keep the variant order in sync with `STATE_TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramState {
    Stopped,
    Starting,
    Running,
    Backoff,
    Stopping,
    Exited,
    Fatal,
    Unknown,
}

/// Fixed `(state, name, code)` pairing, as supervisord defines it.
pub const STATE_TABLE: &[(ProgramState, &str, u16)] = &[
    (ProgramState::Stopped, "STOPPED", 0),
    (ProgramState::Starting, "STARTING", 10),
    (ProgramState::Running, "RUNNING", 20),
    (ProgramState::Backoff, "BACKOFF", 30),
    (ProgramState::Stopping, "STOPPING", 40),
    (ProgramState::Exited, "EXITED", 100),
    (ProgramState::Fatal, "FATAL", 200),
    (ProgramState::Unknown, "UNKNOWN", 1000),
];

impl ProgramState {
    /// Looks up a state token exactly as printed (`"RUNNING"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        STATE_TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(state, _, _)| *state)
    }

    pub fn from_code(code: u16) -> Option<Self> {
        STATE_TABLE
            .iter()
            .find(|(_, _, c)| *c == code)
            .map(|(state, _, _)| *state)
    }

    fn entry(self) -> &'static (ProgramState, &'static str, u16) {
        // Variants are declared in table order.
        &STATE_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn code(self) -> u16 {
        self.entry().2
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ProgramState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pairs_names_with_codes() {
        let pairs: Vec<(&str, u16)> = STATE_TABLE
            .iter()
            .map(|(state, _, _)| (state.name(), state.code()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("STOPPED", 0),
                ("STARTING", 10),
                ("RUNNING", 20),
                ("BACKOFF", 30),
                ("STOPPING", 40),
                ("EXITED", 100),
                ("FATAL", 200),
                ("UNKNOWN", 1000),
            ]
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(ProgramState::from_name("RUNNING"), Some(ProgramState::Running));
        assert_eq!(ProgramState::from_name("running"), None);
        assert_eq!(ProgramState::from_name("WEIRD"), None);
        assert_eq!(ProgramState::from_code(200), Some(ProgramState::Fatal));
        assert_eq!(ProgramState::from_code(5), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ProgramState::Backoff.to_string(), "BACKOFF");
    }
}
