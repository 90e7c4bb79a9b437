//! Parsing helpers for `supervisorctl status` output.
//!
//! Each line has the shape `<name> <STATE> <description>`, for example:
//!
//! ```text
//! web        RUNNING   pid 4242, uptime 1:23:45
//! worker     STOPPED   not started
//! ghost:     ERROR     (no such process)
//! ```

use crate::state::ProgramState;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use supctl_error::ParseError;

const NO_SUCH_PROCESS: &str = "no such process";

/// One program as reported by a single `status` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub state: ProgramState,
    pub description: String,
    pub pid: Option<u32>,
    pub uptime: Option<String>,
}

impl ProgramInfo {
    pub fn state_code(&self) -> u16 {
        self.state.code()
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }
}

// Absent pid/uptime are written as 0 and "" to keep the JSON shape flat.
impl Serialize for ProgramInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ProgramInfo", 6)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("state", &self.state)?;
        s.serialize_field("state_name", self.state.name())?;
        s.serialize_field("pid", &self.pid.unwrap_or_default())?;
        s.serialize_field("uptime", self.uptime.as_deref().unwrap_or_default())?;
        s.end()
    }
}

/// Text following the first `marker`, up to the next comma, trimmed.
fn marker_value<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let rest = text.split(marker).nth(1)?;
    let value = rest.split_once(',').map_or(rest, |(head, _)| head);
    Some(value.trim())
}

/// Parses one line of `status` output.
///
/// A description mentioning "no such process" always yields
/// [`ProgramState::Unknown`], whatever the state column says. A `pid` marker
/// whose value is not a number leaves `pid` empty rather than failing the
/// line.
pub fn parse_status_line(line: &str) -> Result<ProgramInfo, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::InvalidLine(line.to_string()));
    }

    let name = parts[0].to_string();
    let description = parts[2..].join(" ");

    if description.contains(NO_SUCH_PROCESS) {
        return Ok(ProgramInfo {
            name,
            state: ProgramState::Unknown,
            description: NO_SUCH_PROCESS.to_string(),
            pid: None,
            uptime: None,
        });
    }

    let state = ProgramState::from_name(parts[1])
        .ok_or_else(|| ParseError::UnknownState(parts[1].to_string()))?;

    let mut pid = None;
    let mut uptime = None;
    if description.contains("pid") {
        pid = marker_value(&description, "pid").and_then(|v| v.parse::<u32>().ok());
        uptime = marker_value(&description, "uptime").map(str::to_string);
    }

    Ok(ProgramInfo {
        name,
        state,
        description,
        pid,
        uptime,
    })
}

/// Parses every non-blank line of `status` output, preserving order.
pub fn parse_status_output(output: &str) -> Result<Vec<ProgramInfo>, ParseError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_status_line)
        .collect()
}
