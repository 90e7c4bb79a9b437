//! Rendering of status reports.

use anyhow::{Context, Result};
use supctl_core::ProgramInfo;

/// Aligned `NAME STATE PID UPTIME DESCRIPTION` table.
pub fn render_table(programs: &[ProgramInfo]) -> String {
    let name_width = programs
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!(
        "{:<name_width$}  {:<8}  {:>7}  {:<10}  {}\n",
        "NAME", "STATE", "PID", "UPTIME", "DESCRIPTION"
    );
    for p in programs {
        let pid = p.pid.map(|pid| pid.to_string()).unwrap_or_else(|| "-".to_string());
        let uptime = p.uptime.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>7}  {:<10}  {}\n",
            p.name,
            p.state.name(),
            pid,
            uptime,
            p.description
        ));
    }
    out
}

pub fn render_json(programs: &[ProgramInfo]) -> Result<String> {
    serde_json::to_string_pretty(programs).context("failed to encode status as JSON")
}
