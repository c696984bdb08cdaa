// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless driver for the Baag-Chal engine.
//!
//! Replays command scripts against a [`Session`] and reports the result of
//! every command, so games can be exercised without any user interface.

pub mod script;

use anyhow::{bail, Result};
use baagchal_core::{GameError, Player, Position, Report, Session};
use script::{Command, ScriptLine};
use serde::Serialize;

/// Result of one scripted command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub line: usize,
    #[serde(flatten)]
    pub command: Command,
    /// Side that performed the applied action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Entry {
    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Apply one command to the session
pub fn apply(session: &mut Session, command: Command) -> Result<Entry, GameError> {
    let mut entry = Entry {
        line: 0,
        command,
        player: None,
        report: None,
        selected: None,
        error: None,
    };
    match command {
        Command::Place { at } => entry.report = Some(session.place_goat(at)?),
        Command::Select { at } => entry.selected = Some(session.select_piece(at)?),
        Command::Drop { at } => entry.report = Some(session.complete_selected(at)?),
        Command::Move { from, to } => entry.report = Some(session.complete_move(from, to)?),
        Command::Reset => session.reset(),
    }
    entry.player = entry.report.map(|report| report.action.player());
    Ok(entry)
}

/// Run parsed commands in order.
///
/// Rejected commands are recorded and play continues, unless `strict` is
/// set, in which case the first rejection aborts the run.
pub fn run_script(session: &mut Session, lines: &[ScriptLine], strict: bool) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(lines.len());
    for script_line in lines {
        let entry = match apply(session, script_line.command) {
            Ok(entry) => Entry {
                line: script_line.line,
                ..entry
            },
            Err(err) => {
                tracing::debug!("line {}: rejected: {}", script_line.line, err);
                if strict {
                    bail!("line {}: {}", script_line.line, err);
                }
                Entry {
                    line: script_line.line,
                    command: script_line.command,
                    player: None,
                    report: None,
                    selected: None,
                    error: Some(err.to_string()),
                }
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}
