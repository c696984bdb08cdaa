// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text command scripts.
//!
//! One command per line:
//!
//! ```text
//! place 2,2        # put a goat on (2,2)
//! select 0,0       # pick up the piece on (0,0)
//! drop 1,1         # finish the pending move on (1,1)
//! move 0,0 1,1     # select and drop in one go
//! reset
//! ```

use anyhow::{anyhow, bail, Context, Result};
use baagchal_core::Position;
use serde::Serialize;

/// A single scripted command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    Place { at: Position },
    Select { at: Position },
    Drop { at: Position },
    Move { from: Position, to: Position },
    Reset,
}

/// A command with the 1-based line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text).with_context(|| format!("line {}: {:?}", idx + 1, raw))?;
        lines.push(ScriptLine {
            line: idx + 1,
            command,
        });
    }
    Ok(lines)
}

/// Parse one command such as `move 0,0 1,1`
pub fn parse_command(text: &str) -> Result<Command> {
    let mut words = text.split_whitespace();
    let verb = words.next().ok_or_else(|| anyhow!("empty command"))?;
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("place", [at]) => Command::Place { at: parse_position(at)? },
        ("select", [at]) => Command::Select { at: parse_position(at)? },
        ("drop", [at]) => Command::Drop { at: parse_position(at)? },
        ("move", [from, to]) => Command::Move {
            from: parse_position(from)?,
            to: parse_position(to)?,
        },
        ("reset", []) => Command::Reset,
        ("place" | "select" | "drop" | "move" | "reset", _) => {
            bail!("wrong number of arguments for '{}'", verb)
        }
        _ => bail!("unknown command '{}'", verb),
    };
    Ok(command)
}

/// Parse `row,col`. Range is checked by the engine, not here.
pub fn parse_position(text: &str) -> Result<Position> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("expected row,col but got '{}'", text))?;
    let row = row
        .trim()
        .parse::<u8>()
        .with_context(|| format!("bad row in '{}'", text))?;
    let col = col
        .trim()
        .parse::<u8>()
        .with_context(|| format!("bad column in '{}'", text))?;
    Ok(Position::new(row, col))
}
