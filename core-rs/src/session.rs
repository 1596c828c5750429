//! Line-oriented command session over a single tracker
//!
//! Each input line holds one command:
//!
//! ```text
//! park ABC123 pass     # assign lowest empty slot, with parking pass
//! park DEF456          # assign lowest empty slot, no pass
//! leave 1              # release by slot number
//! leave DEF456         # release by license
//! reset                # empty every slot
//! status               # occupancy report
//! passholders          # licenses of parked pass-holders
//! ```

use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::errors::{Result, TrackerError};
use crate::tracker::{OccupancyReport, SlotRef, SlotTracker};
use crate::vehicle::Vehicle;

/// A parsed session command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Park { license: String, has_pass: bool },
    Leave(SlotRef),
    Reset,
    Status,
    Passholders,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let mut tokens = line.split_whitespace();
        let verb = match tokens.next() {
            Some(verb) => verb,
            None => return Ok(None),
        };
        let args: Vec<&str> = tokens.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("park", [license]) => Command::Park {
                license: license.to_string(),
                has_pass: false,
            },
            ("park", [license, flag]) if flag.eq_ignore_ascii_case("pass") => Command::Park {
                license: license.to_string(),
                has_pass: true,
            },
            ("park", _) => {
                return Err(TrackerError::InvalidCommand(format!(
                    "usage: park <license> [pass], got '{}'",
                    line.trim()
                )))
            }
            ("leave", [target]) => Command::Leave(parse_target(target)),
            ("leave", _) => {
                return Err(TrackerError::InvalidCommand(format!(
                    "usage: leave <slot|license>, got '{}'",
                    line.trim()
                )))
            }
            ("reset", []) => Command::Reset,
            ("status", []) => Command::Status,
            ("passholders", []) => Command::Passholders,
            ("reset" | "status" | "passholders", _) => {
                return Err(TrackerError::InvalidCommand(format!(
                    "'{}' takes no arguments",
                    verb
                )))
            }
            _ => return Err(TrackerError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

/// Numeric tokens are slot numbers, anything else is a license.
///
/// Numbers beyond `i64` saturate so they still fail the slot range check.
fn parse_target(token: &str) -> SlotRef {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return SlotRef::License(token.to_string());
    }
    match token.parse::<i64>() {
        Ok(slot) => SlotRef::Number(slot),
        Err(_) if token.starts_with('-') => SlotRef::Number(i64::MIN),
        Err(_) => SlotRef::Number(i64::MAX),
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Outcome {
    Parked { slot: usize, license: String },
    Left { slot: usize, license: String },
    Reset { capacity: usize },
    Status(OccupancyReport),
    Passholders { licenses: Vec<String> },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Parked { slot, license } => write!(f, "parked {} in slot {}", license, slot),
            Outcome::Left { slot, license } => write!(f, "{} left slot {}", license, slot),
            Outcome::Reset { capacity } => write!(f, "reset {} slots", capacity),
            Outcome::Status(report) => write!(
                f,
                "{}: {}/{} available, {} passholders ({:.1}%)",
                report.address,
                report.available,
                report.capacity,
                report.passholders.len(),
                report.passholder_percentage
            ),
            Outcome::Passholders { licenses } if licenses.is_empty() => {
                write!(f, "no passholders parked")
            }
            Outcome::Passholders { licenses } => write!(f, "passholders: {}", licenses.join(", ")),
        }
    }
}

/// Output format (text, json)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(TrackerError::ValidationError(format!(
                "Unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}

/// Counts of commands run by [`Session::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Owns a tracker and applies commands to it
pub struct Session {
    tracker: SlotTracker,
    format: OutputFormat,
}

impl Session {
    pub fn new(tracker: SlotTracker, format: OutputFormat) -> Self {
        Session { tracker, format }
    }

    pub fn tracker(&self) -> &SlotTracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> SlotTracker {
        self.tracker
    }

    /// Apply a single command to the tracker
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "executing command");
        let outcome = match command {
            Command::Park { license, has_pass } => {
                let slot = self.tracker.add_vehicle(Vehicle::new(license.clone(), has_pass))?;
                Outcome::Parked { slot, license }
            }
            Command::Leave(target) => {
                let released = self.tracker.remove_vehicle(target)?;
                Outcome::Left {
                    slot: released.slot,
                    license: released.vehicle.license().to_string(),
                }
            }
            Command::Reset => {
                self.tracker.generate_slots();
                Outcome::Reset {
                    capacity: self.tracker.capacity(),
                }
            }
            Command::Status => Outcome::Status(self.tracker.report()),
            Command::Passholders => Outcome::Passholders {
                licenses: self
                    .tracker
                    .parked_passholders()
                    .into_iter()
                    .map(|vehicle| vehicle.license().to_string())
                    .collect(),
            },
        };
        Ok(outcome)
    }

    /// Parse and apply one line; `Ok(None)` for blank lines and comments
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Run every line of `input`, writing one result per command to `output`
    ///
    /// Failing lines are reported and skipped; only I/O errors abort the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            match self.execute_line(&line) {
                Ok(None) => {}
                Ok(Some(outcome)) => {
                    summary.executed += 1;
                    self.write_outcome(&mut output, &outcome)?;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(line = line_no, error = %e, "command rejected");
                    self.write_error(&mut output, line_no, &e)?;
                }
            }
        }

        output.flush()?;
        Ok(summary)
    }

    fn write_outcome<W: Write>(&self, output: &mut W, outcome: &Outcome) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(output, "{}", outcome)?,
            OutputFormat::Json => writeln!(output, "{}", serde_json::to_string(outcome)?)?,
        }
        Ok(())
    }

    fn write_error<W: Write>(&self, output: &mut W, line_no: usize, err: &TrackerError) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(output, "line {}: error: {}", line_no, err)?,
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "event": "error",
                    "line": line_no,
                    "error": err.to_string(),
                });
                writeln!(output, "{}", value)?
            }
        }
        Ok(())
    }
}
