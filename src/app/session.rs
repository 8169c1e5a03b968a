use crate::core::engine::SelectionEngine;
use crate::domain::model::{BlockReason, CourseId};
use crate::utils::error::{PickerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add(CourseId),
    Drop(CourseId),
    /// Choose without validation, as a stale client would.
    Force(CourseId),
    Limit(usize),
    Clear,
    Show,
    Summary,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| command_error("empty command"))?
            .to_ascii_lowercase();
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(command_error(format!("too many arguments in '{}'", line.trim())));
        }

        let command = match verb.as_str() {
            "add" | "choose" => Command::Add(course_argument(&verb, argument)?),
            "drop" | "remove" => Command::Drop(course_argument(&verb, argument)?),
            "force" => Command::Force(course_argument(&verb, argument)?),
            "limit" => {
                let raw = argument.ok_or_else(|| command_error("limit needs a number"))?;
                let value: usize = raw
                    .parse()
                    .map_err(|_| command_error(format!("'{}' is not a valid limit", raw)))?;
                if value == 0 {
                    return Err(command_error("limit must be at least 1"));
                }
                Command::Limit(value)
            }
            "clear" => Command::Clear,
            "show" | "list" => Command::Show,
            "summary" => Command::Summary,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(command_error(format!("unknown command '{}'", other))),
        };

        if argument.is_some() && !command.takes_argument() {
            return Err(command_error(format!("'{}' takes no argument", verb)));
        }
        Ok(command)
    }

    fn takes_argument(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Drop(_) | Command::Force(_) | Command::Limit(_)
        )
    }
}

fn command_error(message: impl Into<String>) -> PickerError {
    PickerError::CommandError {
        message: message.into(),
    }
}

fn course_argument(verb: &str, argument: Option<&str>) -> Result<CourseId> {
    let raw = argument.ok_or_else(|| command_error(format!("{} needs a course code", verb)))?;
    CourseId::parse_code(raw)
        .ok_or_else(|| command_error(format!("'{}' is not a course code", raw)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Rejected { id: CourseId, reason: BlockReason },
    Ignored { id: CourseId },
    Render,
    Summary,
    Help,
    Quit,
}

/// One user's picking session. Rejected selections are reported, never fatal.
#[derive(Debug, Clone)]
pub struct Session {
    engine: SelectionEngine,
}

impl Session {
    pub fn new(engine: SelectionEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        tracing::debug!("Applying {:?}", command);
        match command {
            Command::Add(id) => self.choose(id),
            Command::Drop(id) => {
                if !self.engine.catalog().contains(id) {
                    return Outcome::Ignored { id };
                }
                match self.engine.set_chosen(id, false) {
                    Ok(()) => Outcome::Updated,
                    Err(e) => self.swallow(id, e),
                }
            }
            Command::Force(id) => {
                if !self.engine.catalog().contains(id) {
                    return Outcome::Ignored { id };
                }
                tracing::warn!("Forcing course {} into the selection", id);
                self.engine.force_chosen(id);
                Outcome::Updated
            }
            Command::Limit(max) => {
                self.engine.set_max_selectable(max);
                Outcome::Updated
            }
            Command::Clear => {
                self.engine.clear();
                Outcome::Updated
            }
            Command::Show => Outcome::Render,
            Command::Summary => Outcome::Summary,
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        }
    }

    fn choose(&mut self, id: CourseId) -> Outcome {
        if !self.engine.catalog().contains(id) {
            tracing::warn!("Course {} is not in the catalog", id);
            return Outcome::Ignored { id };
        }
        match self.engine.set_chosen(id, true) {
            Ok(()) => Outcome::Updated,
            Err(e) => self.swallow(id, e),
        }
    }

    fn swallow(&self, id: CourseId, error: PickerError) -> Outcome {
        match error {
            PickerError::BlockedSelection { id, reason } => {
                tracing::warn!("Selection of course {} rejected: {}", id, reason);
                Outcome::Rejected { id, reason }
            }
            other => {
                tracing::error!("Unexpected error for course {}: {}", id, other);
                Outcome::Ignored { id }
            }
        }
    }
}
