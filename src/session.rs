//! Line-oriented session that drives a [`FilterModel`] the way UI events do
//!
//! Rows are addressed by their 1-based display position.

use crate::filter::{FilterError, FilterModel, FilterValue, Operator, RowId};
use crate::view::{ModelView, rows_table};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  add                    append an empty row
  remove <n>             remove row n (the last remaining row is kept)
  field <n> <name>       select a field for row n
  op <n> <op>            select an operator for row n
  value <n> [text]       type a value into row n
  toggle <n>             flip the checkbox of a boolean row
  show                   list rows
  filter                 print the OData filter
  clear                  start over with a single empty row
  help                   show this help
  quit                   leave the session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown command: '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid row number: '{0}'")]
    InvalidRowNumber(String),

    #[error("Row {0} is not a boolean field")]
    NotToggleable(usize),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove(usize),
    Field(usize, String),
    Op(usize, Operator),
    Value(usize, String),
    Toggle(usize),
    Show,
    Filter,
    Clear,
    Help,
    Quit,
}

fn row_number(arg: Option<&str>, command: &'static str) -> Result<usize, SessionError> {
    let arg = arg.ok_or(SessionError::MissingArgument {
        command,
        expected: "a row number",
    })?;
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SessionError::InvalidRowNumber(arg.to_string())),
    }
}

/// Split off the first whitespace-delimited word. The remainder starts right
/// after the single separator character and is otherwise untouched.
fn split_word(s: &str) -> (&str, &str) {
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, sep)) => (&s[..idx], &s[idx + sep.len_utf8()..]),
        None => (s, ""),
    }
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line.trim_start());
        let (first, tail) = split_word(rest.trim_start());
        let first = Some(first).filter(|a| !a.is_empty());

        match word.to_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "remove" | "rm" => Ok(Command::Remove(row_number(first, "remove")?)),
            "field" => {
                let n = row_number(first, "field")?;
                let name = Some(tail.trim()).filter(|a| !a.is_empty()).ok_or(
                    SessionError::MissingArgument {
                        command: "field",
                        expected: "a field name",
                    },
                )?;
                Ok(Command::Field(n, name.to_string()))
            }
            "op" => {
                let n = row_number(first, "op")?;
                let op = Some(tail.trim()).filter(|a| !a.is_empty()).ok_or(
                    SessionError::MissingArgument {
                        command: "op",
                        expected: "an operator",
                    },
                )?;
                Ok(Command::Op(n, op.parse()?))
            }
            "value" => {
                // Everything after the row number is the value, spaces included
                let n = row_number(first, "value")?;
                Ok(Command::Value(n, tail.to_string()))
            }
            "toggle" => Ok(Command::Toggle(row_number(first, "toggle")?)),
            "show" | "ls" => Ok(Command::Show),
            "filter" => Ok(Command::Filter),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(SessionError::UnknownCommand(word.to_string())),
        }
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

pub struct Session {
    model: FilterModel,
}

impl Session {
    pub fn new(model: FilterModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &FilterModel {
        &self.model
    }

    pub fn into_model(self) -> FilterModel {
        self.model
    }

    fn resolve(&self, n: usize) -> Result<RowId, SessionError> {
        self.model
            .row_at(n - 1)
            .ok_or_else(|| SessionError::InvalidRowNumber(n.to_string()))
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let message = match command {
            Command::Add => {
                self.model.add_row();
                Some(format!("added row {}", self.model.len()))
            }
            Command::Remove(n) => {
                let id = self.resolve(n)?;
                if self.model.remove_row(id)? {
                    Some(format!("removed row {}", n))
                } else {
                    Some("kept the only row".to_string())
                }
            }
            Command::Field(n, name) => {
                let id = self.resolve(n)?;
                self.model.set_row_field(id, &name)?;
                None
            }
            Command::Op(n, op) => {
                let id = self.resolve(n)?;
                self.model.set_row_operator(id, op)?;
                None
            }
            Command::Value(n, text) => {
                let id = self.resolve(n)?;
                self.model.set_row_value_text(id, &text)?;
                None
            }
            Command::Toggle(n) => {
                let id = self.resolve(n)?;
                let current = match self.model.row(id).and_then(|r| r.value()) {
                    Some(FilterValue::Boolean(b)) => *b,
                    Some(_) => return Err(SessionError::NotToggleable(n)),
                    None => return Err(FilterError::NoFieldSelected(id.get()).into()),
                };
                self.model.set_row_value(id, FilterValue::Boolean(!current))?;
                None
            }
            Command::Show => Some(rows_table(&ModelView::from(&self.model)).to_string()),
            Command::Filter => {
                let filter = self.model.serialize();
                if filter.is_empty() {
                    Some("(no filter)".to_string())
                } else {
                    Some(filter)
                }
            }
            Command::Clear => {
                self.model.clear();
                None
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    /// Parse and execute a single input line. Blank lines and `#` comments
    /// are ignored.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, SessionError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Outcome::Continue(None));
        }
        let command: Command = line.parse()?;
        self.execute(command)
    }

    /// Read commands until `quit` or end of input. Command errors are
    /// reported on `output` and do not end the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(Some(message))) => writeln!(output, "{}", message)?,
                Ok(Outcome::Continue(None)) => {}
                Err(e) => writeln!(output, "error: {}", e)?,
            }
        }
        Ok(())
    }
}
