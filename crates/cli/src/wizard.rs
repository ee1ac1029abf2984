//! Interactive collection of application specifications
//!
//! A line-oriented state machine: four text fields, then a single-choice
//! importance list. `<` steps back to the previous field and end of input
//! cancels the session.

use allocat_lib::{Importance, InputSpec};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::output::THEME;

/// Token that moves focus to the previous field
pub const BACK: &str = "<";

/// Errors raised while parsing a field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("must be a number")]
    NotANumber,

    #[error("choose 1-{max} or one of: high, medium, low")]
    UnknownChoice { max: usize },
}

/// Text fields in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AppName,
    ExpectedLoad,
    DataSize,
    NetworkTraffic,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::AppName,
        Field::ExpectedLoad,
        Field::DataSize,
        Field::NetworkTraffic,
    ];

    fn index(self) -> usize {
        match self {
            Field::AppName => 0,
            Field::ExpectedLoad => 1,
            Field::DataSize => 2,
            Field::NetworkTraffic => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::AppName => "App Name:",
            Field::ExpectedLoad => "Expected Load (RPS):",
            Field::DataSize => "Data Size (MB):",
            Field::NetworkTraffic => "Network Traffic (Mbps):",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::AppName => "e.g. my-web-app",
            Field::ExpectedLoad => "e.g. 500",
            Field::DataSize => "e.g. 100",
            Field::NetworkTraffic => "e.g. 75",
        }
    }

    /// Maximum number of characters kept from the input
    pub fn char_limit(self) -> usize {
        match self {
            Field::AppName => 30,
            _ => 6,
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(self, Field::AppName)
    }

    fn next(self) -> Option<Field> {
        Field::ALL.get(self.index() + 1).copied()
    }

    fn previous(self) -> Field {
        Field::ALL[self.index().saturating_sub(1)]
    }
}

/// Current position in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    EditingField(Field),
    ChoosingImportance,
    Done(InputSpec),
    Cancelled,
}

/// How a wizard session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Completed(InputSpec),
    Cancelled,
}

/// Parse a non-negative integer field
pub fn parse_count(value: &str) -> Result<u32, InputError> {
    value.trim().parse::<u32>().map_err(|_| InputError::NotANumber)
}

/// Parse an importance choice by number or name; empty selects `highlighted`
pub fn parse_importance(value: &str, highlighted: Importance) -> Result<Importance, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(highlighted);
    }
    if let Ok(n) = value.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| Importance::ALL.get(i).copied())
            .ok_or(InputError::UnknownChoice {
                max: Importance::ALL.len(),
            });
    }
    value.parse::<Importance>().map_err(|_| InputError::UnknownChoice {
        max: Importance::ALL.len(),
    })
}

fn truncate_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

/// Line-based wizard over any reader/writer pair
pub struct Wizard<R, W> {
    input: R,
    output: W,
    state: WizardState,
    values: [Option<String>; 4],
    counts: [u32; 3],
    importance: Importance,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: WizardState::EditingField(Field::AppName),
            values: Default::default(),
            counts: [0; 3],
            importance: Importance::High,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Drive the wizard until the user finishes or input ends
    pub fn run(mut self) -> io::Result<WizardOutcome> {
        writeln!(self.output, "{}\n", "Enter application specifications:".bold())?;
        writeln!(
            self.output,
            "{}\n",
            format!(
                "Press Enter to continue, '{}' to go back, Ctrl+D to quit.",
                BACK
            )
            .color(THEME.blurred)
        )?;

        loop {
            match &self.state {
                WizardState::Done(spec) => return Ok(WizardOutcome::Completed(spec.clone())),
                WizardState::Cancelled => return Ok(WizardOutcome::Cancelled),
                WizardState::EditingField(field) => {
                    let field = *field;
                    self.render_field(field)?;
                }
                WizardState::ChoosingImportance => self.render_list()?,
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                self.state = WizardState::Cancelled;
                continue;
            }
            let line = line.trim_end_matches(['\r', '\n']);

            if let Err(e) = self.handle_line(line) {
                writeln!(
                    self.output,
                    "{:>width$} {}",
                    "",
                    format!("✗ {}", e).red(),
                    width = THEME.label_width
                )?;
            }
        }
    }

    /// Apply one line of input to the current state
    pub fn handle_line(&mut self, line: &str) -> Result<(), InputError> {
        match self.state.clone() {
            WizardState::EditingField(field) => {
                if line.trim() == BACK {
                    self.state = WizardState::EditingField(field.previous());
                    return Ok(());
                }
                self.submit_field(field, line)?;
                self.state = match field.next() {
                    Some(next) => WizardState::EditingField(next),
                    None => WizardState::ChoosingImportance,
                };
            }
            WizardState::ChoosingImportance => {
                if line.trim() == BACK {
                    self.state = WizardState::EditingField(Field::NetworkTraffic);
                    return Ok(());
                }
                self.importance = parse_importance(line, self.importance)?;
                self.state = WizardState::Done(self.collect());
            }
            WizardState::Done(_) | WizardState::Cancelled => {}
        }
        Ok(())
    }

    fn submit_field(&mut self, field: Field, line: &str) -> Result<(), InputError> {
        let slot = field.index();
        let raw = truncate_chars(line, field.char_limit());

        // Empty input keeps a previously entered value
        let value = if raw.trim().is_empty() {
            match &self.values[slot] {
                Some(existing) => existing.clone(),
                None => raw,
            }
        } else {
            raw
        };

        if field.is_numeric() {
            self.counts[slot - 1] = parse_count(&value)?;
            self.values[slot] = Some(value.trim().to_string());
        } else {
            self.values[slot] = Some(value);
        }
        Ok(())
    }

    fn collect(&self) -> InputSpec {
        InputSpec {
            app_name: self.values[0].clone().unwrap_or_default(),
            expected_load: self.counts[0],
            data_size: self.counts[1],
            network_traffic: self.counts[2],
            importance: self.importance,
        }
    }

    fn render_field(&mut self, field: Field) -> io::Result<()> {
        let hint = match &self.values[field.index()] {
            Some(current) => format!("[{}]", current),
            None => format!("({})", field.placeholder()),
        };
        write!(
            self.output,
            "{:>width$} {} {} ",
            field.label(),
            hint.color(THEME.blurred),
            ">".color(THEME.focused),
            width = THEME.label_width
        )?;
        self.output.flush()
    }

    fn render_list(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Select Importance Level".color(THEME.title).bold())?;
        for (i, level) in Importance::ALL.iter().enumerate() {
            let entry = format!("{}. {}", i + 1, level);
            if *level == self.importance {
                writeln!(self.output, "  {}", format!("> {}", entry).color(THEME.focused))?;
            } else {
                writeln!(self.output, "    {}", entry)?;
            }
        }
        write!(
            self.output,
            "Choice [1-{}, default {}] {} ",
            Importance::ALL.len(),
            self.importance,
            ">".color(THEME.focused)
        )?;
        self.output.flush()
    }
}
