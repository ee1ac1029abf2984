//! Output formatting utilities

use clap::ValueEnum;
use colored::{Color, Colorize};
use serde::Deserialize;
use std::time::Duration;

/// Output format for the allocation summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Terminal styling constants
pub struct Theme {
    /// Width of the right-aligned field labels
    pub label_width: usize,
    pub focused: Color,
    pub blurred: Color,
    pub title: Color,
    pub spinner_frames: &'static [&'static str],
    pub spinner_tick: Duration,
}

pub const THEME: Theme = Theme {
    label_width: 24,
    focused: Color::Green,
    blurred: Color::BrightBlack,
    title: Color::Yellow,
    spinner_frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    spinner_tick: Duration::from_millis(100),
};

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
