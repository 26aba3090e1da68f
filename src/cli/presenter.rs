//! CLI presenter for output formatting

use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::tip::{AudioTip, StoredTip};

/// Presenter for CLI output formatting.
///
/// Spinners and status lines go to stderr. Listings and per-item outcomes
/// go to stdout. Methods take `&self` so one presenter can be shared with
/// use-case callbacks.
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Start a spinner with message, replacing any running one
    pub fn start_spinner(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Some(previous) = self.take_spinner() {
            previous.finish_and_clear();
        }
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    /// Clear the spinner and print an error line
    pub fn spinner_fail(&self, message: &str) {
        self.stop_spinner();
        self.error(message);
    }

    /// Clear the spinner and print a succeeded item to stdout
    pub fn outcome_success(&self, message: &str) {
        self.stop_spinner();
        println!("{}", format_outcome(true, message));
    }

    /// Clear the spinner and print a failed item to stdout
    pub fn outcome_fail(&self, message: &str) {
        self.stop_spinner();
        println!("{}", format_outcome(false, message));
    }

    /// Stop spinner without status
    pub fn stop_spinner(&self) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_and_clear();
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one catalog entry
    pub fn catalog_entry(&self, tip: &AudioTip) {
        println!("{}", format_catalog_entry(tip));
    }

    /// Print one stored record
    pub fn record(&self, tip: &StoredTip) {
        println!("{}", format_record(tip));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

fn format_outcome(ok: bool, message: &str) -> String {
    let symbol = if ok { "✓".green() } else { "✗".red() };
    format!("{} {}", symbol, message)
}

fn format_catalog_entry(tip: &AudioTip) -> String {
    format!(
        "{}  {}\n    {}",
        tip.audio_file.as_str().cyan(),
        tip.title.bold(),
        tip.transcript
    )
}

fn format_record(tip: &StoredTip) -> String {
    let mut lines = vec![
        format!("{}  {}", tip.display_title().bold(), tip.id.dimmed()),
        format!("    {}", tip.display_transcript()),
    ];
    if let Some(ref url) = tip.audio_url {
        lines.push(format!("    {}", url.cyan()));
    }
    lines.push(format!("    created {}", tip.display_created_at()));
    lines.join("\n")
}
