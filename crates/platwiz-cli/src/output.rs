//! Everything commands print on stdout.
//!
//! Diagnostics go through `tracing` on stderr; results go through
//! [`OutputManager`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Resolved output settings plus the stdout handle.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Flag first, then config, then Human (TTY) or Plain (piped)
        let requested = match args.output_format {
            OutputFormat::Auto => config.output.format,
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Writers ───────────────────────────────────────────────────────────

    /// Every human-facing line goes through here; `--quiet` drops it.
    fn line(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(text)
    }

    /// `<icon> <msg>`, both painted with `style` unless colour is off.
    fn marked(&self, icon: char, style: Style, msg: &str) -> io::Result<()> {
        if self.no_color {
            self.line(&format!("{icon} {msg}"))
        } else {
            self.line(&format!("{} {}", icon.style(style.bold()), msg.style(style)))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', Style::new().blue(), msg)
    }

    /// Section title above a [`Self::table`].
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.line(text)
        } else {
            self.line(&text.style(Style::new().cyan().bold()).to_string())
        }
    }

    /// Aligned `key  value` rows under the current header.
    pub fn table<'a>(&self, rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> io::Result<()> {
        let rows: Vec<_> = rows.into_iter().collect();
        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in rows {
            let key = format!("{key:<width$}");
            if self.no_color {
                self.line(&format!("  {key}  {value}"))?;
            } else {
                self.line(&format!("  {}  {value}", key.dimmed()))?;
            }
        }
        Ok(())
    }

    /// Pretty JSON on stdout.  Never suppressed: scripts depend on it.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn args(quiet: bool, no_color: bool, format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            log_dir: None,
            no_telemetry: false,
            output_format: format,
        }
    }

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        // Human avoids TTY detection in tests
        OutputManager::new(&args(quiet, no_color, OutputFormat::Human), &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.table([("a", "b")]).is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(!make_manager(false, false).no_color);
        assert!(make_manager(false, true).no_color);
    }

    #[test]
    fn plain_and_json_never_colour() {
        let config = AppConfig::default();
        let plain = OutputManager::new(&args(false, false, OutputFormat::Plain), &config);
        let json = OutputManager::new(&args(false, false, OutputFormat::Json), &config);
        assert!(plain.no_color);
        assert!(json.no_color);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;

        let out = OutputManager::new(&args(false, false, OutputFormat::Auto), &config);
        assert_eq!(out.format(), OutputFormat::Json);

        let flagged = OutputManager::new(&args(false, false, OutputFormat::Plain), &config);
        assert_eq!(flagged.format(), OutputFormat::Plain);
    }
}
