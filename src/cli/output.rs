//! Output formatting module for ambari-inventory
//!
//! Diagnostics only. Everything printed here goes to stderr so stdout keeps
//! carrying the inventory document alone.

use colored::Colorize;

/// Severity of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Hint,
    Info,
}

impl Level {
    fn label(&self) -> &'static str {
        match self {
            Level::Error => "ERROR:",
            Level::Warning => "WARNING:",
            Level::Hint => "HINT:",
            Level::Info => "INFO:",
        }
    }

    fn colored_label(&self) -> String {
        match self {
            Level::Error => self.label().red().bold().to_string(),
            Level::Warning => self.label().yellow().bold().to_string(),
            Level::Hint => self.label().cyan().to_string(),
            Level::Info => self.label().blue().to_string(),
        }
    }
}

/// Formatter for diagnostics
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            verbosity,
        }
    }

    /// Render one diagnostic line
    pub fn format_line(&self, level: Level, message: &str) -> String {
        let label = if self.use_color {
            level.colored_label()
        } else {
            level.label().to_string()
        };
        format!("{} {}", label, message)
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_line(Level::Error, message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.format_line(Level::Warning, message));
    }

    /// Print a hint message
    pub fn hint(&self, message: &str) {
        eprintln!("{}", self.format_line(Level::Hint, message));
    }

    /// Print an info message (shown with -v)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 {
            return;
        }
        eprintln!("{}", self.format_line(Level::Info, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let output = OutputFormatter::new(false, 0);
        assert_eq!(
            output.format_line(Level::Error, "connection refused"),
            "ERROR: connection refused"
        );
        assert_eq!(
            output.format_line(Level::Hint, "check the port"),
            "HINT: check the port"
        );
    }

    #[test]
    fn test_colored_lines_keep_message() {
        colored::control::set_override(true);
        let output = OutputFormatter {
            use_color: true,
            verbosity: 0,
        };
        let line = output.format_line(Level::Warning, "host not found");
        assert!(line.ends_with(" host not found"));
        assert!(line.contains("WARNING:"));
        colored::control::unset_override();
    }
}
