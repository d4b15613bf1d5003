//! # Output Configuration
//!
//! Controls the appearance of status messages: whether emoji and color are
//! used. Honors the usual environment conventions (`NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, `TERM=dumb`) and falls back to the `console` crate's
//! TTY detection in auto mode.
//!
//! File contents printed by the reader are never styled; only the status
//! lines around cloning and listing go through this module.

use std::env;

/// Output configuration for status messages.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    use_color: bool,
}

impl OutputConfig {
    /// Build a configuration from the `--color` flag value
    /// (`always`, `never`, or `auto`) and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    /// Environment-based detection for auto mode.
    ///
    /// `NO_COLOR` set (even empty) or `CLICOLOR=0` or `TERM=dumb` disable
    /// styling; `CLICOLOR_FORCE` enables it even without a TTY; otherwise
    /// the terminal's own capabilities decide.
    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// Whether styled output is active.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// The emoji when styling is active, a plain marker otherwise.
    pub fn emoji<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    #[cfg(test)]
    fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
