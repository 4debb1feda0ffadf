//! Terminal styling and color detection.
//!
//! Report rendering asks for a [`ColorPalette`] instead of writing escape
//! codes directly, so plain output (pipes, `NO_COLOR`, `TERM=dumb`) is the
//! same text with empty style strings.

/// ANSI escape codes used by the report renderer.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for headings and the ship name.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for labels and secondary detail.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for damage formulas.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for a budget with capacity to spare.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for advisory warnings.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for a budget deficit.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved style strings, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub ok: &'static str,
    pub warn: &'static str,
    pub error: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            muted: colors::GRAY,
            accent: colors::CYAN,
            ok: colors::GREEN,
            warn: colors::ORANGE,
            error: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            accent: "",
            ok: "",
            warn: "",
            error: "",
        }
    }

    /// `colored()` when the terminal supports ANSI colors, else `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether color output should be used.
///
/// Honors the `NO_COLOR` convention (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;
    use std::sync::Mutex;

    /// Environment variables are process-global; tests touching them must
    /// not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn plain_palette_is_empty() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.heading.is_empty());
        assert!(p.error.is_empty());

        let c = ColorPalette::colored();
        assert!(!c.reset.is_empty());
        assert!(!c.ok.is_empty());
    }

    #[test]
    fn no_color_disables_colors() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn dumb_terminal_disables_colors() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn capable_terminal_enables_colors() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm-256color"))], || {
            assert!(supports_color());
        });
    }
}
