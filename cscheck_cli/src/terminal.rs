//! Terminal detection for progress and color decisions

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Whether stdout is a terminal a person is likely watching
pub fn is_interactive() -> bool {
    stdout().is_terminal() && !is_ci_environment()
}

/// Check if the terminal supports ANSI escape codes
fn supports_ansi() -> bool {
    let term = env::var("TERM").unwrap_or_default();
    if cfg!(windows) {
        return term != "dumb";
    }
    !term.is_empty() && term != "dumb"
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TF_BUILD",
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Decide whether to draw the progress bar on stderr
pub fn should_show_progress(config_enabled: bool, no_progress_flag: bool) -> bool {
    config_enabled
        && !no_progress_flag
        && stderr().is_terminal()
        && !is_ci_environment()
        && supports_ansi()
}

/// Decide whether to colorize stdout output; `NO_COLOR` always wins
pub fn should_use_color(config_enabled: bool) -> bool {
    config_enabled && env::var_os("NO_COLOR").is_none() && is_interactive() && supports_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_wins() {
        assert!(!should_show_progress(false, false));
        assert!(!should_use_color(false));
    }

    #[test]
    fn test_no_progress_flag_wins() {
        assert!(!should_show_progress(true, true));
    }

    #[test]
    fn test_terminal_detection() {
        // Results depend on the environment; just ensure nothing panics
        let _ = is_interactive();
        let _ = should_show_progress(true, false);
        let _ = should_use_color(true);
    }
}
