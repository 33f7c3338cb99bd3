//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use shelterly_core::ScreenState;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Turn a settled screen state into a result.
pub fn settled<T>(state: ScreenState<T>) -> Result<T, CliError> {
    match state {
        ScreenState::Success(value) => Ok(value),
        ScreenState::Error(message) => Err(CliError::Rejected { message }),
        ScreenState::Loading => Err(CliError::Internal("command did not complete".into())),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Prompt for a line of text.
pub fn prompt_text(prompt: &str) -> Result<String, CliError> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_err)
}

/// Prompt for a password without echo.
pub fn prompt_password(prompt: &str) -> Result<String, CliError> {
    rpassword::prompt_password(format!("{prompt}: ")).map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

/// A stderr spinner, hidden for quiet or non-interactive runs.
pub fn spinner(global: &GlobalOpts, message: &'static str) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_maps_each_state() {
        assert!(matches!(settled(ScreenState::Success(1)), Ok(1)));
        assert!(matches!(
            settled::<()>(ScreenState::Error("nope".into())),
            Err(CliError::Rejected { ref message }) if message == "nope"
        ));
        assert!(matches!(
            settled::<()>(ScreenState::Loading),
            Err(CliError::Internal(_))
        ));
    }
}
