use std::{borrow::Cow, io, time::Duration};

use dialoguer::{theme::ColorfulTheme, Password};
use indicatif::ProgressBar;

/// Prompt for the access token without echoing it. Whitespace picked up
/// from a paste is dropped.
pub fn ask_token() -> io::Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Access token")
        .interact()
        .map(|s| s.trim().to_owned())
}

/// Spinner for one backend round trip. Ticks on its own until finished.
pub fn waiting_spinner(msg: impl Into<Cow<'static, str>>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
