//! Blocking user notifications
//!
//! Every user-visible failure ends up here as a native message box.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::error::MapError;

fn level_for(err: &MapError) -> MessageLevel {
    match err {
        MapError::InvalidQuery { .. } => MessageLevel::Info,
        MapError::Config(_) => MessageLevel::Error,
        _ => MessageLevel::Warning,
    }
}

/// Show `err` in a modal dialog and wait for the user to dismiss it
pub fn show(err: &MapError) {
    let _ = MessageDialog::new()
        .set_level(level_for(err))
        .set_title(err.title())
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}
