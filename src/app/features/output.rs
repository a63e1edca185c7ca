use tracing::{info, warn};

use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, StatusLevel, Tab},
};
use crate::domain::models::CatalogKind;
use crate::theme::glyphs;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Generate if state.tab == Tab::Favorites => {
            UpdateResult::Handled(super::favorites::use_favorite(state))
        }
        Action::Generate => UpdateResult::Handled(generate(state)),
        Action::CopyOutput => UpdateResult::Handled(copy_output(state)),
        Action::ToggleAutoCopy => {
            state.auto_copy = !state.auto_copy;
            let message = if state.auto_copy {
                "Auto-copy on"
            } else {
                "Auto-copy off"
            };
            state.set_status(message, StatusLevel::Info);
            UpdateResult::Handled(None)
        }
        Action::CopyCompleted(Ok(text)) => {
            state.set_status(
                format!("{} Copied: {text}", glyphs::CLIPBOARD),
                StatusLevel::Success,
            );
            UpdateResult::Handled(None)
        }
        Action::CopyCompleted(Err(e)) => {
            state.set_status(format!("Clipboard error: {e}"), StatusLevel::Error);
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Commits the live preview and copies it when auto-copy is on.
fn generate(state: &mut AppState) -> Option<Command> {
    match state.preview() {
        Some(Ok(command)) => {
            info!(command = %command, tab = state.tab.title(), "generated command");
            state.last_generated = Some(command.clone());
            if state.auto_copy {
                Some(Command::CopyToClipboard(command))
            } else {
                state.set_status(format!("Generated: {command}"), StatusLevel::Info);
                None
            }
        }
        Some(Err(e)) => {
            warn!(error = %e, "cannot generate command");
            state.set_status(format!("Cannot generate: {e}"), StatusLevel::Warning);
            None
        }
        None if state.tab == Tab::Catalog(CatalogKind::Taming) => {
            state.set_status("Taming entries are reference only", StatusLevel::Info);
            None
        }
        None => {
            state.set_status("Nothing selected", StatusLevel::Warning);
            None
        }
    }
}

fn copy_output(state: &mut AppState) -> Option<Command> {
    let text = if state.tab == Tab::Favorites {
        state.selected_favorite().map(|f| f.command.clone())
    } else {
        match state.preview() {
            Some(Ok(command)) => Some(command),
            Some(Err(e)) => {
                state.set_status(format!("Cannot copy: {e}"), StatusLevel::Warning);
                return None;
            }
            None => state.last_generated.clone(),
        }
    };
    match text {
        Some(text) => Some(Command::CopyToClipboard(text)),
        None => {
            state.set_status("Nothing to copy", StatusLevel::Info);
            None
        }
    }
}
