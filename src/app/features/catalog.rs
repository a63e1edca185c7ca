use tracing::{error, info, warn};

use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, ErrorSeverity, ErrorState, StatusLevel},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::ReloadCatalogs | Action::ExternalChangeDetected => {
            let Some(dir) = state.data_dir.clone() else {
                state.set_status("No data directory to reload", StatusLevel::Warning);
                return UpdateResult::Handled(None);
            };
            if *action == Action::ExternalChangeDetected {
                info!(dir = %dir.display(), "data directory changed, reloading");
            }
            state.is_reloading = true;
            UpdateResult::Handled(Some(Command::LoadCatalogs(dir)))
        }
        Action::CatalogsLoaded(report) => {
            state.is_reloading = false;
            state.load_warnings = report.warnings.clone();
            state.replace_catalogs(report.catalogs.clone());
            if report.warnings.is_empty() {
                state.set_status(
                    format!("Loaded {} entries", state.catalogs.total_entries()),
                    StatusLevel::Success,
                );
            } else {
                for w in &report.warnings {
                    warn!(warning = %w, "catalog load warning");
                }
                state.last_error = Some(ErrorState::new(
                    report.warnings.join("\n"),
                    ErrorSeverity::Warning,
                ));
            }
            UpdateResult::Handled(None)
        }
        Action::ErrorOccurred(message) => {
            error!(message = %message, "command failed");
            state.is_reloading = false;
            state.last_error = Some(ErrorState::new(message.clone(), ErrorSeverity::Error));
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}
