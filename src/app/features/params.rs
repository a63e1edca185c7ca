use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, InputState, StatusLevel},
};
use crate::domain::models::CatalogKind;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::EnterParamEdit => {
            let Some((view, _)) = state.active() else {
                return UpdateResult::Handled(None);
            };
            if view.form.specs.is_empty() {
                let message = if view.kind == CatalogKind::Taming {
                    "Taming entries are reference only"
                } else {
                    "No parameters to edit"
                };
                state.set_status(message, StatusLevel::Info);
                return UpdateResult::Handled(None);
            }
            state.mode = AppMode::ParamEdit;
            reload_input(state);
            UpdateResult::Handled(None)
        }
        Action::NextField | Action::PrevField => {
            if let Some((view, _)) = state.active_mut() {
                if *action == Action::NextField {
                    view.form.focus_next();
                } else {
                    view.form.focus_prev();
                }
            }
            reload_input(state);
            UpdateResult::Handled(None)
        }
        Action::CycleField(forward) => {
            let cycled = state
                .active_mut()
                .is_some_and(|(view, _)| view.form.cycle_focused(*forward));
            if cycled {
                reload_input(state);
            }
            UpdateResult::Handled(None)
        }
        Action::CancelMode if state.mode == AppMode::ParamEdit => {
            state.mode = AppMode::Normal;
            state.input = None;
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Writes the editor text into the focused form field.
pub fn sync_field(state: &mut AppState) {
    let Some(text) = state.input.as_ref().map(|i| i.text_area.text()) else {
        return;
    };
    if let Some((view, _)) = state.active_mut() {
        view.form.set_focused_input(text);
    }
}

fn reload_input(state: &mut AppState) {
    let text = state
        .active()
        .map(|(view, _)| view.form.focused_input().to_string())
        .unwrap_or_default();
    state.input = Some(InputState::new(&text));
}
