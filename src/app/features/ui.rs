use tracing::info;

use super::{filter, params};
use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, StatusLevel, ThemeSelectionState},
};
use crate::theme::{PaletteType, Theme};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::CancelMode => {
            state.mode = AppMode::Normal;
            state.input = None;
            state.theme_selection = None;
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
        }
        Action::EnterThemeSelection => {
            state.theme_selection = Some(ThemeSelectionState::starting_at(state.palette_type));
            state.mode = AppMode::ThemeSelection;
        }
        Action::SelectThemeNext | Action::SelectThemePrev => {
            if let Some(selection) = &mut state.theme_selection {
                let len = selection.themes.len().max(1);
                selection.selected_index = if *action == Action::SelectThemeNext {
                    (selection.selected_index + 1) % len
                } else {
                    (selection.selected_index + len - 1) % len
                };
            }
        }
        Action::ConfirmTheme => {
            if let Some(palette) = state.theme_selection.take().and_then(|s| s.selected()) {
                apply_theme(state, palette);
            }
            state.mode = AppMode::Normal;
        }
        Action::SwitchTheme(palette) => apply_theme(state, *palette),
        Action::TextAreaInput(key) => {
            if let Some(input) = &mut state.input {
                input.text_area.input(*key);
            }
            match state.mode {
                AppMode::FilterInput => filter::sync_query(state),
                AppMode::ParamEdit => params::sync_field(state),
                _ => {}
            }
        }
        Action::Quit => state.should_quit = true,
        Action::Resize(_, _) => {}
        _ => return UpdateResult::NotHandled,
    }
    UpdateResult::Handled(None)
}

fn apply_theme(state: &mut AppState, palette: PaletteType) {
    info!(theme = palette.label(), "switching theme");
    state.palette_type = palette;
    state.theme = Theme::from_palette_type(palette);
    state.set_status(format!("Theme: {}", palette.label()), StatusLevel::Info);
}
