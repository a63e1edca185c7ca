use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::error::ErrorModal;
use super::help::HelpModal;
use super::helpers::dim_area;
use super::text_input::TextInputModal;
use super::theme_selection::ThemeSelectionModal;

/// Draws whichever overlay the current mode calls for. The error modal
/// always sits on top.
pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl ModalManager<'_> {
    #[must_use]
    pub fn is_active(state: &AppState) -> bool {
        matches!(
            state.mode,
            AppMode::Help | AppMode::FavoriteInput | AppMode::ThemeSelection
        ) || state.last_error.is_some()
    }
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.app_state;
        if !Self::is_active(state) {
            return;
        }
        dim_area(buf, area);

        match state.mode {
            AppMode::Help => HelpModal {
                theme: self.theme,
                keymap: &state.keymap,
            }
            .render(area, buf),
            AppMode::FavoriteInput => {
                if let Some(input) = &state.input {
                    TextInputModal {
                        theme: self.theme,
                        title: " FAVORITE DESCRIPTION ",
                        text_area: &input.text_area,
                    }
                    .render(area, buf);
                }
            }
            AppMode::ThemeSelection => {
                if let Some(selection) = &state.theme_selection {
                    ThemeSelectionModal {
                        theme: self.theme,
                        state: selection,
                    }
                    .render(area, buf);
                }
            }
            _ => {}
        }

        if let Some(err) = &state.last_error {
            ErrorModal {
                theme: self.theme,
                error: err,
            }
            .render(area, buf);
        }
    }
}
