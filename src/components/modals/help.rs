use crate::app::{action::Action, keymap::KeyMap};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table, Widget},
};

use super::helpers::{centered_rect, open_modal};

const BOUND: [(&str, &[(Action, &str)]); 4] = [
    (
        "Browse",
        &[
            (Action::SelectNext, "Next entry"),
            (Action::SelectPrev, "Previous entry"),
            (Action::PageDown, "Page down"),
            (Action::PageUp, "Page up"),
            (Action::SelectFirst, "First entry"),
            (Action::SelectLast, "Last entry"),
            (Action::NextTab, "Next tab"),
            (Action::PrevTab, "Previous tab"),
            (Action::EnterFilterMode, "Filter the list"),
        ],
    ),
    (
        "Command",
        &[
            (Action::EnterParamEdit, "Edit parameters"),
            (Action::Generate, "Generate (and copy)"),
            (Action::CopyOutput, "Copy command"),
            (Action::ToggleAutoCopy, "Toggle auto-copy"),
        ],
    ),
    (
        "Favorites",
        &[
            (Action::AddFavoriteIntent, "Save as favorite"),
            (Action::RemoveFavorite, "Remove favorite"),
            (Action::CycleFavoritesFilter, "Filter favorites by tab"),
        ],
    ),
    (
        "General",
        &[
            (Action::ReloadCatalogs, "Reload catalogs"),
            (Action::EnterThemeSelection, "Choose theme"),
            (Action::ToggleHelp, "Show this help"),
            (Action::CancelMode, "Close modal / cancel"),
            (Action::Quit, "Quit"),
        ],
    ),
];

const EDITING: [(&str, &str); 5] = [
    ("1-7", "Jump to tab"),
    ("Tab / ↓", "Next field (while editing)"),
    ("S-Tab / ↑", "Previous field (while editing)"),
    ("Space / ← →", "Toggle flag or cycle choice"),
    ("Enter", "Generate from the form"),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
    pub keymap: &'a KeyMap,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        let block = open_modal(
            buf,
            help_area,
            area,
            " HELP - KEYBINDINGS ",
            self.theme.header_active,
            self.theme,
        );

        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows = Vec::new();
        for (category, actions) in BOUND {
            rows.push(Row::new(vec![
                Cell::from(Span::styled(category, category_style)),
                Cell::from(""),
            ]));
            for (action, desc) in actions {
                let key = self.keymap.key_for(action).unwrap_or_else(|| "-".to_string());
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(format!(" {key}"), key_style)),
                    Cell::from(Span::styled(*desc, desc_style)),
                ]));
            }
            rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
        }
        rows.push(Row::new(vec![
            Cell::from(Span::styled("Editing", category_style)),
            Cell::from(""),
        ]));
        for (key, desc) in EDITING {
            rows.push(Row::new(vec![
                Cell::from(Span::styled(format!(" {key}"), key_style)),
                Cell::from(Span::styled(desc, desc_style)),
            ]));
        }

        Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .block(block)
            .render(help_area, buf);
    }
}
