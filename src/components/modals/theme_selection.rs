use crate::app::state::ThemeSelectionState;
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Widget},
};

use super::helpers::{centered_rect_fixed_height, open_modal};

pub struct ThemeSelectionModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a ThemeSelectionState,
}

impl Widget for ThemeSelectionModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.state.themes.len() as u16 + 2;
        let modal_area = centered_rect_fixed_height(40, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let block = open_modal(
            buf,
            modal_area,
            area,
            " SELECT THEME ",
            self.theme.header_active,
            self.theme,
        );

        let items: Vec<ListItem> = self
            .state
            .themes
            .iter()
            .enumerate()
            .map(|(i, palette)| {
                let selected = i == self.state.selected_index;
                let style = if selected {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                let prefix = if selected { glyphs::SELECTED } else { "  " };
                // Preview the palette's accent next to its name.
                let accent = Theme::from_palette_type(*palette)
                    .border_focus
                    .fg
                    .unwrap_or_default();

                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled("■ ", Style::default().fg(accent)),
                    Span::styled(palette.label(), style),
                ]))
            })
            .collect();

        List::new(items).block(block).render(modal_area, buf);
    }
}
