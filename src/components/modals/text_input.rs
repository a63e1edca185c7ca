use crate::app::state::AppTextArea;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use super::helpers::{centered_rect_fixed_height, hint_line, open_modal};

/// One-line prompt, used for favorite descriptions.
pub struct TextInputModal<'a> {
    pub theme: &'a Theme,
    pub title: &'a str,
    pub text_area: &'a AppTextArea<'a>,
}

impl Widget for TextInputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, 4, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let block = open_modal(
            buf,
            modal_area,
            area,
            self.title,
            self.theme.header_active,
            self.theme,
        );
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);
        if inner.height == 0 {
            return;
        }

        Widget::render(self.text_area, Rect { height: 1, ..inner }, buf);
        if inner.height > 1 {
            let hints = hint_line(&[("Enter", "save"), ("Esc", "cancel")], self.theme);
            buf.set_line(inner.x, inner.y + 1, &hints, inner.width);
        }
    }
}
