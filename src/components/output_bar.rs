use crate::domain::error::RenderError;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Live command preview. Render errors are shown in place of the command.
pub struct OutputBar<'a> {
    pub preview: Option<Result<String, RenderError>>,
    pub placeholder: &'a str,
    pub auto_copy: bool,
    pub theme: &'a Theme,
}

impl Widget for OutputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("COMMAND", theme.header_item),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border);
        if self.auto_copy {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {} Enter copies ", glyphs::CLIPBOARD),
                    theme.dimmed,
                ))
                .right_aligned(),
            );
        }

        let line = match self.preview {
            Some(Ok(command)) => Line::from(Span::styled(command, theme.command.patch(theme.command_bg))),
            Some(Err(e)) => Line::from(Span::styled(format!("✗ {e}"), theme.command_error)),
            None => Line::from(Span::styled(self.placeholder, theme.field_hint)),
        };
        Paragraph::new(line).block(block).render(area, buf);
    }
}
