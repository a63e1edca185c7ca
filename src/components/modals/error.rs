use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{BorderType, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect, open_modal};

/// Shown for catalog load warnings and failed background commands.
pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(70, 40, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let (title, title_style, icon) = match self.error.severity {
            ErrorSeverity::Info => (" INFO ", self.theme.header_item, "i"),
            ErrorSeverity::Warning => (" WARNING ", self.theme.header_warn, "!"),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error, "x"),
        };
        let block = open_modal(buf, modal_area, area, title, title_style, self.theme)
            .border_type(BorderType::Double)
            .border_style(title_style);

        let mut lines = vec![Line::from("")];
        for message in self.error.message.lines() {
            lines.push(Line::from(vec![
                Span::styled(format!("{icon} "), title_style),
                Span::styled(message, self.theme.footer_segment_val),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("Occurred at: {}", self.error.timestamp.format("%H:%M:%S")),
            self.theme.dimmed,
        )));
        lines.push(Line::from(""));

        if !self.error.suggestions.is_empty() {
            lines.push(Line::from(Span::styled("Suggestions:", self.theme.header_item)));
            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::styled("  • ", self.theme.header_item),
                    Span::styled(suggestion, self.theme.footer_segment_key),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" to acknowledge "),
        ]));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(modal_area, buf);
    }
}
