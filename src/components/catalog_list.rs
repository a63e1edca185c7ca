use crate::app::state::AppTextArea;
use crate::domain::{
    favorites::Favorite,
    models::{CatalogEntry, CatalogKind},
};
use crate::theme::{glyphs, parse_hex, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

/// Selectable list of the active tab with its filter line on top.
pub struct CatalogList<'a> {
    pub title: String,
    pub lines: Vec<Line<'a>>,
    pub query: &'a str,
    /// Editor shown in place of the query while filtering.
    pub input: Option<&'a AppTextArea<'a>>,
    pub focused: bool,
    pub theme: &'a Theme,
}

fn block<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    let (border, title_style) = if focused {
        (theme.border_focus, theme.header_active)
    } else {
        (theme.border, theme.header_item)
    };
    Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

/// Area holding the list rows, below the border and the filter line.
#[must_use]
pub fn list_rows(area: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

impl StatefulWidget for CatalogList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let theme = self.theme;
        let block = block(self.title, self.focused, theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let filter_area = Rect { height: 1, ..inner };
        if let Some(text_area) = self.input {
            buf.set_string(filter_area.x, filter_area.y, "/", theme.field_focus);
            let editor = Rect {
                x: filter_area.x + 1,
                width: filter_area.width.saturating_sub(1),
                ..filter_area
            };
            Widget::render(text_area, editor, buf);
        } else if self.query.is_empty() {
            Paragraph::new(Span::styled("/ to filter", theme.field_hint)).render(filter_area, buf);
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled("/", theme.field_label),
                Span::styled(self.query, theme.header_warn),
            ]))
            .render(filter_area, buf);
        }

        let rows = list_rows(area);
        if self.lines.is_empty() {
            let message = if self.query.is_empty() {
                "Nothing loaded"
            } else {
                "No matches"
            };
            Paragraph::new(Span::styled(message, theme.dimmed)).render(rows, buf);
            return;
        }
        let items: Vec<ListItem> = self.lines.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .style(theme.list_item)
            .highlight_style(theme.list_selected)
            .highlight_symbol(glyphs::SELECTED);
        StatefulWidget::render(list, rows, buf, state);
    }
}

/// List row of one catalog entry.
#[must_use]
pub fn entry_line<'a>(kind: CatalogKind, entry: &'a CatalogEntry, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    if kind == CatalogKind::Colors {
        let color = entry.field("hex").and_then(parse_hex);
        spans.push(Span::styled(
            "██ ",
            color.map_or(theme.dimmed, |c| Style::default().fg(c)),
        ));
    }
    spans.push(Span::raw(entry.label()));
    if entry.id() != entry.label() {
        spans.push(Span::styled(format!("  {}", entry.id()), theme.dimmed));
    }
    Line::from(spans)
}

#[must_use]
pub fn favorite_line<'a>(favorite: &'a Favorite, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("[{}] ", favorite.tab.title()), theme.field_label),
        Span::raw(favorite.description.as_str()),
        Span::styled(format!("  {}", favorite.command), theme.dimmed),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rows_skip_border_and_filter() {
        let rows = list_rows(Rect::new(0, 1, 40, 20));
        assert_eq!(rows, Rect::new(1, 3, 38, 17));
        assert_eq!(list_rows(Rect::new(0, 0, 2, 2)).height, 0);
    }

    #[test]
    fn test_entry_line_shows_id_and_swatch() {
        let theme = Theme::default();
        let red = CatalogEntry::new("1", "Red").with_field("hex", "#FF0000");
        let line = entry_line(CatalogKind::Colors, &red, &theme);
        assert_eq!(line.spans[0].content, "██ ");
        assert_eq!(line.spans[2].content, "  1");

        let dodo = CatalogEntry::new("Dodo", "Dodo");
        assert_eq!(entry_line(CatalogKind::Taming, &dodo, &theme).spans.len(), 1);
    }
}
