use crate::app::state::{AppTextArea, ParamForm};
use crate::domain::{
    favorites::Favorite,
    models::{CatalogEntry, CatalogKind},
    params::FieldKind,
};
use crate::theme::{glyphs, parse_hex, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 14;
const MISSING: &str = "—";

/// What the right-hand panel describes.
pub enum Detail<'a> {
    Entry {
        kind: CatalogKind,
        entry: &'a CatalogEntry,
        form: &'a ParamForm,
    },
    Favorite(&'a Favorite),
    Empty(&'static str),
}

pub struct DetailPanel<'a> {
    pub detail: Detail<'a>,
    /// Editor for the focused form field while editing parameters.
    pub editor: Option<&'a AppTextArea<'a>>,
    pub focused: bool,
    pub theme: &'a Theme,
}

fn row<'a>(label: &str, value: impl Into<Span<'a>>, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<LABEL_WIDTH$}"), theme.field_label),
        value.into(),
    ])
}

impl DetailPanel<'_> {
    /// Lines of the panel and the index of the focused form field's line.
    fn lines(&self) -> (Vec<Line<'_>>, Option<usize>) {
        let theme = self.theme;
        let mut lines = Vec::new();
        let mut focus_line = None;

        match &self.detail {
            Detail::Empty(message) => {
                lines.push(Line::from(Span::styled(*message, theme.dimmed)));
            }
            Detail::Favorite(favorite) => {
                lines.push(Line::from(Span::styled(
                    favorite.description.as_str(),
                    theme.entry_id,
                )));
                lines.push(Line::from(""));
                lines.push(row("Command", Span::styled(favorite.command.as_str(), theme.command), theme));
                lines.push(row("Saved from", Span::raw(favorite.tab.title()), theme));
                lines.push(row(
                    "Created",
                    Span::raw(favorite.created.format("%Y-%m-%d %H:%M").to_string()),
                    theme,
                ));
                if favorite.tab == CatalogKind::Taming {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Enter shows the taming notes",
                        theme.field_hint,
                    )));
                }
            }
            Detail::Entry { kind, entry, form } => {
                lines.push(Line::from(Span::styled(entry.label(), theme.entry_id)));
                lines.push(Line::from(Span::styled(entry.id(), theme.dimmed)));
                lines.push(Line::from(""));
                entry_rows(*kind, entry, theme, &mut lines);

                if !form.specs.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled("Parameters", theme.header_item)));
                    for (i, spec) in form.specs.iter().enumerate() {
                        let focused = self.focused && i == form.focused;
                        let input = form.inputs.get(i).map_or("", String::as_str);
                        let value_style = if focused {
                            theme.field_focus
                        } else {
                            theme.field_value
                        };
                        let mut value = vec![Span::styled(
                            format!("{:<w$.w$} ", spec.label, w = LABEL_WIDTH - 1),
                            theme.field_label,
                        )];
                        value.push(Span::styled(input.to_string(), value_style));
                        if let FieldKind::Choice(options) = &spec.kind {
                            value.push(Span::styled(
                                format!("  ({})", options.join("/")),
                                theme.field_hint,
                            ));
                        } else if let Some(hint) = &spec.hint {
                            value.push(Span::styled(format!("  {hint}"), theme.field_hint));
                        }
                        if focused {
                            focus_line = Some(lines.len());
                        }
                        lines.push(Line::from(value));
                    }
                }
            }
        }
        (lines, focus_line)
    }
}

fn entry_rows<'a>(kind: CatalogKind, entry: &'a CatalogEntry, theme: &Theme, lines: &mut Vec<Line<'a>>) {
    let or_missing = |name: &str| entry.field(name).filter(|v| !v.trim().is_empty()).unwrap_or(MISSING);
    match kind {
        CatalogKind::Taming => {
            lines.push(row("Tame type", Span::raw(or_missing("tame_type")), theme));
            lines.push(row("Feed", Span::raw(or_missing("feed")), theme));
            lines.push(row("Notes", Span::raw(or_missing("notes")), theme));
        }
        CatalogKind::Colors => {
            let hex = or_missing("hex");
            let swatch = parse_hex(hex).map_or(theme.dimmed, |c| Style::default().fg(c));
            lines.push(row("Color", Span::styled(glyphs::SWATCH, swatch), theme));
            lines.push(row("Hex", Span::raw(hex), theme));
        }
        CatalogKind::Commands => {
            lines.push(row("Syntax", Span::raw(or_missing("syntax")), theme));
            lines.push(row("Description", Span::raw(or_missing("description")), theme));
        }
        CatalogKind::Locations => {
            let coords = format!("{} / {} / {}", or_missing("x"), or_missing("y"), or_missing("z"));
            lines.push(row("Coordinates", Span::raw(coords), theme));
        }
        CatalogKind::Items | CatalogKind::Creatures => {
            for (name, value) in entry.fields() {
                if name != "name" && value != entry.id() {
                    lines.push(row(name, Span::raw(value), theme));
                }
            }
        }
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let (border, title_style) = if self.focused {
            (theme.border_focus, theme.header_active)
        } else {
            (theme.border, theme.header_item)
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("DETAILS", title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (lines, focus_line) = self.lines();
        Paragraph::new(lines).render(inner, buf);

        if let (Some(editor), Some(line)) = (self.editor, focus_line) {
            let line = line as u16;
            let offset = LABEL_WIDTH as u16;
            if line < inner.height && offset < inner.width {
                let editor_area = Rect {
                    x: inner.x + offset,
                    y: inner.y + line,
                    width: inner.width - offset,
                    height: 1,
                };
                Clear.render(editor_area, buf);
                Widget::render(editor, editor_area, buf);
            }
        }
    }
}
