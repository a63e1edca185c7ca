use crate::app::state::{AppState, Tab};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Logo, tab strip and catalog statistics on the top row.
pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

fn logo_text() -> String {
    format!(" {} CHEATGEN ", glyphs::LOGO)
}

fn tab_label(index: usize, tab: Tab) -> String {
    format!(" {} {} ", index + 1, tab.title())
}

fn text_width(text: &str) -> u16 {
    Span::raw(text).width() as u16
}

/// Tab under `column` of the header row.
#[must_use]
pub fn tab_at(column: u16) -> Option<usize> {
    let mut x = text_width(&logo_text()) + text_width(glyphs::SEP_RIGHT) + 1;
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let width = text_width(&tab_label(i, *tab));
        if column >= x && column < x + width {
            return Some(i);
        }
        x += width + 1;
    }
    None
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let logo_bg = theme.header_logo.bg.unwrap_or(Color::Reset);
        let base_bg = theme.header.bg.unwrap_or(Color::Reset);

        let mut spans = vec![
            Span::styled(logo_text(), theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(logo_bg).bg(base_bg)),
            Span::styled(" ", theme.header),
        ];
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let style = if *tab == state.tab {
                theme.tab_active
            } else {
                theme.tab_inactive
            };
            spans.push(Span::styled(tab_label(i, *tab), style));
            spans.push(Span::styled(" ", theme.header));
        }
        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);

        let mut stats = vec![Span::styled(
            format!(
                " {} entries  {} {} ",
                state.catalogs.total_entries(),
                glyphs::STAR,
                state.favorites.len()
            ),
            theme.header_stats,
        )];
        if !state.load_warnings.is_empty() {
            stats.insert(
                0,
                Span::styled(
                    format!(" {} warnings ", state.load_warnings.len()),
                    theme.header_warn,
                ),
            );
        }
        let stats = Line::from(stats);
        let width = (stats.width() as u16).min(area.width);
        let stats_area = Rect {
            x: area.right().saturating_sub(width),
            width,
            ..area
        };
        // Only when it does not cover the tabs.
        let tabs_end = tab_end();
        if stats_area.x >= area.x + tabs_end {
            Paragraph::new(stats).render(stats_area, buf);
        }
    }
}

fn tab_end() -> u16 {
    let mut x = text_width(&logo_text()) + text_width(glyphs::SEP_RIGHT) + 1;
    for (i, tab) in Tab::ALL.iter().enumerate() {
        x += text_width(&tab_label(i, *tab)) + 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogKind;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_tab_hit_testing_matches_rendering() {
        let state = AppState::default();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(160, 1)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    Header {
                        state: &state,
                        theme: &theme,
                    },
                    f.area(),
                );
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let row: String = (0..160).map(|x| buffer[(x, 0)].symbol().to_string()).collect();

        let col = row.find("Creatures").unwrap();
        let column = row[..col].chars().count() as u16;
        assert_eq!(tab_at(column), Some(Tab::Catalog(CatalogKind::Creatures).index()));
        assert_eq!(tab_at(0), None);
        assert!(row.contains("0 entries"));
    }
}
