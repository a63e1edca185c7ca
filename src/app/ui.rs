use crate::app::state::{AppMode, AppState, Tab};
use crate::components::{
    catalog_list::{entry_line, favorite_line, CatalogList},
    detail_panel::{Detail, DetailPanel},
    footer::Footer,
    header::Header,
    modals::ModalManager,
    output_bar::OutputBar,
};
use crate::domain::models::CatalogKind;
use crate::theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub output: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Command preview
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main[1]);

    AppLayout {
        header: main[0],
        list: body[0],
        detail: body[1],
        output: main[2],
        footer: main[3],
    }
}

fn visible(r: Rect) -> bool {
    r.width > 0 && r.height > 0
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }
    let theme = app_state.theme.clone();
    let layout = get_layout(f.area());

    if visible(layout.header) {
        f.render_widget(
            Header {
                state: app_state,
                theme: &theme,
            },
            layout.header,
        );
    }

    if visible(layout.list) || visible(layout.detail) {
        draw_body(f, app_state, &theme, &layout);
    }

    if visible(layout.output) {
        let (preview, placeholder) = match app_state.tab {
            Tab::Favorites => (
                app_state.selected_favorite().map(|fav| Ok(fav.command.clone())),
                "No favorite selected",
            ),
            Tab::Catalog(CatalogKind::Taming) => (None, "Taming entries are reference only"),
            Tab::Catalog(_) => (app_state.preview(), "Select an entry"),
        };
        f.render_widget(
            OutputBar {
                preview,
                placeholder,
                auto_copy: app_state.auto_copy,
                theme: &theme,
            },
            layout.output,
        );
    }

    if visible(layout.footer) {
        f.render_widget(
            Footer {
                state: app_state,
                theme: &theme,
            },
            layout.footer,
        );
    }

    f.render_widget(
        ModalManager {
            theme: &theme,
            app_state,
        },
        f.area(),
    );
}

fn draw_body(f: &mut Frame, app_state: &mut AppState, theme: &Theme, layout: &AppLayout) {
    let mode = app_state.mode;
    let editing = mode == AppMode::ParamEdit;

    match app_state.tab {
        Tab::Catalog(kind) => {
            let catalog = app_state.catalogs.get(kind);
            let view = &mut app_state.views[kind.index()];
            let input = app_state.input.as_ref().map(|i| &i.text_area);

            let lines: Vec<Line> = view
                .visible
                .iter()
                .filter_map(|&i| catalog.get(i))
                .map(|entry| entry_line(kind, entry, theme))
                .collect();
            let list = CatalogList {
                title: format!(
                    "{} {}/{}",
                    kind.title().to_uppercase(),
                    view.visible.len(),
                    catalog.len()
                ),
                lines,
                query: &view.query,
                input: input.filter(|_| mode == AppMode::FilterInput),
                focused: !editing,
                theme,
            };
            f.render_stateful_widget(list, layout.list, &mut view.list_state);

            let detail = match view.selected(catalog) {
                Some(entry) => Detail::Entry {
                    kind,
                    entry,
                    form: &view.form,
                },
                None if catalog.is_empty() => Detail::Empty("Catalog not loaded"),
                None => Detail::Empty("No entry selected"),
            };
            f.render_widget(
                DetailPanel {
                    detail,
                    editor: input.filter(|_| editing),
                    focused: editing,
                    theme,
                },
                layout.detail,
            );
        }
        Tab::Favorites => {
            let favorites = app_state.favorites.list(app_state.favorites_filter);
            let filter = app_state
                .favorites_filter
                .map_or("ALL", CatalogKind::title);
            let list = CatalogList {
                title: format!("FAVORITES {} ({})", favorites.len(), filter),
                lines: favorites.iter().map(|fav| favorite_line(fav, theme)).collect(),
                query: "",
                input: None,
                focused: true,
                theme,
            };
            f.render_stateful_widget(list, layout.list, &mut app_state.favorites_list);

            let detail = match app_state.favorites_list.selected().and_then(|i| favorites.get(i)) {
                Some(fav) => Detail::Favorite(fav),
                None if favorites.is_empty() => Detail::Empty("No favorites yet; press f on an entry"),
                None => Detail::Empty("No favorite selected"),
            };
            f.render_widget(
                DetailPanel {
                    detail,
                    editor: None,
                    focused: false,
                    theme,
                },
                layout.detail,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Catalog, CatalogEntry, CatalogSet};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_layout_regions() {
        let layout = get_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.output.height, 3);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.list.y, 1);
        assert_eq!(layout.list.width + layout.detail.width, 100);
    }

    #[test]
    fn test_draw_shows_selection_and_preview() {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Items,
            vec![CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle")],
        )]));
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Rifle"));
        assert!(text.contains("cheat gfi PrimalItem_WeaponRifle 1 1 false"));
        assert!(text.contains("Quantity"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let mut state = AppState::default();
        state.mode = AppMode::Help;
        for (w, h) in [(1, 1), (5, 3), (20, 4)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| draw(f, &mut state)).unwrap();
        }
    }
}
