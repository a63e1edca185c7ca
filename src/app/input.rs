use crate::app::{
    action::Action,
    state::{AppMode, AppState, Tab},
    ui,
};
use crate::components::{catalog_list::list_rows, header::tab_at};
use crate::domain::params::FieldKind;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};
use std::time::{Duration, Instant};

const DOUBLE_CLICK: Duration = Duration::from_millis(500);

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }
    if let Event::Resize(w, h) = event {
        return Some(Action::Resize(w, h));
    }

    // The error modal swallows everything but its dismiss keys.
    if app_state.last_error.is_some() {
        return match event {
            Event::Key(key) if matches!(key.code, KeyCode::Esc | KeyCode::Enter) => {
                Some(Action::CancelMode)
            }
            _ => None,
        };
    }

    match (app_state.mode, event) {
        (AppMode::FilterInput, Event::Key(key)) => Some(match key.code {
            KeyCode::Enter => Action::ApplyFilter,
            KeyCode::Esc => Action::CancelMode,
            KeyCode::Up => Action::SelectPrev,
            KeyCode::Down => Action::SelectNext,
            _ => Action::TextAreaInput(key),
        }),
        (AppMode::ParamEdit, Event::Key(key)) => Some(map_param_key(key, app_state)),
        (AppMode::ParamEdit, Event::Mouse(mouse)) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::PrevField),
            MouseEventKind::ScrollDown => Some(Action::NextField),
            _ => None,
        },
        (AppMode::FavoriteInput, Event::Key(key)) => Some(match key.code {
            KeyCode::Enter => Action::AddFavorite(
                app_state
                    .input
                    .as_ref()
                    .map(|i| i.text_area.text())
                    .unwrap_or_default(),
            ),
            KeyCode::Esc => Action::CancelMode,
            _ => Action::TextAreaInput(key),
        }),
        (AppMode::Help, Event::Key(key)) => match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
            _ => None,
        },
        (AppMode::ThemeSelection, Event::Key(key)) => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectThemeNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectThemePrev),
            KeyCode::Enter => Some(Action::ConfirmTheme),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CancelMode),
            _ => None,
        },
        (AppMode::Normal, Event::Key(key)) => app_state.keymap.get_action(key),
        (AppMode::Normal, Event::Mouse(mouse)) => map_mouse(mouse, app_state, terminal_size),
        _ => None,
    }
}

fn map_param_key(key: KeyEvent, app_state: &AppState<'_>) -> Action {
    let cyclable = app_state
        .active()
        .and_then(|(view, _)| view.form.focused_spec())
        .is_some_and(|spec| matches!(spec.kind, FieldKind::Flag | FieldKind::Choice(_)));

    match key.code {
        KeyCode::Esc => Action::CancelMode,
        KeyCode::Enter => Action::Generate,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Left if cyclable => Action::CycleField(false),
        KeyCode::Right | KeyCode::Char(' ') if cyclable => Action::CycleField(true),
        _ => Action::TextAreaInput(key),
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, terminal_size: Size) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::SelectPrev),
        MouseEventKind::ScrollDown => Some(Action::SelectNext),
        MouseEventKind::Down(MouseButton::Left) => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let layout = ui::get_layout(area);

            if layout.header.height > 0 && mouse.row == layout.header.y {
                return tab_at(mouse.column).map(Action::SwitchTab);
            }

            let rows = list_rows(layout.list);
            let inside = mouse.column >= rows.x
                && mouse.column < rows.right()
                && mouse.row >= rows.y
                && mouse.row < rows.bottom();
            if !inside {
                return None;
            }

            let is_double_click = app_state
                .last_click_time
                .is_some_and(|t| t.elapsed() < DOUBLE_CLICK)
                && app_state.last_click_pos == Some((mouse.column, mouse.row));
            if is_double_click {
                return Some(Action::Generate);
            }

            let offset = match app_state.tab {
                Tab::Favorites => app_state.favorites_list.offset(),
                Tab::Catalog(kind) => app_state.view(kind).list_state.offset(),
            };
            Some(Action::SelectIndex(offset + (mouse.row - rows.y) as usize))
        }
        _ => None,
    }
}

/// Records a left click so the next one can be recognized as a double click.
pub fn track_click(app_state: &mut AppState<'_>, event: &Event) {
    if let Event::Mouse(mouse) = event {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            app_state.last_click_time = Some(Instant::now());
            app_state.last_click_pos = Some((mouse.column, mouse.row));
        }
    }
}
