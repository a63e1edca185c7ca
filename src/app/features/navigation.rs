use crate::app::{
    action::{Action, UpdateResult},
    state::{catalog_view::calculate_new_index, AppMode, AppState, Tab},
};

const PAGE: isize = 10;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SelectNext => move_selection(state, 1),
        Action::SelectPrev => move_selection(state, -1),
        Action::PageDown => jump_selection(state, PAGE),
        Action::PageUp => jump_selection(state, -PAGE),
        Action::SelectFirst => jump_selection(state, isize::MIN / 2),
        Action::SelectLast => jump_selection(state, isize::MAX / 2),
        Action::SelectIndex(pos) => {
            if let Some((view, catalog)) = state.active_mut() {
                view.select(catalog, *pos);
            } else if *pos < state.visible_favorites().len() {
                state.favorites_list.select(Some(*pos));
            }
        }
        Action::NextTab => {
            let next = (state.tab.index() + 1) % Tab::ALL.len();
            switch_tab(state, next);
        }
        Action::PrevTab => {
            let prev = (state.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
            switch_tab(state, prev);
        }
        Action::SwitchTab(index) => switch_tab(state, *index),
        _ => return UpdateResult::NotHandled,
    }
    UpdateResult::Handled(None)
}

fn move_selection(state: &mut AppState, delta: isize) {
    if let Some((view, catalog)) = state.active_mut() {
        view.move_by(catalog, delta);
        return;
    }
    let len = state.visible_favorites().len();
    if len > 0 {
        let next = calculate_new_index(state.favorites_list.selected(), delta, len);
        state.favorites_list.select(Some(next));
    }
}

fn jump_selection(state: &mut AppState, delta: isize) {
    if let Some((view, catalog)) = state.active_mut() {
        view.jump_by(catalog, delta);
        return;
    }
    let len = state.visible_favorites().len();
    if len > 0 {
        let current = state.favorites_list.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        state.favorites_list.select(Some(next));
    }
}

pub fn switch_tab(state: &mut AppState, index: usize) {
    let Some(tab) = Tab::from_index(index) else {
        return;
    };
    state.tab = tab;
    state.mode = AppMode::Normal;
    state.input = None;
    if tab == Tab::Favorites {
        clamp_favorites(state);
    }
}

/// Keeps the favorites selection inside the visible list.
pub fn clamp_favorites(state: &mut AppState) {
    let len = state.visible_favorites().len();
    let selected = match state.favorites_list.selected() {
        _ if len == 0 => None,
        Some(i) => Some(i.min(len - 1)),
        None => Some(0),
    };
    state.favorites_list.select(selected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::favorites::{Favorite, Favorites};
    use crate::domain::models::{Catalog, CatalogEntry, CatalogKind, CatalogSet};

    fn state_with_creatures() -> AppState<'static> {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Creatures,
            (0..25)
                .map(|i| CatalogEntry::new(format!("Dino{i:02}_C"), format!("Dino {i:02}")))
                .collect(),
        )]));
        state.tab = Tab::Catalog(CatalogKind::Creatures);
        state
    }

    fn selected(state: &AppState) -> Option<usize> {
        state.view(CatalogKind::Creatures).list_state.selected()
    }

    #[test]
    fn test_select_wraps_and_pages_clamp() {
        let mut state = state_with_creatures();
        update(&mut state, &Action::SelectPrev);
        assert_eq!(selected(&state), Some(24));
        update(&mut state, &Action::SelectNext);
        assert_eq!(selected(&state), Some(0));

        update(&mut state, &Action::PageDown);
        update(&mut state, &Action::PageDown);
        update(&mut state, &Action::PageDown);
        assert_eq!(selected(&state), Some(24));
        update(&mut state, &Action::PageUp);
        assert_eq!(selected(&state), Some(14));

        update(&mut state, &Action::SelectFirst);
        assert_eq!(selected(&state), Some(0));
        update(&mut state, &Action::SelectLast);
        assert_eq!(selected(&state), Some(24));
        update(&mut state, &Action::SelectIndex(3));
        assert_eq!(state.selected_entry().unwrap().id(), "Dino03_C");
    }

    #[test]
    fn test_tabs_cycle() {
        let mut state = AppState::default();
        update(&mut state, &Action::PrevTab);
        assert_eq!(state.tab, Tab::Favorites);
        update(&mut state, &Action::NextTab);
        assert_eq!(state.tab, Tab::Catalog(CatalogKind::Items));
        update(&mut state, &Action::SwitchTab(5));
        assert_eq!(state.tab, Tab::Catalog(CatalogKind::Commands));
        update(&mut state, &Action::SwitchTab(42));
        assert_eq!(state.tab, Tab::Catalog(CatalogKind::Commands));
    }

    #[test]
    fn test_favorites_navigation() {
        let mut state = AppState::default();
        state.favorites = Favorites::new(vec![
            Favorite::new("cheat fly", "Fly", CatalogKind::Commands),
            Favorite::new("cheat god", "God", CatalogKind::Commands),
        ]);
        update(&mut state, &Action::SwitchTab(6));
        assert_eq!(state.favorites_list.selected(), Some(0));
        update(&mut state, &Action::SelectPrev);
        assert_eq!(state.selected_favorite().unwrap().command, "cheat god");
        update(&mut state, &Action::SelectIndex(9));
        assert_eq!(state.favorites_list.selected(), Some(1));
    }

    #[test]
    fn test_navigation_on_empty_catalog() {
        let mut state = AppState::default();
        update(&mut state, &Action::SelectNext);
        update(&mut state, &Action::SelectLast);
        assert!(state.selected_entry().is_none());
    }
}
