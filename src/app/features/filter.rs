use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, InputState},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::EnterFilterMode => {
            let Some((view, _)) = state.active() else {
                return UpdateResult::Handled(None);
            };
            state.input = Some(InputState::new(&view.query));
            state.mode = AppMode::FilterInput;
            UpdateResult::Handled(None)
        }
        Action::ApplyFilter => {
            state.mode = AppMode::Normal;
            state.input = None;
            UpdateResult::Handled(None)
        }
        Action::CancelMode if state.mode == AppMode::FilterInput => {
            let previous = state.input.take().map(|i| i.previous).unwrap_or_default();
            if let Some((view, catalog)) = state.active_mut() {
                view.set_query(catalog, previous);
            }
            state.mode = AppMode::Normal;
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Re-filters the active tab with the text currently in the filter bar.
pub fn sync_query(state: &mut AppState) {
    let Some(query) = state.input.as_ref().map(|i| i.text_area.text()) else {
        return;
    };
    if let Some((view, catalog)) = state.active_mut() {
        if view.query != query {
            view.set_query(catalog, query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Tab;
    use crate::domain::models::{Catalog, CatalogEntry, CatalogKind, CatalogSet};

    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Items,
            vec![
                CatalogEntry::new("PrimalItemResource_Metal", "Metal"),
                CatalogEntry::new("PrimalItemResource_MetalIngot", "Metal Ingot"),
                CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle"),
            ],
        )]));
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        if let Some(input) = &mut state.input {
            input.text_area.insert_str(text);
        }
        sync_query(state);
    }

    #[test]
    fn test_live_filter_then_apply() {
        let mut state = state();
        update(&mut state, &Action::EnterFilterMode);
        assert_eq!(state.mode, AppMode::FilterInput);

        type_text(&mut state, "ingot");
        assert_eq!(state.view(CatalogKind::Items).visible, vec![1]);

        update(&mut state, &Action::ApplyFilter);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.input.is_none());
        assert_eq!(state.view(CatalogKind::Items).query, "ingot");
    }

    #[test]
    fn test_cancel_restores_previous_query() {
        let mut state = state();
        update(&mut state, &Action::EnterFilterMode);
        type_text(&mut state, "rif");
        update(&mut state, &Action::ApplyFilter);

        update(&mut state, &Action::EnterFilterMode);
        type_text(&mut state, "zzz");
        assert!(state.view(CatalogKind::Items).visible.is_empty());

        update(&mut state, &Action::CancelMode);
        assert_eq!(state.view(CatalogKind::Items).query, "rif");
        assert_eq!(state.selected_entry().unwrap().label(), "Rifle");
    }

    #[test]
    fn test_filter_is_per_tab_and_not_on_favorites() {
        let mut state = state();
        update(&mut state, &Action::EnterFilterMode);
        type_text(&mut state, "metal");
        update(&mut state, &Action::ApplyFilter);
        assert!(state.view(CatalogKind::Creatures).query.is_empty());

        state.tab = Tab::Favorites;
        update(&mut state, &Action::EnterFilterMode);
        assert_eq!(state.mode, AppMode::Normal);
    }
}
