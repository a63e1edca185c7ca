use tracing::info;

use super::navigation::{clamp_favorites, switch_tab};
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, InputState, StatusLevel, Tab},
};
use crate::domain::{
    favorites::Favorite,
    models::CatalogKind,
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::AddFavoriteIntent => {
            begin_add(state);
            UpdateResult::Handled(None)
        }
        Action::AddFavorite(description) => UpdateResult::Handled(add(state, description)),
        Action::RemoveFavorite => UpdateResult::Handled(remove(state)),
        Action::UseFavorite => UpdateResult::Handled(use_favorite(state)),
        Action::CycleFavoritesFilter => {
            state.favorites_filter = match state.favorites_filter {
                None => Some(CatalogKind::ALL[0]),
                Some(kind) => CatalogKind::ALL.get(kind.index() + 1).copied(),
            };
            clamp_favorites(state);
            let label = state.favorites_filter.map_or("All", CatalogKind::title);
            state.set_status(format!("Favorites: {label}"), StatusLevel::Info);
            UpdateResult::Handled(None)
        }
        Action::FavoritesSaved(Ok(message)) => {
            state.set_status(message.clone(), StatusLevel::Success);
            UpdateResult::Handled(None)
        }
        Action::FavoritesSaved(Err(e)) => {
            state.set_status(format!("Failed to save favorites: {e}"), StatusLevel::Error);
            UpdateResult::Handled(None)
        }
        Action::CancelMode if state.mode == AppMode::FavoriteInput => {
            state.pending_favorite = None;
            state.input = None;
            state.mode = AppMode::Normal;
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Opens the description prompt for the current selection.
fn begin_add(state: &mut AppState) {
    let Some((kind, label)) = state
        .tab
        .kind()
        .zip(state.selected_entry().map(|e| e.label().to_string()))
    else {
        state.set_status("Nothing to add", StatusLevel::Info);
        return;
    };

    let command = if kind == CatalogKind::Taming {
        state.selected_entry().map(|e| e.id().to_string())
    } else {
        match state.preview() {
            Some(Ok(command)) => Some(command),
            Some(Err(e)) => {
                state.set_status(format!("Cannot add favorite: {e}"), StatusLevel::Warning);
                return;
            }
            None => None,
        }
    };
    let Some(command) = command else {
        return;
    };

    if state.favorites.contains(&command) {
        state.set_status("Already a favorite", StatusLevel::Info);
        return;
    }
    state.input = Some(InputState::new(&Favorite::default_description(kind, &label)));
    state.pending_favorite = Some((command, kind));
    state.mode = AppMode::FavoriteInput;
}

fn add(state: &mut AppState, description: &str) -> Option<Command> {
    let fallback = state.input.take().map(|i| i.previous);
    state.mode = AppMode::Normal;
    let (command, kind) = state.pending_favorite.take()?;

    let description = match description.trim() {
        "" => fallback.unwrap_or_else(|| command.clone()),
        d => d.to_string(),
    };
    if !state.favorites.add(Favorite::new(command, description.clone(), kind)) {
        state.set_status("Already a favorite", StatusLevel::Info);
        return None;
    }
    info!(description = %description, "added favorite");
    clamp_favorites(state);
    save_command(state, format!("Added favorite: {description}"))
}

fn remove(state: &mut AppState) -> Option<Command> {
    if state.tab != Tab::Favorites {
        return None;
    }
    let favorite = state.selected_favorite()?.clone();
    state.favorites.remove(&favorite.command);
    clamp_favorites(state);
    save_command(state, format!("Removed favorite: {}", favorite.description))
}

/// Copies the selected favorite, or jumps to the creature of a taming favorite.
pub fn use_favorite(state: &mut AppState) -> Option<Command> {
    let favorite = state.selected_favorite()?.clone();
    if favorite.tab == CatalogKind::Taming {
        show_taming_entry(state, &favorite.command);
        return None;
    }

    state.last_generated = Some(favorite.command.clone());
    if state.auto_copy {
        Some(Command::CopyToClipboard(favorite.command))
    } else {
        state.set_status(format!("Selected: {}", favorite.command), StatusLevel::Info);
        None
    }
}

fn show_taming_entry(state: &mut AppState, name: &str) {
    switch_tab(state, Tab::Catalog(CatalogKind::Taming).index());
    let found = state.active_mut().is_some_and(|(view, catalog)| {
        view.set_query(catalog, String::new());
        let pos = view
            .visible
            .iter()
            .position(|&i| catalog.get(i).is_some_and(|e| e.id() == name));
        if let Some(pos) = pos {
            view.select(catalog, pos);
        }
        pos.is_some()
    });
    if found {
        state.set_status(format!("Showing {name}"), StatusLevel::Info);
    } else {
        state.set_status(
            format!("{name} is not in the taming catalog"),
            StatusLevel::Warning,
        );
    }
}

fn save_command(state: &mut AppState, message: String) -> Option<Command> {
    match &state.favorites_path {
        Some(path) => Some(Command::SaveFavorites {
            path: path.clone(),
            favorites: state.favorites.clone(),
            message,
        }),
        None => {
            state.set_status(format!("{message} (session only)"), StatusLevel::Warning);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::favorites::Favorites;
    use crate::domain::models::{Catalog, CatalogEntry, CatalogSet};
    use std::path::PathBuf;

    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([
            Catalog::new(
                CatalogKind::Creatures,
                vec![CatalogEntry::new("Rex_Character_BP_C", "Rex")],
            ),
            Catalog::new(
                CatalogKind::Taming,
                vec![
                    CatalogEntry::new("Achatina", "Achatina"),
                    CatalogEntry::new("Rex", "Rex").with_field("feed", "Exceptional Kibble"),
                ],
            ),
        ]));
        state.favorites_path = Some(PathBuf::from("/tmp/cheatgen-favorites.toml"));
        state.tab = Tab::Catalog(CatalogKind::Creatures);
        state
    }

    #[test]
    fn test_add_with_prefilled_description() {
        let mut state = state();
        update(&mut state, &Action::AddFavoriteIntent);
        assert_eq!(state.mode, AppMode::FavoriteInput);
        assert_eq!(
            state.input.as_ref().unwrap().text_area.text(),
            "Creatures - Rex"
        );

        let result = update(&mut state, &Action::AddFavorite("   ".to_string()));
        let UpdateResult::Handled(Some(Command::SaveFavorites { favorites, .. })) = result else {
            panic!("expected a save command");
        };
        let saved = favorites.list(None);
        assert_eq!(saved[0].command, "admincheat Summon Rex_Character_BP_C");
        assert_eq!(saved[0].description, "Creatures - Rex");
        assert_eq!(state.mode, AppMode::Normal);

        update(&mut state, &Action::AddFavoriteIntent);
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.status_message.as_deref(), Some("Already a favorite"));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut state = state();
        update(&mut state, &Action::AddFavoriteIntent);
        update(&mut state, &Action::CancelMode);
        assert!(state.pending_favorite.is_none());
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_use_and_remove_on_favorites_tab() {
        let mut state = state();
        state.favorites = Favorites::new(vec![Favorite::new(
            "cheat fly",
            "Commands - Fly",
            CatalogKind::Commands,
        )]);
        switch_tab(&mut state, Tab::Favorites.index());

        let result = update(&mut state, &Action::UseFavorite);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::CopyToClipboard(ref s))) if s == "cheat fly"
        ));

        let result = update(&mut state, &Action::RemoveFavorite);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::SaveFavorites { .. }))
        ));
        assert!(state.favorites.is_empty());
        assert_eq!(state.favorites_list.selected(), None);
    }

    #[test]
    fn test_taming_favorite_selects_creature() {
        let mut state = state();
        state.favorites = Favorites::new(vec![Favorite::new(
            "Rex",
            "Taming - Rex",
            CatalogKind::Taming,
        )]);
        state.view_mut(CatalogKind::Taming).query = "acha".to_string();
        switch_tab(&mut state, Tab::Favorites.index());

        let result = update(&mut state, &Action::UseFavorite);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert_eq!(state.tab, Tab::Catalog(CatalogKind::Taming));
        assert_eq!(state.selected_entry().unwrap().field("feed"), Some("Exceptional Kibble"));
    }

    #[test]
    fn test_cycle_filter_and_session_only_save() {
        let mut state = state();
        state.favorites_path = None;
        state.favorites = Favorites::new(vec![
            Favorite::new("cheat fly", "Fly", CatalogKind::Commands),
            Favorite::new("Rex", "Rex", CatalogKind::Taming),
        ]);
        for _ in 0..3 {
            update(&mut state, &Action::CycleFavoritesFilter);
        }
        assert_eq!(state.favorites_filter, Some(CatalogKind::Taming));
        assert_eq!(state.visible_favorites().len(), 1);
        for _ in 0..4 {
            update(&mut state, &Action::CycleFavoritesFilter);
        }
        assert_eq!(state.favorites_filter, None);

        switch_tab(&mut state, Tab::Favorites.index());
        let result = update(&mut state, &Action::RemoveFavorite);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert_eq!(state.status_level, StatusLevel::Warning);
        assert_eq!(state.favorites.len(), 1);
    }
}
