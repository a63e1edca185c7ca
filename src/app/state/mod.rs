use super::keymap::{KeyConfig, KeyMap};
use crate::domain::{
    console::Pickers,
    error::RenderError,
    favorites::{Favorite, Favorites},
    models::{Catalog, CatalogEntry, CatalogKind, CatalogSet},
};
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod catalog_view;
pub mod error;
pub mod form;
pub mod input;
pub mod theme;

// Re-exports
pub use catalog_view::CatalogView;
pub use error::{ErrorSeverity, ErrorState};
pub use form::ParamForm;
pub use input::{AppTextArea, InputState};
pub use theme::ThemeSelectionState;

/// How long a status message stays in the footer.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Browsing the active tab
    FilterInput,    // Typing a filter query
    ParamEdit,      // Editing the parameter form
    FavoriteInput,  // Describing a new favorite
    Help,           // Showing the help overlay
    ThemeSelection, // Choosing a UI theme
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tab {
    Catalog(CatalogKind),
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Catalog(CatalogKind::Items),
        Tab::Catalog(CatalogKind::Creatures),
        Tab::Catalog(CatalogKind::Taming),
        Tab::Catalog(CatalogKind::Locations),
        Tab::Catalog(CatalogKind::Colors),
        Tab::Catalog(CatalogKind::Commands),
        Tab::Favorites,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Tab::Catalog(kind) => kind.title(),
            Tab::Favorites => "Favorites",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Tab::Catalog(kind) => kind.index(),
            Tab::Favorites => CatalogKind::ALL.len(),
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    #[must_use]
    pub fn kind(self) -> Option<CatalogKind> {
        match self {
            Tab::Catalog(kind) => Some(kind),
            Tab::Favorites => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub status_level: StatusLevel,
    pub status_clear_time: Option<Instant>,

    // --- Catalogs (replaced wholesale on reload) ---
    pub catalogs: CatalogSet,
    pub data_dir: Option<PathBuf>,
    pub load_warnings: Vec<String>,
    pub is_reloading: bool,

    // --- Browsing ---
    pub tab: Tab,
    pub views: Vec<CatalogView>,

    // --- Output ---
    pub last_generated: Option<String>,
    pub auto_copy: bool,

    // --- Favorites ---
    pub favorites: Favorites,
    pub favorites_path: Option<PathBuf>,
    pub favorites_filter: Option<CatalogKind>,
    pub favorites_list: ListState,
    pub pending_favorite: Option<(String, CatalogKind)>,

    // --- Input Handling ---
    pub input: Option<InputState<'a>>,

    // --- Click Tracking ---
    pub last_click_time: Option<Instant>,
    pub last_click_pos: Option<(u16, u16)>,

    // --- Theme Selection ---
    pub theme_selection: Option<ThemeSelectionState>,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: crate::theme::PaletteType,
    pub theme: crate::theme::Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &KeyConfig) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(config)),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_palette(mut self, palette: crate::theme::PaletteType) -> Self {
        self.palette_type = palette;
        self.theme = crate::theme::Theme::from_palette_type(palette);
        self
    }

    pub fn view(&self, kind: CatalogKind) -> &CatalogView {
        &self.views[kind.index()]
    }

    pub fn view_mut(&mut self, kind: CatalogKind) -> &mut CatalogView {
        &mut self.views[kind.index()]
    }

    /// View and catalog of the active tab, if it is a catalog tab.
    pub fn active(&self) -> Option<(&CatalogView, &Catalog)> {
        let kind = self.tab.kind()?;
        Some((self.view(kind), self.catalogs.get(kind)))
    }

    pub fn active_mut(&mut self) -> Option<(&mut CatalogView, &Catalog)> {
        let kind = self.tab.kind()?;
        Some((&mut self.views[kind.index()], self.catalogs.get(kind)))
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        let (view, catalog) = self.active()?;
        view.selected(catalog)
    }

    /// Live command for the active tab. `None` when nothing is selected or the
    /// tab produces no command.
    pub fn preview(&self) -> Option<Result<String, RenderError>> {
        let (view, catalog) = self.active()?;
        view.form.render(view.selected(catalog)?)
    }

    /// Favorites shown under the current tab filter.
    pub fn visible_favorites(&self) -> Vec<&Favorite> {
        self.favorites.list(self.favorites_filter)
    }

    pub fn selected_favorite(&self) -> Option<&Favorite> {
        let idx = self.favorites_list.selected()?;
        self.visible_favorites().get(idx).copied()
    }

    /// Swaps in a freshly loaded set, keeping each tab's selection when the
    /// selected entry survived the reload.
    pub fn replace_catalogs(&mut self, catalogs: CatalogSet) {
        let keep: Vec<Option<String>> = self
            .views
            .iter()
            .map(|v| {
                v.selected(self.catalogs.get(v.kind))
                    .map(|e| e.id().to_string())
            })
            .collect();
        self.catalogs = catalogs;
        let pickers = Pickers::from_catalogs(&self.catalogs);
        self.view_mut(CatalogKind::Commands).form.set_pickers(pickers);
        for (view, keep) in self.views.iter_mut().zip(keep) {
            view.refresh(self.catalogs.get(view.kind), keep.as_deref());
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(message.into());
        self.status_level = level;
        self.status_clear_time = Some(Instant::now() + STATUS_TTL);
    }

    pub fn clear_expired_status(&mut self, now: Instant) {
        if self.status_clear_time.is_some_and(|t| now >= t) {
            self.status_message = None;
            self.status_clear_time = None;
        }
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_level: StatusLevel::Info,
            status_clear_time: None,
            catalogs: CatalogSet::empty(),
            data_dir: None,
            load_warnings: Vec::new(),
            is_reloading: false,
            tab: Tab::Catalog(CatalogKind::Items),
            views: CatalogKind::ALL.into_iter().map(CatalogView::new).collect(),
            last_generated: None,
            auto_copy: true,
            favorites: Favorites::default(),
            favorites_path: None,
            favorites_filter: None,
            favorites_list: ListState::default(),
            pending_favorite: None,
            input: None,
            last_click_time: None,
            last_click_pos: None,
            theme_selection: None,
            frame_count: 0,
            keymap: Arc::new(KeyMap::from_config(&KeyConfig::default())),
            palette_type: crate::theme::PaletteType::CatppuccinMocha,
            theme: crate::theme::Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_items() -> AppState<'static> {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Items,
            vec![
                CatalogEntry::new("PrimalItemResource_Metal", "Metal"),
                CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle"),
            ],
        )]));
        state
    }

    #[test]
    fn test_tab_indices() {
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), i);
            assert_eq!(Tab::from_index(i), Some(*tab));
        }
        assert_eq!(Tab::from_index(7), None);
        assert_eq!(Tab::Catalog(CatalogKind::Colors).title(), "Dino Color");
    }

    #[test]
    fn test_preview_follows_selection() {
        let mut state = with_items();
        assert_eq!(
            state.preview(),
            Some(Ok("cheat gfi PrimalItemResource_Metal 1 1 false".to_string()))
        );
        let catalog = state.catalogs.get(CatalogKind::Items).clone();
        state.view_mut(CatalogKind::Items).select(&catalog, 1);
        assert_eq!(state.selected_entry().unwrap().label(), "Rifle");

        state.tab = Tab::Favorites;
        assert_eq!(state.preview(), None);
    }

    #[test]
    fn test_replace_catalogs_keeps_selection() {
        let mut state = with_items();
        let catalog = state.catalogs.get(CatalogKind::Items).clone();
        state.view_mut(CatalogKind::Items).select(&catalog, 1);

        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Items,
            vec![
                CatalogEntry::new("PrimalItemResource_Flint", "Flint"),
                CatalogEntry::new("PrimalItemResource_Metal", "Metal"),
                CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle"),
            ],
        )]));
        assert_eq!(state.selected_entry().unwrap().label(), "Rifle");
    }

    fn with_command(syntax: &str) -> AppState<'static> {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Commands,
            vec![CatalogEntry::new("AddExperience", "AddExperience").with_field("syntax", syntax)],
        )]));
        state.tab = Tab::Catalog(CatalogKind::Commands);
        state
    }

    #[test]
    fn test_reload_rebuilds_form_of_changed_command() {
        let mut state = with_command("cheat AddExperience <Amount>");
        assert_eq!(state.preview(), Some(Ok("cheat AddExperience 0".to_string())));

        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Commands,
            vec![CatalogEntry::new("AddExperience", "AddExperience")
                .with_field("syntax", "cheat AddExperience <Amount> <fromTribeShare> <preventSharing>")],
        )]));
        let form = &state.view(CatalogKind::Commands).form;
        assert_eq!(form.specs.len(), 3);
        assert_eq!(form.inputs.len(), 3);
        assert_eq!(
            state.preview(),
            Some(Err(RenderError::MissingParameter("fromtribeshare".to_string())))
        );
    }

    #[test]
    fn test_reload_keeps_inputs_of_unchanged_command() {
        let syntax = "cheat AddExperience <Amount>";
        let mut state = with_command(syntax);
        state.view_mut(CatalogKind::Commands).form.inputs[0] = "500".to_string();

        state.replace_catalogs(CatalogSet::from_catalogs([Catalog::new(
            CatalogKind::Commands,
            vec![CatalogEntry::new("AddExperience", "AddExperience").with_field("syntax", syntax)],
        )]));
        assert_eq!(state.preview(), Some(Ok("cheat AddExperience 500".to_string())));
    }

    #[test]
    fn test_give_item_form_offers_loaded_items() {
        let mut state = AppState::default();
        state.replace_catalogs(CatalogSet::from_catalogs([
            Catalog::new(
                CatalogKind::Items,
                vec![CatalogEntry::new("PrimalItemResource_Metal", "Metal")],
            ),
            Catalog::new(
                CatalogKind::Commands,
                vec![CatalogEntry::new("GFI", "GFI").with_field(
                    "syntax",
                    "cheat GFI <ItemName> <Quantity> <ItemQuality> <bForceBlueprint>",
                )],
            ),
        ]));
        state.tab = Tab::Catalog(CatalogKind::Commands);
        assert_eq!(
            state.view(CatalogKind::Commands).form.specs[0].kind,
            crate::domain::params::FieldKind::Choice(vec!["PrimalItemResource_Metal".to_string()])
        );
        assert_eq!(
            state.preview(),
            Some(Ok("cheat GFI PrimalItemResource_Metal 1 0 0".to_string()))
        );
    }

    #[test]
    fn test_status_expires() {
        let mut state = AppState::default();
        state.set_status("Copied", StatusLevel::Success);
        state.clear_expired_status(Instant::now());
        assert!(state.status_message.is_some());
        state.clear_expired_status(Instant::now() + STATUS_TTL + Duration::from_millis(1));
        assert!(state.status_message.is_none());
    }
}
