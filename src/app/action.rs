use crate::app::command::Command;
use crate::infrastructure::catalog_loader::LoadReport;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Navigation ---
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    SelectIndex(usize), // Row of the visible list
    NextTab,
    PrevTab,
    SwitchTab(usize),

    // --- Filter ---
    EnterFilterMode, // Open the filter bar (/)
    ApplyFilter,     // Keep the typed query (Enter)

    // --- Parameter Form ---
    EnterParamEdit,   // Focus the form (e)
    NextField,        // Tab / Down inside the form
    PrevField,        // Shift-Tab / Up inside the form
    CycleField(bool), // Toggle a flag or step a choice

    // --- Output ---
    Generate,       // Render and, with auto-copy, copy (Enter)
    CopyOutput,     // Copy the current command (y)
    ToggleAutoCopy, // (a)

    // --- Favorites ---
    AddFavoriteIntent,    // Prompt for a description (f)
    AddFavorite(String),  // Save with the given description
    RemoveFavorite,       // (d) on the favorites tab
    UseFavorite,          // (Enter) on the favorites tab
    CycleFavoritesFilter, // (t) all / per-tab

    // --- UI Mode Transitions ---
    CancelMode,                             // ESC key (close modal/mode)
    ToggleHelp,                             // Toggle the help overlay (?)
    EnterThemeSelection,                    // Open theme selection modal (T)
    SelectThemeNext,                        // Next theme in selection
    SelectThemePrev,                        // Previous theme in selection
    ConfirmTheme,                           // Apply the highlighted theme
    SwitchTheme(crate::theme::PaletteType), // Apply a new theme
    TextAreaInput(crossterm::event::KeyEvent),

    // --- Async Results ---
    ReloadCatalogs,                        // Manual reload (r)
    CatalogsLoaded(Box<LoadReport>),       // A complete new catalog set arrived
    ExternalChangeDetected,                // Data directory changed on disk
    CopyCompleted(Result<String, String>), // Copied text or failure message
    FavoritesSaved(Result<String, String>),
    ErrorOccurred(String),
}
