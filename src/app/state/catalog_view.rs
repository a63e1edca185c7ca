use ratatui::widgets::ListState;

use super::form::ParamForm;
use crate::domain::{
    filter::{filter_indices, filter_indices_with},
    models::{Catalog, CatalogEntry, CatalogKind},
};

/// Extra metadata searched by the commands filter.
const COMMAND_SEARCH_FIELDS: [&str; 1] = ["description"];

/// Filter, selection and form of one catalog tab.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub kind: CatalogKind,
    pub query: String,
    /// Catalog indices matching `query`, in catalog order.
    pub visible: Vec<usize>,
    pub list_state: ListState,
    pub form: ParamForm,
}

impl CatalogView {
    #[must_use]
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            query: String::new(),
            visible: Vec::new(),
            list_state: ListState::default(),
            form: ParamForm::for_kind(kind),
        }
    }

    /// Re-runs the filter against `catalog`, keeping the entry `keep_id` selected
    /// when it is still visible and clamping the selection otherwise.
    pub fn refresh(&mut self, catalog: &Catalog, keep_id: Option<&str>) {
        self.visible = if self.kind == CatalogKind::Commands {
            filter_indices_with(catalog, &self.query, &COMMAND_SEARCH_FIELDS)
        } else {
            filter_indices(catalog, &self.query)
        };

        let kept = keep_id.and_then(|id| {
            self.visible
                .iter()
                .position(|&i| catalog.get(i).is_some_and(|e| e.id() == id))
        });
        let selected = if self.visible.is_empty() {
            None
        } else {
            let last = self.visible.len() - 1;
            Some(kept.unwrap_or_else(|| self.list_state.selected().unwrap_or(0).min(last)))
        };
        self.list_state.select(selected);
        self.form.follow(self.kind, self.selected(catalog));
    }

    pub fn set_query(&mut self, catalog: &Catalog, query: String) {
        let keep = self.selected(catalog).map(|e| e.id().to_string());
        self.query = query;
        self.refresh(catalog, keep.as_deref());
    }

    #[must_use]
    pub fn selected<'c>(&self, catalog: &'c Catalog) -> Option<&'c CatalogEntry> {
        let pos = self.list_state.selected()?;
        catalog.get(*self.visible.get(pos)?)
    }

    /// Selects the `pos`-th visible entry.
    pub fn select(&mut self, catalog: &Catalog, pos: usize) {
        if pos < self.visible.len() {
            self.list_state.select(Some(pos));
            self.form.follow(self.kind, self.selected(catalog));
        }
    }

    /// Moves the selection by `delta`, wrapping around at both ends.
    pub fn move_by(&mut self, catalog: &Catalog, delta: isize) {
        let pos = calculate_new_index(self.list_state.selected(), delta, self.visible.len());
        self.select(catalog, pos);
    }

    /// Moves the selection by `delta` without wrapping.
    pub fn jump_by(&mut self, catalog: &Catalog, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let pos = (current + delta).clamp(0, last as isize) as usize;
        self.select(catalog, pos);
    }
}

pub(crate) fn calculate_new_index(current: Option<usize>, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creatures() -> Catalog {
        Catalog::new(
            CatalogKind::Creatures,
            vec![
                CatalogEntry::new("Dodo_Character_BP_C", "Dodo"),
                CatalogEntry::new("Raptor_Character_BP_C", "Raptor"),
                CatalogEntry::new("Rex_Character_BP_C", "Rex"),
            ],
        )
    }

    #[test]
    fn test_query_keeps_selected_entry() {
        let catalog = creatures();
        let mut view = CatalogView::new(CatalogKind::Creatures);
        view.refresh(&catalog, None);
        view.select(&catalog, 2);

        view.set_query(&catalog, "r".to_string());
        assert_eq!(view.visible, vec![1, 2]);
        assert_eq!(view.selected(&catalog).unwrap().label(), "Rex");

        view.set_query(&catalog, "dod".to_string());
        assert_eq!(view.selected(&catalog).unwrap().label(), "Dodo");

        view.set_query(&catalog, "zzz".to_string());
        assert!(view.selected(&catalog).is_none());
        assert_eq!(view.list_state.selected(), None);
    }

    #[test]
    fn test_commands_match_description() {
        let catalog = Catalog::new(
            CatalogKind::Commands,
            vec![
                CatalogEntry::new("Fly", "Fly")
                    .with_field("syntax", "cheat fly")
                    .with_field("description", "Lets the player fly"),
                CatalogEntry::new("God", "God")
                    .with_field("syntax", "cheat god")
                    .with_field("description", "Invulnerability"),
            ],
        );
        let mut view = CatalogView::new(CatalogKind::Commands);
        view.set_query(&catalog, "PLAYER".to_string());
        assert_eq!(view.visible, vec![0]);
        assert_eq!(view.form.entry_id(), Some("Fly"));
    }

    #[test]
    fn test_navigation() {
        let catalog = creatures();
        let mut view = CatalogView::new(CatalogKind::Creatures);
        view.refresh(&catalog, None);
        assert_eq!(view.list_state.selected(), Some(0));

        view.move_by(&catalog, -1);
        assert_eq!(view.list_state.selected(), Some(2));
        view.move_by(&catalog, 1);
        assert_eq!(view.list_state.selected(), Some(0));

        view.jump_by(&catalog, 10);
        assert_eq!(view.list_state.selected(), Some(2));
        view.jump_by(&catalog, -10);
        assert_eq!(view.list_state.selected(), Some(0));

        view.select(&catalog, 7);
        assert_eq!(view.list_state.selected(), Some(0));
    }

    #[test]
    fn test_refresh_clamps_after_reload() {
        let mut view = CatalogView::new(CatalogKind::Creatures);
        let catalog = creatures();
        view.refresh(&catalog, None);
        view.select(&catalog, 2);

        let smaller = Catalog::new(
            CatalogKind::Creatures,
            vec![CatalogEntry::new("Dodo_Character_BP_C", "Dodo")],
        );
        view.refresh(&smaller, Some("Rex_Character_BP_C"));
        assert_eq!(view.list_state.selected(), Some(0));
    }

    #[test]
    fn test_calculate_new_index() {
        assert_eq!(calculate_new_index(None, 1, 5), 0);
        assert_eq!(calculate_new_index(Some(4), 1, 5), 0);
        assert_eq!(calculate_new_index(Some(0), -1, 5), 4);
        assert_eq!(calculate_new_index(Some(3), 1, 0), 0);
    }
}
