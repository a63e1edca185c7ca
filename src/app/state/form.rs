use crate::domain::{
    console,
    error::RenderError,
    models::{CatalogEntry, CatalogKind},
    params::{collect_params, form_for, ParamSpec},
    template::{render, CommandTemplate},
};

/// Parameter form of one catalog view together with the template it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamForm {
    pub specs: Vec<ParamSpec>,
    pub inputs: Vec<String>,
    pub focused: usize,
    pub template: Option<CommandTemplate>,
    /// Entry the form was built for, for kinds whose form follows the selection.
    pub source: Option<CatalogEntry>,
    pub pickers: console::Pickers,
}

impl ParamForm {
    #[must_use]
    pub fn for_kind(kind: CatalogKind) -> Self {
        let specs = form_for(kind);
        Self {
            inputs: specs.iter().map(ParamSpec::initial_input).collect(),
            specs,
            focused: 0,
            template: CommandTemplate::for_catalog(kind),
            source: None,
            pickers: console::Pickers::default(),
        }
    }

    #[must_use]
    pub fn entry_id(&self) -> Option<&str> {
        self.source.as_ref().map(CatalogEntry::id)
    }

    /// Replaces the ids offered by item and creature pickers. A change
    /// forces the next [`follow`](Self::follow) to rebuild the form.
    pub fn set_pickers(&mut self, pickers: console::Pickers) {
        if pickers != self.pickers {
            self.pickers = pickers;
            self.source = None;
        }
    }

    /// Rebuilds the form when the selection moved to another entry, or the
    /// selected entry itself changed on reload.
    /// Item and color forms keep their inputs across selections.
    pub fn follow(&mut self, kind: CatalogKind, entry: Option<&CatalogEntry>) {
        if !follows_selection(kind) || entry == self.source.as_ref() {
            return;
        }
        match (kind, entry) {
            (CatalogKind::Commands, Some(entry)) => {
                let derived = console::derive(entry, &self.pickers);
                self.inputs = derived.form.iter().map(ParamSpec::initial_input).collect();
                self.specs = derived.form;
                self.template = Some(derived.template);
            }
            (CatalogKind::Commands, None) => {
                self.specs.clear();
                self.inputs.clear();
                self.template = None;
            }
            _ => self.inputs = self.specs.iter().map(ParamSpec::initial_input).collect(),
        }
        self.focused = 0;
        self.source = entry.cloned();
    }

    #[must_use]
    pub fn focused_spec(&self) -> Option<&ParamSpec> {
        self.specs.get(self.focused)
    }

    #[must_use]
    pub fn focused_input(&self) -> &str {
        self.inputs.get(self.focused).map_or("", String::as_str)
    }

    pub fn set_focused_input(&mut self, text: String) {
        if let Some(slot) = self.inputs.get_mut(self.focused) {
            *slot = text;
        }
    }

    pub fn focus_next(&mut self) {
        if !self.specs.is_empty() {
            self.focused = (self.focused + 1) % self.specs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.specs.is_empty() {
            self.focused = (self.focused + self.specs.len() - 1) % self.specs.len();
        }
    }

    /// Toggles a flag or cycles a choice; returns false for free-form fields.
    pub fn cycle_focused(&mut self, forward: bool) -> bool {
        let Some(next) = self
            .focused_spec()
            .and_then(|spec| spec.cycle(self.focused_input(), forward))
        else {
            return false;
        };
        self.set_focused_input(next);
        true
    }

    /// Command text for `entry`; `None` when the view produces no command.
    #[must_use]
    pub fn render(&self, entry: &CatalogEntry) -> Option<Result<String, RenderError>> {
        let template = self.template.as_ref()?;
        Some(
            collect_params(&self.specs, &self.inputs)
                .and_then(|params| render(entry, template, &params)),
        )
    }
}

fn follows_selection(kind: CatalogKind) -> bool {
    matches!(kind, CatalogKind::Locations | CatalogKind::Commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_inputs_survive_selection_changes() {
        let mut form = ParamForm::for_kind(CatalogKind::Items);
        form.inputs[0] = "50".to_string();
        let rifle = CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle");
        let stone = CatalogEntry::new("PrimalItemResource_Stone", "Stone");

        form.follow(CatalogKind::Items, Some(&rifle));
        form.follow(CatalogKind::Items, Some(&stone));
        assert_eq!(
            form.render(&stone),
            Some(Ok("cheat gfi PrimalItemResource_Stone 50 1 false".to_string()))
        );
    }

    #[test]
    fn test_location_inputs_reset_per_entry() {
        let mut form = ParamForm::for_kind(CatalogKind::Locations);
        let lake = CatalogEntry::new("10 20 30", "Lake")
            .with_field("x", "10")
            .with_field("y", "20")
            .with_field("z", "30");
        let cave = CatalogEntry::new("1 2 3", "Cave")
            .with_field("x", "1")
            .with_field("y", "2")
            .with_field("z", "3");

        form.follow(CatalogKind::Locations, Some(&lake));
        form.inputs[2] = "99.5".to_string();
        assert_eq!(
            form.render(&lake),
            Some(Ok("cheat setplayerpos 10 20 99.5".to_string()))
        );

        form.follow(CatalogKind::Locations, Some(&cave));
        assert_eq!(
            form.render(&cave),
            Some(Ok("cheat setplayerpos 1 2 3".to_string()))
        );
    }

    #[test]
    fn test_command_form_is_derived_from_syntax() {
        let mut form = ParamForm::for_kind(CatalogKind::Commands);
        assert!(form.template.is_none());

        let gamma = CatalogEntry::new("SetGamma", "SetGamma").with_field("syntax", "gamma <Value>");
        form.follow(CatalogKind::Commands, Some(&gamma));
        assert_eq!(form.specs.len(), 1);
        assert!(!form.cycle_focused(true));
        form.set_focused_input("2".to_string());
        assert_eq!(form.render(&gamma), Some(Ok("gamma 2".to_string())));

        form.follow(CatalogKind::Commands, None);
        assert_eq!(form.render(&gamma), None);
    }

    #[test]
    fn test_focus_wraps_and_cycles_flags() {
        let mut form = ParamForm::for_kind(CatalogKind::Items);
        form.focus_prev();
        assert_eq!(form.focused, 2);
        assert!(form.cycle_focused(true));
        assert_eq!(form.focused_input(), "true");
        form.focus_next();
        assert_eq!(form.focused, 0);
    }

    #[test]
    fn test_taming_has_no_command() {
        let form = ParamForm::for_kind(CatalogKind::Taming);
        let entry = CatalogEntry::new("Achatina", "Achatina");
        assert_eq!(form.render(&entry), None);
    }
}
