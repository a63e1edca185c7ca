use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::models::CatalogKind;

/// A saved command. For the taming tab `command` holds the creature name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub command: String,
    pub description: String,
    pub tab: CatalogKind,
    pub created: DateTime<Local>,
}

impl Favorite {
    pub fn new(command: impl Into<String>, description: impl Into<String>, tab: CatalogKind) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            tab,
            created: Local::now(),
        }
    }

    /// Prompt text offered when saving `label` from `tab`.
    #[must_use]
    pub fn default_description(tab: CatalogKind, label: &str) -> String {
        format!("{} - {label}", tab.title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    #[serde(default, rename = "favorite")]
    entries: Vec<Favorite>,
}

impl Favorites {
    pub fn new(entries: Vec<Favorite>) -> Self {
        Self { entries }
    }

    /// Appends `favorite` unless one with the same command exists.
    pub fn add(&mut self, favorite: Favorite) -> bool {
        if self.contains(&favorite.command) {
            return false;
        }
        self.entries.push(favorite);
        true
    }

    pub fn remove(&mut self, command: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|f| f.command != command);
        self.entries.len() < before
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.iter().any(|f| f.command == command)
    }

    /// Favorites in insertion order, optionally only those saved from `tab`.
    pub fn list(&self, tab: Option<CatalogKind>) -> Vec<&Favorite> {
        self.entries
            .iter()
            .filter(|f| tab.map_or(true, |t| f.tab == t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ignores_duplicate_commands() {
        let mut favs = Favorites::default();
        assert!(favs.add(Favorite::new(
            "admincheat Summon Rex_Character_BP_C",
            "Creatures - Rex",
            CatalogKind::Creatures
        )));
        assert!(!favs.add(Favorite::new(
            "admincheat Summon Rex_Character_BP_C",
            "my rex",
            CatalogKind::Creatures
        )));
        assert_eq!(favs.len(), 1);
        assert_eq!(favs.list(None)[0].description, "Creatures - Rex");
    }

    #[test]
    fn test_list_by_tab_and_remove() {
        let mut favs = Favorites::new(vec![
            Favorite::new("cheat fly", "Commands - Fly", CatalogKind::Commands),
            Favorite::new("Achatina", "Taming - Achatina", CatalogKind::Taming),
            Favorite::new("cheat god", "Commands - God", CatalogKind::Commands),
        ]);
        let commands: Vec<_> = favs
            .list(Some(CatalogKind::Commands))
            .iter()
            .map(|f| f.command.as_str())
            .collect();
        assert_eq!(commands, vec!["cheat fly", "cheat god"]);
        assert!(favs.list(Some(CatalogKind::Items)).is_empty());

        assert!(favs.remove("cheat fly"));
        assert!(!favs.remove("cheat fly"));
        assert_eq!(favs.len(), 2);
    }

    #[test]
    fn test_default_description() {
        assert_eq!(
            Favorite::default_description(CatalogKind::Colors, "Teal"),
            "Dino Color - Teal"
        );
    }

    #[test]
    fn test_toml_shape() {
        let favs = Favorites::new(vec![Favorite::new(
            "cheat gfi PrimalItem_WeaponRifle 1 1 false",
            "Items - Rifle",
            CatalogKind::Items,
        )]);
        let text = toml::to_string(&favs).unwrap();
        assert!(text.contains("[[favorite]]"));
        assert!(text.contains("tab = \"items\""));
        let back: Favorites = toml::from_str(&text).unwrap();
        assert_eq!(back, favs);
    }
}
