use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::LoadError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Items,
    Creatures,
    Taming,
    Locations,
    Colors,
    Commands,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Items,
        CatalogKind::Creatures,
        CatalogKind::Taming,
        CatalogKind::Locations,
        CatalogKind::Colors,
        CatalogKind::Commands,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CatalogKind::Items => "items",
            CatalogKind::Creatures => "creatures",
            CatalogKind::Taming => "taming",
            CatalogKind::Locations => "locations",
            CatalogKind::Colors => "colors",
            CatalogKind::Commands => "commands",
        }
    }

    /// Tab title shown in the header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            CatalogKind::Items => "Items",
            CatalogKind::Creatures => "Creatures",
            CatalogKind::Taming => "Taming",
            CatalogKind::Locations => "Locations",
            CatalogKind::Colors => "Dino Color",
            CatalogKind::Commands => "Commands",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    /// Position of the kind in [`CatalogKind::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogKind {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CatalogKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| LoadError::UnknownCatalog(s.to_string()))
    }
}

/// One selectable row of a catalog. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    id: String,
    label: String,
    fields: BTreeMap<String, String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Ordered, shared, read-only list of entries for one [`CatalogKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    kind: CatalogKind,
    entries: Arc<[CatalogEntry]>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self {
            kind,
            entries: entries.into(),
        }
    }

    pub fn empty(kind: CatalogKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn position_by_id(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }
}

/// One catalog per kind. Replaced wholesale on reload, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSet {
    catalogs: Vec<Catalog>,
}

impl CatalogSet {
    pub fn empty() -> Self {
        Self {
            catalogs: CatalogKind::ALL.into_iter().map(Catalog::empty).collect(),
        }
    }

    /// Builds a set from loaded catalogs; kinds not supplied stay empty.
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        let mut set = Self::empty();
        for catalog in catalogs {
            let idx = catalog.kind().index();
            set.catalogs[idx] = catalog;
        }
        set
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        &self.catalogs[kind.index()]
    }

    pub fn total_entries(&self) -> usize {
        self.catalogs.iter().map(Catalog::len).sum()
    }
}

impl Default for CatalogSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Items".parse::<CatalogKind>().unwrap(), CatalogKind::Items);
        assert_eq!(
            " commands ".parse::<CatalogKind>().unwrap(),
            CatalogKind::Commands
        );
        assert!(matches!(
            "weapons".parse::<CatalogKind>(),
            Err(LoadError::UnknownCatalog(name)) if name == "weapons"
        ));
    }

    #[test]
    fn test_catalog_set_slots() {
        let items = Catalog::new(
            CatalogKind::Items,
            vec![CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle")],
        );
        let set = CatalogSet::from_catalogs([items]);
        assert_eq!(set.get(CatalogKind::Items).len(), 1);
        assert!(set.get(CatalogKind::Creatures).is_empty());
        assert_eq!(set.get(CatalogKind::Colors).kind(), CatalogKind::Colors);
        assert_eq!(set.total_entries(), 1);
    }

    #[test]
    fn test_clone_shares_entries() {
        let catalog = Catalog::new(
            CatalogKind::Creatures,
            vec![CatalogEntry::new("Rex_Character_BP_C", "Rex").with_field("diet", "carnivore")],
        );
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.entries(), copy.entries()));
        assert_eq!(copy.get(0).unwrap().field("diet"), Some("carnivore"));
    }
}
