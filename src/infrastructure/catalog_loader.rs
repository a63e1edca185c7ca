use crate::domain::{
    error::LoadError,
    models::{Catalog, CatalogEntry, CatalogKind, CatalogSet},
};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which JSON keys make up an entry of each catalog.
struct Schema {
    id: &'static str,
    required: &'static [&'static str],
    sorted: bool,
}

const LABEL_FIELD: &str = "name";

fn schema(kind: CatalogKind) -> Schema {
    match kind {
        CatalogKind::Items => Schema {
            id: "id",
            required: &[],
            sorted: true,
        },
        CatalogKind::Creatures => Schema {
            id: "class",
            required: &[],
            sorted: true,
        },
        CatalogKind::Taming => Schema {
            id: "name",
            required: &[],
            sorted: false,
        },
        CatalogKind::Locations => Schema {
            id: "code",
            required: &[],
            sorted: true,
        },
        CatalogKind::Colors => Schema {
            id: "id",
            required: &["hex"],
            sorted: false,
        },
        CatalogKind::Commands => Schema {
            id: "name",
            required: &["syntax"],
            sorted: true,
        },
    }
}

/// Result of loading every catalog. Kinds that failed are present but empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadReport {
    pub catalogs: CatalogSet,
    pub warnings: Vec<String>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn load(kind: CatalogKind, data_dir: &Path) -> Result<Catalog, LoadError> {
    let path = data_dir.join(kind.file_name());
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::Missing { kind, path });
        }
        Err(source) => return Err(LoadError::Io { kind, path, source }),
    };
    let catalog = parse(kind, &text)?;
    debug!(catalog = %kind, entries = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

/// Loads all catalogs from `data_dir`, never failing as a whole.
#[must_use]
pub fn load_all(data_dir: &Path) -> LoadReport {
    let mut catalogs = Vec::with_capacity(CatalogKind::ALL.len());
    let mut warnings = Vec::new();

    for kind in CatalogKind::ALL {
        match load(kind, data_dir) {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => {
                warn!(catalog = %kind, error = %e, "falling back to an empty catalog");
                warnings.push(e.to_string());
                catalogs.push(Catalog::empty(kind));
            }
        }
    }

    let catalogs = CatalogSet::from_catalogs(catalogs);
    info!(
        data_dir = %data_dir.display(),
        entries = catalogs.total_entries(),
        warnings = warnings.len(),
        "catalogs loaded"
    );
    LoadReport { catalogs, warnings }
}

/// Parses the JSON text of one catalog file.
pub fn parse(kind: CatalogKind, text: &str) -> Result<Catalog, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|e| LoadError::Malformed {
        kind,
        reason: e.to_string(),
    })?;
    let Value::Array(rows) = value else {
        return Err(LoadError::Malformed {
            kind,
            reason: "expected a JSON array of objects".to_string(),
        });
    };

    let schema = schema(kind);
    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let Value::Object(object) = row else {
            return Err(LoadError::Malformed {
                kind,
                reason: format!("entry #{index} is not an object"),
            });
        };
        entries.push(parse_entry(kind, &schema, index, object)?);
    }

    if schema.sorted {
        entries.sort_by(|a, b| a.label().to_lowercase().cmp(&b.label().to_lowercase()));
    }
    Ok(Catalog::new(kind, entries))
}

fn parse_entry(
    kind: CatalogKind,
    schema: &Schema,
    index: usize,
    object: &Map<String, Value>,
) -> Result<CatalogEntry, LoadError> {
    let required = |field: &'static str| {
        object
            .get(field)
            .and_then(scalar_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or(LoadError::MissingField { kind, index, field })
    };

    let id = required(schema.id)?;
    let label = required(LABEL_FIELD)?;
    for &field in schema.required {
        required(field)?;
    }

    let mut entry = CatalogEntry::new(id.trim(), label.trim());
    for (key, value) in object {
        if let Some(text) = scalar_text(value) {
            entry = entry.with_field(key.as_str(), text);
        }
    }

    if kind == CatalogKind::Locations {
        let [x, y, z] = parse_coordinates(&id).map_err(|reason| LoadError::InvalidField {
            kind,
            index,
            field: "code",
            reason,
        })?;
        entry = entry.with_field("x", x).with_field("y", y).with_field("z", z);
    }

    Ok(entry)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Splits a location code such as `"-1.5 20 300.25"` into its three axes.
fn parse_coordinates(code: &str) -> Result<[String; 3], String> {
    let parts: Vec<&str> = code.split_whitespace().collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected 3 numbers, found {}", parts.len()));
    };
    for part in [x, y, z] {
        match part.parse::<f64>() {
            Ok(n) if n.is_finite() => {}
            _ => return Err(format!("{part:?} is not a number")),
        }
    }
    Ok([(*x).to_string(), (*y).to_string(), (*z).to_string()])
}
