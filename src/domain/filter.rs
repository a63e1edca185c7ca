use super::models::{Catalog, CatalogEntry};

/// Indices of the entries whose label contains `query`, case-insensitively,
/// in catalog order. An empty query keeps everything.
#[must_use]
pub fn filter_indices(catalog: &Catalog, query: &str) -> Vec<usize> {
    filter_indices_with(catalog, query, &[])
}

/// Like [`filter_indices`], but an entry also matches when one of
/// `extra_fields` contains the query.
#[must_use]
pub fn filter_indices_with(catalog: &Catalog, query: &str, extra_fields: &[&str]) -> Vec<usize> {
    if query.is_empty() {
        return (0..catalog.len()).collect();
    }

    let needle = query.to_lowercase();
    catalog
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches(entry, &needle, extra_fields))
        .map(|(i, _)| i)
        .collect()
}

#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a CatalogEntry> {
    filter_indices(catalog, query)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .collect()
}

fn matches(entry: &CatalogEntry, needle: &str, extra_fields: &[&str]) -> bool {
    if entry.label().to_lowercase().contains(needle) {
        return true;
    }
    extra_fields
        .iter()
        .filter_map(|f| entry.field(f))
        .any(|v| v.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogKind;
    use rand::{Rng, SeedableRng};

    fn creatures() -> Catalog {
        Catalog::new(
            CatalogKind::Creatures,
            vec![
                CatalogEntry::new("Raptor_Character_BP_C", "Raptor"),
                CatalogEntry::new("Rex_Character_BP_C", "Rex"),
                CatalogEntry::new("Dodo_Character_BP_C", "Dodo"),
                CatalogEntry::new("Para_Character_BP_C", "Parasaur"),
                CatalogEntry::new("Ptero_Character_BP_C", "Pteranodon"),
            ],
        )
    }

    #[test]
    fn test_empty_query_returns_catalog() {
        let catalog = creatures();
        let all: Vec<_> = catalog.entries().iter().collect();
        assert_eq!(filter(&catalog, ""), all);
        assert!(filter(&catalog, "   ").is_empty());
    }

    #[test]
    fn test_case_insensitive_and_ordered() {
        let catalog = creatures();
        let labels: Vec<_> = filter(&catalog, "RA").iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Raptor", "Parasaur", "Pteranodon"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_indices(&creatures(), "giga").is_empty());
    }

    #[test]
    fn test_extra_fields() {
        let catalog = Catalog::new(
            CatalogKind::Commands,
            vec![
                CatalogEntry::new("Fly", "Fly").with_field("description", "Toggle flying"),
                CatalogEntry::new("God", "God").with_field("description", "Invulnerability"),
            ],
        );
        assert!(filter_indices(&catalog, "flying").is_empty());
        assert_eq!(
            filter_indices_with(&catalog, "flying", &["description"]),
            vec![0]
        );
        assert_eq!(filter_indices_with(&catalog, "god", &["description"]), vec![1]);
    }

    #[test]
    fn test_random_queries_yield_ordered_subsequence() {
        let catalog = creatures();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let alphabet: Vec<char> = "aAeEoOrRpPtTxX ".chars().collect();

        for _ in 0..500 {
            let len = rng.gen_range(0..4);
            let query: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();

            let first = filter_indices(&catalog, &query);
            assert_eq!(first, filter_indices(&catalog, &query));
            assert!(first.windows(2).all(|w| w[0] < w[1]));

            let needle = query.to_lowercase();
            for i in first {
                let label = catalog.get(i).unwrap().label().to_lowercase();
                assert!(label.contains(&needle), "{label} !~ {needle}");
            }
        }
    }
}
