use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState, Tab};
use crate::domain::models::CatalogKind;

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup::new(
            "ERROR",
            vec![FooterItem::new("Esc", "dismiss")],
        )];
    }

    match state.mode {
        AppMode::Normal => normal_groups(state),
        AppMode::FilterInput => vec![FooterGroup::new(
            "FILTER",
            vec![
                FooterItem::new("Enter", "keep"),
                FooterItem::new("Esc", "revert"),
                FooterItem::new("↑/↓", "move"),
            ],
        )],
        AppMode::ParamEdit => vec![FooterGroup::new(
            "FORM",
            vec![
                FooterItem::new("Tab/↓", "next"),
                FooterItem::new("S-Tab/↑", "prev"),
                FooterItem::new("Space/←→", "toggle"),
                FooterItem::new("Enter", "generate"),
                FooterItem::new("Esc", "done"),
            ],
        )],
        AppMode::FavoriteInput => vec![FooterGroup::new(
            "FAVORITE",
            vec![
                FooterItem::new("Enter", "save"),
                FooterItem::new("Esc", "cancel"),
            ],
        )],
        AppMode::Help => vec![FooterGroup::new(
            "HELP",
            vec![FooterItem::new("Esc/?", "close")],
        )],
        AppMode::ThemeSelection => vec![FooterGroup::new(
            "THEME",
            vec![
                FooterItem::new("j/k", "choose"),
                FooterItem::new("Enter", "apply"),
                FooterItem::new("Esc", "cancel"),
            ],
        )],
    }
}

fn normal_groups(state: &AppState) -> Vec<FooterGroup> {
    let mut groups = vec![FooterGroup::new(
        "NAV",
        vec![
            FooterItem::new("j/k", "move"),
            FooterItem::new("Tab", "tab"),
        ],
    )];

    match state.tab {
        Tab::Favorites => groups.push(FooterGroup::new(
            "FAV",
            vec![
                FooterItem::new("Enter", "use"),
                FooterItem::new("d", "remove"),
                FooterItem::new("t", "filter").highlighted_if(state.favorites_filter.is_some()),
            ],
        )),
        Tab::Catalog(kind) => {
            let has_query = state.active().is_some_and(|(v, _)| !v.query.is_empty());
            groups[0]
                .items
                .push(FooterItem::new("/", "filter").highlighted_if(has_query));
            if kind != CatalogKind::Taming {
                groups.push(FooterGroup::new(
                    "CMD",
                    vec![
                        FooterItem::new("Enter", "generate"),
                        FooterItem::new("e", "edit"),
                        FooterItem::new("y", "copy"),
                        FooterItem::new("a", "auto").highlighted_if(state.auto_copy),
                    ],
                ));
            }
            groups.push(FooterGroup::new("FAV", vec![FooterItem::new("f", "save")]));
        }
    }

    groups.push(FooterGroup::new(
        "APP",
        vec![
            FooterItem::new("?", "help"),
            FooterItem::new("q", "quit"),
        ],
    ));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ErrorSeverity, ErrorState};

    fn keys(groups: &[FooterGroup]) -> Vec<&'static str> {
        groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.key))
            .collect()
    }

    #[test]
    fn test_groups_follow_tab_and_mode() {
        let mut state = AppState::default();
        assert!(keys(&get_groups(&state)).contains(&"e"));

        state.tab = Tab::Catalog(CatalogKind::Taming);
        assert!(!keys(&get_groups(&state)).contains(&"e"));

        state.tab = Tab::Favorites;
        assert!(keys(&get_groups(&state)).contains(&"d"));

        state.mode = AppMode::ParamEdit;
        assert_eq!(get_groups(&state)[0].name, "FORM");

        state.last_error = Some(ErrorState::new("boom", ErrorSeverity::Error));
        assert_eq!(keys(&get_groups(&state)), vec!["Esc"]);
    }
}
