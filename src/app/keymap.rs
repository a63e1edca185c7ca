use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub profile: String,
    /// Extra bindings such as `"ctrl+g" = "generate"`, applied over the profile.
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "vim".to_string(),
            custom: None,
        }
    }
}

/// Normal-mode bindings. Text-entry modes are mapped in `input`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Self {
        let mut global = HashMap::new();

        // --- Shared by every profile ---
        global.insert(char_key('q'), Action::Quit);
        global.insert(key(KeyCode::Down), Action::SelectNext);
        global.insert(key(KeyCode::Up), Action::SelectPrev);
        global.insert(key(KeyCode::Home), Action::SelectFirst);
        global.insert(key(KeyCode::End), Action::SelectLast);
        global.insert(key(KeyCode::PageDown), Action::PageDown);
        global.insert(key(KeyCode::PageUp), Action::PageUp);
        global.insert(key(KeyCode::Tab), Action::NextTab);
        global.insert(key(KeyCode::BackTab), Action::PrevTab);
        for (i, c) in ('1'..='7').enumerate() {
            global.insert(char_key(c), Action::SwitchTab(i));
        }
        global.insert(char_key('/'), Action::EnterFilterMode);
        global.insert(char_key('e'), Action::EnterParamEdit);
        global.insert(key(KeyCode::Right), Action::EnterParamEdit);
        global.insert(key(KeyCode::Enter), Action::Generate);
        global.insert(char_key('y'), Action::CopyOutput);
        global.insert(ctrl('c'), Action::CopyOutput);
        global.insert(char_key('a'), Action::ToggleAutoCopy);
        global.insert(char_key('f'), Action::AddFavoriteIntent);
        global.insert(char_key('d'), Action::RemoveFavorite);
        global.insert(char_key('t'), Action::CycleFavoritesFilter);
        global.insert(char_key('T'), Action::EnterThemeSelection);
        global.insert(char_key('r'), Action::ReloadCatalogs);
        global.insert(char_key('?'), Action::ToggleHelp);
        global.insert(key(KeyCode::Esc), Action::CancelMode);

        match config.profile.as_str() {
            "basic" => {}
            other => {
                if other != "vim" {
                    warn!(profile = other, "unknown key profile, using vim");
                }
                global.insert(char_key('j'), Action::SelectNext);
                global.insert(char_key('k'), Action::SelectPrev);
                global.insert(char_key('g'), Action::SelectFirst);
                global.insert(char_key('G'), Action::SelectLast);
                global.insert(char_key('l'), Action::EnterParamEdit);
            }
        }

        for (binding, name) in config.custom.iter().flatten() {
            match (parse_key(binding), action_by_name(name)) {
                (Some(event), Some(action)) => {
                    global.insert(event, action);
                }
                _ => warn!(binding = %binding, action = %name, "ignoring invalid key binding"),
            }
        }

        Self { global }
    }

    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&normalize(event)).cloned()
    }

    /// First key bound to `action`, for display in hints.
    #[must_use]
    pub fn key_for(&self, action: &Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .global
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(k, _)| describe(*k))
            .collect();
        keys.sort_by_key(|k| (k.len(), k.clone()));
        keys.into_iter().next()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Strips what terminals report inconsistently: key state, event kind and
/// the shift modifier on characters (the case already carries it).
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers =
        event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    if matches!(event.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

/// Parses bindings like `"ctrl+g"`, `"alt+enter"` or `"F5"`.
fn parse_key(binding: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let parts: Vec<&str> = binding.split('+').map(str::trim).collect();
    let (last, mods) = parts.split_last()?;
    for m in mods {
        match m.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.insert(KeyModifiers::CONTROL),
            "alt" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            _ => return None,
        }
    }

    let lower = last.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => {
            let mut chars = last.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if modifiers.contains(KeyModifiers::SHIFT) {
                KeyCode::Char(c.to_ascii_uppercase())
            } else {
                KeyCode::Char(c)
            }
        }
    };
    Some(normalize(KeyEvent::new(code, modifiers)))
}

fn action_by_name(name: &str) -> Option<Action> {
    let action = match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "quit" => Action::Quit,
        "next" | "select_next" => Action::SelectNext,
        "prev" | "select_prev" => Action::SelectPrev,
        "first" => Action::SelectFirst,
        "last" => Action::SelectLast,
        "page_down" => Action::PageDown,
        "page_up" => Action::PageUp,
        "next_tab" => Action::NextTab,
        "prev_tab" => Action::PrevTab,
        "filter" => Action::EnterFilterMode,
        "edit" => Action::EnterParamEdit,
        "generate" => Action::Generate,
        "copy" => Action::CopyOutput,
        "toggle_auto_copy" => Action::ToggleAutoCopy,
        "add_favorite" => Action::AddFavoriteIntent,
        "remove_favorite" => Action::RemoveFavorite,
        "cycle_favorites" => Action::CycleFavoritesFilter,
        "theme" => Action::EnterThemeSelection,
        "reload" => Action::ReloadCatalogs,
        "help" => Action::ToggleHelp,
        "cancel" => Action::CancelMode,
        _ => return None,
    };
    Some(action)
}

fn describe(event: KeyEvent) -> String {
    let name = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::BackTab => "S-Tab".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        other => format!("{other:?}"),
    };
    let mut prefix = String::new();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        prefix.push_str("C-");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        prefix.push_str("M-");
    }
    format!("{prefix}{name}")
}
