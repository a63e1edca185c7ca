use crate::domain::{error::PersistenceError, favorites::Favorites};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "cheatgen";

/// `~/.config/cheatgen`
pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push(APP_DIR);
        path
    })
}

pub fn favorites_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("favorites.toml"))
}

/// Log file location; the terminal belongs to the UI.
pub fn log_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".local");
        path.push("state");
        path.push(APP_DIR);
        path.push("cheatgen.log");
        path
    })
}

/// Reads the favorites file. A missing file is an empty list.
pub fn load_favorites(path: &Path) -> Result<Favorites, PersistenceError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Favorites::default()),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the favorites file, creating its directory. The file is replaced
/// through a rename so a crash never leaves it half written.
pub fn save_favorites(path: &Path, favorites: &Favorites) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string(favorites)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, content).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    debug!(path = %path.display(), count = favorites.len(), "favorites saved");
    Ok(())
}
