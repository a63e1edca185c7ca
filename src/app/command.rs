use crate::domain::favorites::Favorites;
use std::path::PathBuf;

/// Side effects requested by the reducer and run by the loop.
#[derive(Debug, Clone)]
pub enum Command {
    LoadCatalogs(PathBuf),
    CopyToClipboard(String),
    SaveFavorites {
        path: PathBuf,
        favorites: Favorites,
        message: String,
    },
}
