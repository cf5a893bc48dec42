//! Effects - side effects declared by the reducer

use std::path::PathBuf;

use crate::config::Preferences;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadPreferences { path: PathBuf },
    SavePreferences { path: PathBuf, preferences: Preferences },
    LoadCatalog { path: PathBuf },
    LoadLocale { path: PathBuf },
    /// Fetch and decode a portrait; a newer request replaces an older one
    LoadPortrait { src: String },
    FetchPopularItems { url: String },
}
