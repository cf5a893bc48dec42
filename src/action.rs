//! Actions for the species browser

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::data::{Catalog, ItemId, Pkm};
use crate::i18n::Translations;
use crate::sprite::SpriteData;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    // ===== Startup =====
    /// Kick off the load chain for preferences, data files and the first portrait
    Init,

    // ===== Preferences category =====
    PreferencesDidLoad(Preferences),
    PreferencesDidError(String),
    PreferencesToggleAntialiasing,
    PreferencesDidSave,

    // ===== Catalog category =====
    CatalogDidLoad(Catalog),
    CatalogDidError(String),

    // ===== Locale category =====
    LocaleDidLoad(Translations),
    LocaleDidError(String),

    // ===== Species category =====
    /// Select a row in the species list
    SpeciesSelect(usize),

    // ===== Override category =====
    /// None -> opposite of the species default -> None
    OverrideToggleShiny,
    OverrideCycleEmotion,
    OverrideClear,

    // ===== Portrait category =====
    PortraitDidLoad { src: String, sprite: SpriteData },
    PortraitDidError { src: String, error: String },

    // ===== Popular items category =====
    PopularItemsFetch,
    PopularItemsDidLoad(BTreeMap<Pkm, Vec<ItemId>>),
    PopularItemsDidError(String),

    // ===== UI category =====
    /// Redraw after component-local changes (tooltip scroll, tier focus)
    Render,

    // ===== Uncategorized (global) =====
    Quit,
}
