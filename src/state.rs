//! Application state - single source of truth for the browser host

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::Preferences;
use crate::data::{Catalog, Emotion, ItemId, Pkm};
use crate::i18n::Translations;
use crate::pokemon::PokemonRef;
use crate::portrait::{self, DEFAULT_PORTRAIT_BASE};
use crate::sprite::SpriteData;

/// Where the session reads and writes its data. Fixed after startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub catalog_path: Option<PathBuf>,
    pub locale_path: Option<PathBuf>,
    pub portrait_base: String,
    pub meta_url: Option<String>,
    pub preferences_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            locale_path: None,
            portrait_base: DEFAULT_PORTRAIT_BASE.to_string(),
            meta_url: None,
            preferences_path: Preferences::default_path(),
        }
    }
}

/// A decoded portrait together with the location it was loaded from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortraitImage {
    pub src: String,
    pub sprite: SpriteData,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Session", label = "Config", debug_fmt)]
    pub session: SessionConfig,

    #[debug(section = "Data", label = "Species", debug_fmt)]
    pub species_count: usize,

    #[debug(skip)]
    pub catalog: Catalog,

    /// Bumped every time `catalog` is replaced.
    #[debug(section = "Data", label = "Revision")]
    pub catalog_revision: u32,

    #[debug(section = "Data", label = "Language")]
    pub language: String,

    #[debug(skip)]
    pub translations: Translations,

    #[debug(section = "Preferences", label = "Prefs", debug_fmt)]
    pub preferences: Preferences,

    /// Row highlighted in the species list.
    #[debug(section = "Selection", label = "Row")]
    pub selected: usize,

    /// Creature shown in the detail panel.
    #[debug(section = "Selection", label = "Focus", debug_fmt)]
    pub focus: Option<PokemonRef>,

    #[debug(section = "Overrides", label = "Shiny", debug_fmt)]
    pub shiny_override: Option<bool>,

    #[debug(section = "Overrides", label = "Emotion", debug_fmt)]
    pub emotion_override: Option<Emotion>,

    /// Portrait location most recently requested.
    #[debug(section = "Portrait", label = "Requested", debug_fmt)]
    pub portrait_request: Option<String>,

    #[debug(skip)]
    pub portrait: DataResource<PortraitImage>,

    /// Popular items from the meta endpoint; wins over the catalog table.
    #[debug(skip)]
    pub popular_items: BTreeMap<Pkm, Vec<ItemId>>,

    #[debug(section = "Popular items", label = "Refreshing")]
    pub popular_loading: bool,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub status: Option<String>,
}

impl AppState {
    pub fn new(catalog: Catalog, translations: Translations, session: SessionConfig) -> Self {
        let focus = catalog
            .names()
            .next()
            .cloned()
            .map(PokemonRef::Identifier);
        Self {
            session,
            species_count: catalog.species.len(),
            catalog_revision: 0,
            language: translations.language.clone(),
            catalog,
            translations,
            preferences: Preferences::default(),
            selected: 0,
            focus,
            shiny_override: None,
            emotion_override: None,
            portrait_request: None,
            portrait: DataResource::Empty,
            popular_items: BTreeMap::new(),
            popular_loading: false,
            status: None,
        }
    }

    /// Built-in catalog and English strings. Empty if the embedded data is broken.
    pub fn builtin(session: SessionConfig) -> Self {
        let catalog = Catalog::builtin().unwrap_or_default();
        let translations = Translations::builtin_en().unwrap_or_default();
        Self::new(catalog, translations, session)
    }

    /// Points the panel at `name`, keeping the list row in sync when the
    /// catalog knows the species.
    pub fn focus_species(&mut self, name: Pkm) {
        if let Some(index) = self.catalog.position(&name) {
            self.selected = index;
        }
        self.focus = Some(PokemonRef::Identifier(name));
    }

    pub fn species_names(&self) -> Vec<String> {
        self.catalog
            .names()
            .map(|name| self.translations.tf("pkm", name.as_str()))
            .collect()
    }

    /// Shiny flag and emotion of the focused creature before overrides.
    pub fn focused_defaults(&self) -> Option<(&str, bool, Emotion)> {
        match self.focus.as_ref()? {
            PokemonRef::Identifier(name) => {
                let data = self.catalog.get_pokemon_data(name)?;
                Some((data.index.as_str(), data.shiny, data.emotion))
            }
            PokemonRef::Instance(pokemon) => {
                Some((pokemon.index.as_str(), pokemon.shiny, pokemon.emotion))
            }
        }
    }

    pub fn portrait_src(&self) -> Option<String> {
        let (index, shiny, emotion) = self.focused_defaults()?;
        Some(portrait::portrait_src(
            &self.session.portrait_base,
            index,
            self.shiny_override.unwrap_or(shiny),
            self.emotion_override.unwrap_or(emotion),
        ))
    }

    /// The loaded portrait, only if it matches what the panel currently wants.
    pub fn current_portrait(&self) -> Option<&SpriteData> {
        let image = self.portrait.data()?;
        (Some(&image.src) == self.portrait_request.as_ref()).then_some(&image.sprite)
    }

    pub fn popular_items_for(&self, name: &Pkm) -> &[ItemId] {
        match self.popular_items.get(name) {
            Some(items) => items,
            None => self.catalog.popular_items_for(name),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::builtin(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_focused_on_first_species() {
        let state = AppState::default();
        let first = state.catalog.names().next().cloned().expect("species");
        assert_eq!(state.focus, Some(PokemonRef::Identifier(first)));
        assert_eq!(state.species_count, state.catalog.species.len());
    }

    #[test]
    fn overrides_feed_portrait_src() {
        let mut state = AppState::default();
        state.focus_species(Pkm::from("PIKACHU"));
        let plain = state.portrait_src().expect("src");
        assert!(plain.ends_with("0025/Normal.png"));

        state.shiny_override = Some(true);
        state.emotion_override = Some(Emotion::Happy);
        let src = state.portrait_src().expect("src");
        assert!(src.ends_with("0025/0000/0001/Happy.png"));
    }

    #[test]
    fn unknown_focus_has_no_portrait() {
        let mut state = AppState::default();
        state.focus_species(Pkm::from("MISSINGNO"));
        assert_eq!(state.portrait_src(), None);
    }

    #[test]
    fn meta_items_override_catalog_table() {
        let mut state = AppState::default();
        let name = Pkm::from("PIKACHU");
        assert_eq!(state.popular_items_for(&name).len(), 4);
        state
            .popular_items
            .insert(name.clone(), vec![ItemId("LEFTOVERS".into())]);
        assert_eq!(state.popular_items_for(&name).len(), 1);
    }
}
