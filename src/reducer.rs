//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::data::Catalog;
use crate::effect::Effect;
use crate::pokemon::PokemonRef;
use crate::state::{AppState, PortraitImage};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = vec![Effect::LoadPreferences {
                path: state.session.preferences_path.clone(),
            }];
            if let Some(path) = state.session.catalog_path.clone() {
                effects.push(Effect::LoadCatalog { path });
            }
            if let Some(path) = state.session.locale_path.clone() {
                effects.push(Effect::LoadLocale { path });
            }
            effects.extend(request_portrait(state));
            if let Some(url) = state.session.meta_url.clone() {
                state.popular_loading = true;
                effects.push(Effect::FetchPopularItems { url });
            }
            DispatchResult::changed_with_many(effects)
        }

        // ===== Preferences =====
        Action::PreferencesDidLoad(preferences) => {
            if state.preferences == preferences {
                return DispatchResult::unchanged();
            }
            state.preferences = preferences;
            DispatchResult::changed()
        }

        Action::PreferencesDidError(error) => {
            state.status = Some(format!("preferences: {error}"));
            DispatchResult::changed()
        }

        Action::PreferencesToggleAntialiasing => {
            state.preferences.antialiasing = !state.preferences.antialiasing;
            DispatchResult::changed_with(Effect::SavePreferences {
                path: state.session.preferences_path.clone(),
                preferences: state.preferences.clone(),
            })
        }

        Action::PreferencesDidSave => DispatchResult::unchanged(),

        // ===== Data files =====
        Action::CatalogDidLoad(catalog) => {
            install_catalog(state, catalog);
            changed_with_opt(request_portrait(state))
        }

        Action::CatalogDidError(error) => {
            state.status = Some(format!("catalog: {error}"));
            DispatchResult::changed()
        }

        Action::LocaleDidLoad(translations) => {
            state.language = translations.language.clone();
            state.translations = translations;
            DispatchResult::changed()
        }

        Action::LocaleDidError(error) => {
            state.status = Some(format!("locale: {error}"));
            DispatchResult::changed()
        }

        // ===== Species list =====
        Action::SpeciesSelect(index) => {
            let Some(name) = state.catalog.species.get(index).map(|data| data.name.clone())
            else {
                return DispatchResult::unchanged();
            };
            if state.selected == index && state.focus.as_ref().map(PokemonRef::species) == Some(&name)
            {
                return DispatchResult::unchanged();
            }
            state.selected = index;
            state.focus = Some(PokemonRef::Identifier(name));
            changed_with_opt(request_portrait(state))
        }

        // ===== Portrait overrides =====
        Action::OverrideToggleShiny => {
            let Some((_, default_shiny, _)) = state.focused_defaults() else {
                return DispatchResult::unchanged();
            };
            state.shiny_override = match state.shiny_override {
                None => Some(!default_shiny),
                Some(_) => None,
            };
            changed_with_opt(request_portrait(state))
        }

        Action::OverrideCycleEmotion => {
            let Some((_, _, default_emotion)) = state.focused_defaults() else {
                return DispatchResult::unchanged();
            };
            let next = state.emotion_override.unwrap_or(default_emotion).next();
            state.emotion_override = (next != default_emotion).then_some(next);
            changed_with_opt(request_portrait(state))
        }

        Action::OverrideClear => {
            if state.shiny_override.is_none() && state.emotion_override.is_none() {
                return DispatchResult::unchanged();
            }
            state.shiny_override = None;
            state.emotion_override = None;
            changed_with_opt(request_portrait(state))
        }

        // ===== Portrait loading =====
        Action::PortraitDidLoad { src, sprite } => {
            if state.portrait_request.as_ref() != Some(&src) {
                return DispatchResult::unchanged();
            }
            state.portrait = DataResource::Loaded(PortraitImage { src, sprite });
            DispatchResult::changed()
        }

        Action::PortraitDidError { src, error } => {
            if state.portrait_request.as_ref() != Some(&src) {
                return DispatchResult::unchanged();
            }
            state.status = Some(format!("portrait: {error}"));
            state.portrait = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Popular items =====
        Action::PopularItemsFetch => match state.session.meta_url.clone() {
            Some(url) => {
                state.popular_loading = true;
                DispatchResult::changed_with(Effect::FetchPopularItems { url })
            }
            None => {
                state.status = Some("no meta endpoint configured (--meta-url)".into());
                DispatchResult::changed()
            }
        },

        Action::PopularItemsDidLoad(items) => {
            state.status = Some(format!("popular items refreshed for {} species", items.len()));
            state.popular_items = items;
            state.popular_loading = false;
            DispatchResult::changed()
        }

        Action::PopularItemsDidError(error) => {
            state.status = Some(format!("popular items: {error}"));
            state.popular_loading = false;
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Swaps in a new catalog. An explicit focus the old catalog did not know
/// either is kept so the placeholder stays visible.
fn install_catalog(state: &mut AppState, catalog: Catalog) {
    let focus_name = state.focus.as_ref().map(|focus| focus.species().clone());
    let known_before = focus_name
        .as_ref()
        .is_some_and(|name| state.catalog.get_pokemon_data(name).is_some());

    state.species_count = catalog.species.len();
    state.catalog = catalog;
    state.catalog_revision = state.catalog_revision.wrapping_add(1);

    match focus_name {
        Some(name) if state.catalog.get_pokemon_data(&name).is_some() => {
            state.selected = state.catalog.position(&name).unwrap_or(0);
        }
        Some(_) if !known_before => {
            state.selected = 0;
        }
        _ => {
            state.selected = 0;
            state.focus = state
                .catalog
                .names()
                .next()
                .cloned()
                .map(PokemonRef::Identifier);
        }
    }
}

/// Requests the portrait the panel now wants, if it differs from the last
/// request.
fn request_portrait(state: &mut AppState) -> Option<Effect> {
    let src = state.portrait_src();
    if src == state.portrait_request {
        return None;
    }
    state.portrait_request = src.clone();
    match src {
        Some(src) => {
            state.portrait = DataResource::Loading;
            Some(Effect::LoadPortrait { src })
        }
        None => {
            state.portrait = DataResource::Empty;
            None
        }
    }
}

fn changed_with_opt(effect: Option<Effect>) -> DispatchResult<Effect> {
    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}
