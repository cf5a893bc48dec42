//! Pure view model of the detail panel.
//!
//! Everything the panel draws is derived here from a resolved creature and
//! the injected context, so layout code never touches the data tables.

use ratatui::style::Color;

use super::style::DetailSection;
use crate::config::Preferences;
use crate::data::{AbilityId, Catalog, Emotion, ItemId, PassiveId, Pkm, Rarity, Stat, Synergy};
use crate::description::{add_icons_to_description, DescriptionContext, DescriptionToken};
use crate::i18n::Translations;
use crate::pokemon::{Pokemon, StatEntry};
use crate::portrait::{portrait_path, portrait_src};

/// Read-only context shared by every panel instance.
#[derive(Clone, Copy)]
pub struct DetailContext<'a> {
    pub catalog: &'a Catalog,
    pub translations: &'a Translations,
    pub preferences: &'a Preferences,
    pub portrait_base: &'a str,
    pub shiny: Option<bool>,
    pub emotion: Option<Emotion>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarStrip {
    pub filled: u8,
    pub empty: u8,
}

impl StarStrip {
    pub fn new(stars: u8, stages: u8) -> Self {
        Self {
            filled: stars,
            empty: stages.saturating_sub(stars),
        }
    }

    pub fn total(self) -> u8 {
        self.filled.saturating_add(self.empty)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortraitView {
    pub src: String,
    pub path: String,
    pub shiny: bool,
    pub emotion: Emotion,
    pub pixelated: bool,
    pub border: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatLine {
    pub stat: Stat,
    pub label: String,
    pub icon_path: String,
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DishView {
    pub item: ItemId,
    pub heading: String,
    pub name: String,
    pub icon_path: String,
    pub description: Vec<DescriptionToken>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PassiveView {
    pub id: PassiveId,
    pub description: Vec<DescriptionToken>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AbilityView {
    pub id: AbilityId,
    pub name: String,
    pub description: Vec<DescriptionToken>,
    pub stars: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub species: Pkm,
    pub name: String,
    pub rarity: Rarity,
    pub rarity_label: String,
    pub rarity_color: Color,
    pub portrait: PortraitView,
    pub stars: StarStrip,
    pub types: Vec<(Synergy, String)>,
    pub stats: Vec<StatLine>,
    pub dish: Option<DishView>,
    pub passive: Option<PassiveView>,
    pub ability: Option<AbilityView>,
}

impl DetailView {
    pub fn build(pokemon: &Pokemon, ctx: &DetailContext<'_>) -> Self {
        Self::assemble(pokemon, &pokemon.stat_projection(), ctx)
    }

    /// Like `build`, with a stat projection the caller already holds.
    pub fn assemble(pokemon: &Pokemon, stats: &[StatEntry; 6], ctx: &DetailContext<'_>) -> Self {
        let t = ctx.translations;
        let shiny = ctx.shiny.unwrap_or(pokemon.shiny);
        let emotion = ctx.emotion.unwrap_or(pokemon.emotion);
        let rarity_color = pokemon.rarity.color();
        let stages = ctx.catalog.stages(&pokemon.name).unwrap_or(pokemon.stars);
        let description_ctx = DescriptionContext {
            stars: Some(pokemon.stars),
            ap: pokemon.ap,
        };

        let dish = ctx.catalog.dish_for(&pokemon.name).map(|item| DishView {
            item: item.clone(),
            heading: t.t("signature_dish").into_owned(),
            name: t.tf("item", item.as_str()),
            icon_path: item.icon_path(),
            description: add_icons_to_description(
                &t.tf("item_description", item.as_str()),
                DescriptionContext::default(),
                t,
            ),
        });

        let passive = pokemon.passive.as_ref().map(|id| PassiveView {
            id: id.clone(),
            description: add_icons_to_description(
                &t.tf("passive_description", id.as_str()),
                description_ctx,
                t,
            ),
        });

        let ability = pokemon.skill.as_ref().map(|id| AbilityView {
            id: id.clone(),
            name: t.tf("ability", id.as_str()),
            description: add_icons_to_description(
                &t.tf("ability_description", id.as_str()),
                description_ctx,
                t,
            ),
            stars: pokemon.stars,
        });

        Self {
            species: pokemon.name.clone(),
            name: t.tf("pkm", pokemon.name.as_str()),
            rarity: pokemon.rarity,
            rarity_label: t.tf("rarity", pokemon.rarity.key()),
            rarity_color,
            portrait: PortraitView {
                src: portrait_src(ctx.portrait_base, &pokemon.index, shiny, emotion),
                path: portrait_path(&pokemon.index, shiny, emotion),
                shiny,
                emotion,
                pixelated: ctx.preferences.pixelated(),
                border: rarity_color,
            },
            stars: StarStrip::new(pokemon.stars, stages),
            types: pokemon
                .types
                .iter()
                .map(|synergy| (*synergy, t.tf("synergy", synergy.key())))
                .collect(),
            stats: stats
                .iter()
                .map(|entry| StatLine {
                    stat: entry.stat,
                    label: t.tf("stat", entry.stat.key()),
                    icon_path: entry.stat.icon_path(),
                    value: entry.value,
                })
                .collect(),
            dish,
            passive,
            ability,
        }
    }

    /// Sections present for this creature, in render order.
    pub fn sections(&self) -> Vec<DetailSection> {
        DetailSection::ALL
            .into_iter()
            .filter(|section| match section {
                DetailSection::Dish => self.dish.is_some(),
                DetailSection::Passive => self.passive.is_some(),
                DetailSection::Ult => self.ability.is_some(),
                _ => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixture {
        catalog: Catalog,
        translations: Translations,
        preferences: Preferences,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: Catalog::builtin().expect("catalog"),
                translations: Translations::builtin_en().expect("en"),
                preferences: Preferences::default(),
            }
        }

        fn ctx(&self) -> DetailContext<'_> {
            DetailContext {
                catalog: &self.catalog,
                translations: &self.translations,
                preferences: &self.preferences,
                portrait_base: "portraits",
                shiny: None,
                emotion: None,
            }
        }

        fn view(&self, name: &str) -> DetailView {
            let pokemon = self
                .catalog
                .create_pokemon_from_name(&Pkm::from(name))
                .expect("species");
            DetailView::build(&pokemon, &self.ctx())
        }
    }

    #[test]
    fn first_stage_of_three_has_two_empty_stars() {
        let fixture = Fixture::new();
        let view = fixture.view("BULBASAUR");
        assert_eq!(view.stars, StarStrip { filled: 1, empty: 2 });
    }

    #[test]
    fn dish_section_carries_name_and_icon() {
        let fixture = Fixture::new();
        let view = fixture.view("SNORLAX");
        let dish = view.dish.as_ref().expect("dish");
        assert_eq!(dish.name, "Leftovers");
        assert_eq!(dish.heading, "Signature dish");
        assert_eq!(dish.icon_path, "assets/item/LEFTOVERS.png");
        assert!(view.sections().contains(&DetailSection::Dish));
    }

    #[test]
    fn sentinel_species_hide_optional_sections() {
        let fixture = Fixture::new();
        let view = fixture.view("MAGIKARP");
        assert_eq!(
            view.sections(),
            vec![
                DetailSection::Portrait,
                DetailSection::Entry,
                DetailSection::Types,
                DetailSection::PopularItems,
                DetailSection::Stats,
                DetailSection::Passive,
            ]
        );
    }

    #[test]
    fn stats_follow_display_order() {
        let fixture = Fixture::new();
        let view = fixture.view("PIKACHU");
        let keys: Vec<&str> = view.stats.iter().map(|line| line.stat.key()).collect();
        assert_eq!(keys, ["HP", "DEF", "ATK", "PP", "SPE_DEF", "RANGE"]);
        assert_eq!(view.stats[0].icon_path, "assets/icons/HP.png");
        assert_eq!(view.stats[0].label, "HP");
    }

    #[test]
    fn ability_tiers_track_stars() {
        let fixture = Fixture::new();
        let view = fixture.view("PIKACHU");
        let ability = view.ability.expect("ability");
        assert_eq!(ability.name, "Volt Switch");
        let tiers = ability
            .description
            .iter()
            .find_map(|token| match token {
                DescriptionToken::Tiers { active, .. } => Some(*active),
                _ => None,
            })
            .expect("tiers");
        assert_eq!(tiers, Some(1));
    }

    #[test]
    fn antialiasing_off_means_pixelated() {
        let mut fixture = Fixture::new();
        fixture.preferences.antialiasing = false;
        assert!(fixture.view("PIKACHU").portrait.pixelated);
    }

    #[test]
    fn duplicate_synergies_render_once() {
        let fixture = Fixture::new();
        let view = fixture.view("PIKACHU");
        let names: Vec<&str> = view.types.iter().map(|(_, label)| label.as_str()).collect();
        assert_eq!(names, ["Electric", "Field"]);
    }
}
