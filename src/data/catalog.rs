//! Precomputed species tables: base data, signature dishes and popular items.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AbilityId, Emotion, ItemId, PassiveId, Pkm, Rarity, Synergy};
use crate::error::DataError;
use crate::pokemon::Pokemon;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.ron");

/// Sentinel used by exported game data for "no passive".
pub const PASSIVE_NONE: &str = "NONE";
/// Sentinel used by exported game data for "no active ability".
pub const ABILITY_DEFAULT: &str = "DEFAULT";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: Pkm,
    /// Portrait index in the sprite collab layout, `0025` or `0025-0001`.
    pub index: String,
    pub rarity: Rarity,
    pub stars: u8,
    pub stages: u8,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spe_def: i32,
    pub max_pp: i32,
    pub range: i32,
    #[serde(default)]
    pub ap: i32,
    #[serde(default)]
    pub types: Vec<Synergy>,
    #[serde(default, with = "passive_sentinel")]
    pub passive: Option<PassiveId>,
    #[serde(default, with = "ability_sentinel")]
    pub skill: Option<AbilityId>,
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub emotion: Emotion,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub species: Vec<SpeciesData>,
    #[serde(default)]
    pub dishes: BTreeMap<Pkm, ItemId>,
    #[serde(default)]
    pub popular_items: BTreeMap<Pkm, Vec<ItemId>>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, DataError> {
        let catalog: Catalog = ron::de::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| DataError::io(path.display().to_string(), err))?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        for data in &self.species {
            if data.stages == 0 || data.stars == 0 || data.stars > data.stages {
                return Err(DataError::InvalidStages {
                    species: data.name.to_string(),
                    stars: data.stars,
                    stages: data.stages,
                });
            }
        }
        for name in self.dishes.keys() {
            if self.get_pokemon_data(name).is_none() {
                return Err(DataError::DanglingReference {
                    table: "dishes",
                    species: name.to_string(),
                });
            }
        }
        for name in self.popular_items.keys() {
            if self.get_pokemon_data(name).is_none() {
                return Err(DataError::DanglingReference {
                    table: "popular_items",
                    species: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn get_pokemon_data(&self, name: &Pkm) -> Option<&SpeciesData> {
        self.species.iter().find(|data| &data.name == name)
    }

    pub fn stages(&self, name: &Pkm) -> Option<u8> {
        self.get_pokemon_data(name).map(|data| data.stages)
    }

    pub fn dish_for(&self, name: &Pkm) -> Option<&ItemId> {
        self.dishes.get(name)
    }

    pub fn popular_items_for(&self, name: &Pkm) -> &[ItemId] {
        self.popular_items
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &Pkm> {
        self.species.iter().map(|data| &data.name)
    }

    pub fn position(&self, name: &Pkm) -> Option<usize> {
        self.species.iter().position(|data| &data.name == name)
    }

    /// Builds the default shop instance of a species.
    pub fn create_pokemon_from_name(&self, name: &Pkm) -> Result<Pokemon, DataError> {
        let data = self
            .get_pokemon_data(name)
            .ok_or_else(|| DataError::UnknownSpecies(name.to_string()))?;
        Ok(Pokemon::from_species(data))
    }
}

mod passive_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PASSIVE_NONE;
    use crate::data::PassiveId;

    pub fn serialize<S: Serializer>(value: &Option<PassiveId>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_ref().map(PassiveId::as_str).unwrap_or(PASSIVE_NONE))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PassiveId>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok((!raw.is_empty() && raw != PASSIVE_NONE).then_some(PassiveId(raw)))
    }
}

mod ability_sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ABILITY_DEFAULT;
    use crate::data::AbilityId;

    pub fn serialize<S: Serializer>(value: &Option<AbilityId>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_ref().map(AbilityId::as_str).unwrap_or(ABILITY_DEFAULT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<AbilityId>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok((!raw.is_empty() && raw != ABILITY_DEFAULT).then_some(AbilityId(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(
        species: [
            (
                name: "MAGIKARP",
                index: "0129",
                rarity: COMMON,
                stars: 1,
                stages: 2,
                hp: 30, atk: 1, def: 1, spe_def: 1, max_pp: 100, range: 1,
                types: [WATER, AQUATIC],
                passive: "MAGIKARP",
                skill: "DEFAULT",
            ),
        ],
        dishes: { "MAGIKARP": "SWEET_HERB" },
    )"#;

    #[test]
    fn sentinels_become_none() {
        let catalog = Catalog::from_ron_str(SMALL).expect("catalog");
        let data = catalog.get_pokemon_data(&Pkm::from("MAGIKARP")).expect("species");
        assert_eq!(data.passive, Some(PassiveId("MAGIKARP".into())));
        assert_eq!(data.skill, None);
        assert_eq!(data.emotion, Emotion::Normal);
        assert!(catalog.popular_items_for(&data.name).is_empty());
    }

    #[test]
    fn rejects_stars_above_stages() {
        let broken = SMALL.replace("stars: 1", "stars: 3");
        let err = Catalog::from_ron_str(&broken).expect_err("invalid stages");
        assert!(matches!(err, DataError::InvalidStages { stars: 3, stages: 2, .. }));
    }

    #[test]
    fn rejects_dish_for_unknown_species() {
        let broken = SMALL.replace(r#"{ "MAGIKARP": "SWEET_HERB" }"#, r#"{ "GYARADOS": "SWEET_HERB" }"#);
        let err = Catalog::from_ron_str(&broken).expect_err("dangling dish");
        assert!(matches!(err, DataError::DanglingReference { table: "dishes", .. }));
    }

    #[test]
    fn unknown_species_is_an_error() {
        let catalog = Catalog::from_ron_str(SMALL).expect("catalog");
        let err = catalog
            .create_pokemon_from_name(&Pkm::from("MISSINGNO"))
            .expect_err("unknown");
        assert!(matches!(err, DataError::UnknownSpecies(name) if name == "MISSINGNO"));
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(!catalog.species.is_empty());
    }

    #[test]
    fn sentinels_survive_json_round_trip() {
        let catalog = Catalog::from_ron_str(SMALL).expect("catalog");
        let json = serde_json::to_string(&catalog).expect("serialize");
        assert!(json.contains("\"DEFAULT\""));
        let back: Catalog = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, catalog);
    }
}
