//! Creature instances and the identifier-or-instance reference the panel accepts.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::data::{AbilityId, Catalog, Emotion, PassiveId, Pkm, Rarity, SpeciesData, Stat, Synergy};
use crate::error::DataError;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    pub fn next() -> Self {
        InstanceId(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: InstanceId,
    pub name: Pkm,
    pub index: String,
    pub rarity: Rarity,
    pub stars: u8,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spe_def: i32,
    pub max_pp: i32,
    pub range: i32,
    pub ap: i32,
    pub types: Vec<Synergy>,
    pub shiny: bool,
    pub emotion: Emotion,
    pub passive: Option<PassiveId>,
    pub skill: Option<AbilityId>,
}

impl Pokemon {
    pub fn from_species(data: &SpeciesData) -> Self {
        let mut pokemon = Self {
            id: InstanceId::next(),
            name: data.name.clone(),
            index: data.index.clone(),
            rarity: data.rarity,
            stars: data.stars,
            hp: data.hp,
            atk: data.atk,
            def: data.def,
            spe_def: data.spe_def,
            max_pp: data.max_pp,
            range: data.range,
            ap: data.ap,
            types: Vec::with_capacity(data.types.len()),
            shiny: data.shiny,
            emotion: data.emotion,
            passive: data.passive.clone(),
            skill: data.skill.clone(),
        };
        for synergy in &data.types {
            pokemon.add_type(*synergy);
        }
        pokemon
    }

    /// Inserts a synergy, keeping first-seen order and ignoring repeats.
    pub fn add_type(&mut self, synergy: Synergy) -> bool {
        if self.types.contains(&synergy) {
            return false;
        }
        self.types.push(synergy);
        true
    }

    pub fn stat_key(&self) -> StatKey {
        [
            self.hp,
            self.def,
            self.atk,
            self.max_pp,
            self.spe_def,
            self.range,
        ]
    }

    pub fn stat_projection(&self) -> [StatEntry; 6] {
        project_stats(self.stat_key())
    }
}

/// The six displayed stat values, in display order.
pub type StatKey = [i32; 6];

pub const DISPLAYED_STATS: [Stat; 6] = [
    Stat::Hp,
    Stat::Def,
    Stat::Atk,
    Stat::Pp,
    Stat::SpeDef,
    Stat::Range,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: Stat,
    pub value: i32,
}

pub fn project_stats(values: StatKey) -> [StatEntry; 6] {
    let mut entries = [StatEntry {
        stat: Stat::Hp,
        value: 0,
    }; 6];
    for (slot, (stat, value)) in entries
        .iter_mut()
        .zip(DISPLAYED_STATS.into_iter().zip(values))
    {
        *slot = StatEntry { stat, value };
    }
    entries
}

/// What the detail panel is asked to show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PokemonRef {
    Identifier(Pkm),
    Instance(Pokemon),
}

impl PokemonRef {
    pub fn species(&self) -> &Pkm {
        match self {
            PokemonRef::Identifier(name) => name,
            PokemonRef::Instance(pokemon) => &pokemon.name,
        }
    }

    pub fn resolve(&self, catalog: &Catalog) -> Result<Pokemon, DataError> {
        match self {
            PokemonRef::Identifier(name) => catalog.create_pokemon_from_name(name),
            PokemonRef::Instance(pokemon) => Ok(pokemon.clone()),
        }
    }
}

impl From<Pkm> for PokemonRef {
    fn from(value: Pkm) -> Self {
        PokemonRef::Identifier(value)
    }
}

impl From<Pokemon> for PokemonRef {
    fn from(value: Pokemon) -> Self {
        PokemonRef::Instance(value)
    }
}

/// Single-slot cache that recomputes only when its key changes.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: &K, compute: impl FnOnce(&K) -> V) -> &V {
        let entry = match self.slot.take() {
            Some((cached, value)) if &cached == key => (cached, value),
            _ => (key.clone(), compute(key)),
        };
        &self.slot.insert(entry).1
    }}
