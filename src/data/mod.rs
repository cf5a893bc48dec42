//! Identifiers and enums shared by the catalog, the locale keys and the panel.

pub mod catalog;

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, SpeciesData};

/// Canonical species name, e.g. `PIKACHU`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pkm(pub String);

impl Pkm {
    pub fn new(name: impl Into<String>) -> Self {
        Pkm(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pkm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pkm {
    fn from(value: &str) -> Self {
        Pkm(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassiveId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl PassiveId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AbilityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn icon_path(&self) -> String {
        format!("assets/item/{}.png", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Ultra,
    Unique,
    Legendary,
    Hatch,
    Special,
}

impl Rarity {
    pub fn key(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Ultra => "ULTRA",
            Rarity::Unique => "UNIQUE",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Hatch => "HATCH",
            Rarity::Special => "SPECIAL",
        }
    }

    /// Display colour used for the rarity label and the portrait border.
    pub fn hex_color(self) -> &'static str {
        match self {
            Rarity::Common => "#686d7d",
            Rarity::Uncommon => "#71e55c",
            Rarity::Rare => "#5062ab",
            Rarity::Epic => "#7b469c",
            Rarity::Ultra => "#f03c3c",
            Rarity::Unique => "#ffffff",
            Rarity::Legendary => "#ffde2b",
            Rarity::Hatch => "#b9915a",
            Rarity::Special => "#e08bc6",
        }
    }

    pub fn color(self) -> Color {
        parse_hex_color(self.hex_color()).unwrap_or(Color::White)
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Synergy {
    Normal,
    Grass,
    Fire,
    Water,
    Electric,
    Fighting,
    Psychic,
    Dark,
    Steel,
    Ground,
    Poison,
    Dragon,
    Field,
    Monster,
    Human,
    Aquatic,
    Bug,
    Flying,
    Flora,
    Rock,
    Ghost,
    Fairy,
    Ice,
    Fossil,
    Sound,
    Artificial,
    Baby,
    Light,
    Wild,
    Amorphous,
    Gourmet,
}

impl Synergy {
    pub const ALL: [Synergy; 31] = [
        Synergy::Normal,
        Synergy::Grass,
        Synergy::Fire,
        Synergy::Water,
        Synergy::Electric,
        Synergy::Fighting,
        Synergy::Psychic,
        Synergy::Dark,
        Synergy::Steel,
        Synergy::Ground,
        Synergy::Poison,
        Synergy::Dragon,
        Synergy::Field,
        Synergy::Monster,
        Synergy::Human,
        Synergy::Aquatic,
        Synergy::Bug,
        Synergy::Flying,
        Synergy::Flora,
        Synergy::Rock,
        Synergy::Ghost,
        Synergy::Fairy,
        Synergy::Ice,
        Synergy::Fossil,
        Synergy::Sound,
        Synergy::Artificial,
        Synergy::Baby,
        Synergy::Light,
        Synergy::Wild,
        Synergy::Amorphous,
        Synergy::Gourmet,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Synergy::Normal => "NORMAL",
            Synergy::Grass => "GRASS",
            Synergy::Fire => "FIRE",
            Synergy::Water => "WATER",
            Synergy::Electric => "ELECTRIC",
            Synergy::Fighting => "FIGHTING",
            Synergy::Psychic => "PSYCHIC",
            Synergy::Dark => "DARK",
            Synergy::Steel => "STEEL",
            Synergy::Ground => "GROUND",
            Synergy::Poison => "POISON",
            Synergy::Dragon => "DRAGON",
            Synergy::Field => "FIELD",
            Synergy::Monster => "MONSTER",
            Synergy::Human => "HUMAN",
            Synergy::Aquatic => "AQUATIC",
            Synergy::Bug => "BUG",
            Synergy::Flying => "FLYING",
            Synergy::Flora => "FLORA",
            Synergy::Rock => "ROCK",
            Synergy::Ghost => "GHOST",
            Synergy::Fairy => "FAIRY",
            Synergy::Ice => "ICE",
            Synergy::Fossil => "FOSSIL",
            Synergy::Sound => "SOUND",
            Synergy::Artificial => "ARTIFICIAL",
            Synergy::Baby => "BABY",
            Synergy::Light => "LIGHT",
            Synergy::Wild => "WILD",
            Synergy::Amorphous => "AMORPHOUS",
            Synergy::Gourmet => "GOURMET",
        }
    }

    pub fn from_key(key: &str) -> Option<Synergy> {
        Synergy::ALL.into_iter().find(|synergy| synergy.key() == key)
    }

    /// Two-cell badge drawn in place of the synergy icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Synergy::Normal => "NO",
            Synergy::Grass => "GR",
            Synergy::Fire => "FI",
            Synergy::Water => "WA",
            Synergy::Electric => "EL",
            Synergy::Fighting => "FG",
            Synergy::Psychic => "PS",
            Synergy::Dark => "DK",
            Synergy::Steel => "ST",
            Synergy::Ground => "GD",
            Synergy::Poison => "PO",
            Synergy::Dragon => "DR",
            Synergy::Field => "FD",
            Synergy::Monster => "MO",
            Synergy::Human => "HU",
            Synergy::Aquatic => "AQ",
            Synergy::Bug => "BU",
            Synergy::Flying => "FL",
            Synergy::Flora => "FR",
            Synergy::Rock => "RO",
            Synergy::Ghost => "GH",
            Synergy::Fairy => "FA",
            Synergy::Ice => "IC",
            Synergy::Fossil => "FO",
            Synergy::Sound => "SO",
            Synergy::Artificial => "AR",
            Synergy::Baby => "BA",
            Synergy::Light => "LI",
            Synergy::Wild => "WI",
            Synergy::Amorphous => "AM",
            Synergy::Gourmet => "GO",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Synergy::Normal => Color::Rgb(168, 167, 122),
            Synergy::Grass => Color::Rgb(122, 199, 76),
            Synergy::Fire => Color::Rgb(238, 129, 48),
            Synergy::Water => Color::Rgb(99, 144, 240),
            Synergy::Electric => Color::Rgb(247, 208, 44),
            Synergy::Fighting => Color::Rgb(194, 46, 40),
            Synergy::Psychic => Color::Rgb(249, 85, 135),
            Synergy::Dark => Color::Rgb(112, 87, 70),
            Synergy::Steel => Color::Rgb(183, 183, 206),
            Synergy::Ground => Color::Rgb(226, 191, 101),
            Synergy::Poison => Color::Rgb(163, 62, 161),
            Synergy::Dragon => Color::Rgb(111, 53, 252),
            Synergy::Field => Color::Rgb(180, 140, 90),
            Synergy::Monster => Color::Rgb(140, 90, 60),
            Synergy::Human => Color::Rgb(230, 180, 140),
            Synergy::Aquatic => Color::Rgb(60, 120, 200),
            Synergy::Bug => Color::Rgb(166, 185, 26),
            Synergy::Flying => Color::Rgb(169, 143, 243),
            Synergy::Flora => Color::Rgb(230, 120, 180),
            Synergy::Rock => Color::Rgb(182, 161, 54),
            Synergy::Ghost => Color::Rgb(115, 87, 151),
            Synergy::Fairy => Color::Rgb(214, 133, 173),
            Synergy::Ice => Color::Rgb(150, 217, 214),
            Synergy::Fossil => Color::Rgb(160, 140, 120),
            Synergy::Sound => Color::Rgb(250, 160, 200),
            Synergy::Artificial => Color::Rgb(140, 160, 180),
            Synergy::Baby => Color::Rgb(255, 200, 220),
            Synergy::Light => Color::Rgb(255, 240, 150),
            Synergy::Wild => Color::Rgb(170, 110, 70),
            Synergy::Amorphous => Color::Rgb(150, 120, 200),
            Synergy::Gourmet => Color::Rgb(240, 170, 90),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stat {
    Hp,
    Def,
    Atk,
    Pp,
    SpeDef,
    Range,
    Ap,
    Shield,
    CritChance,
    CritPower,
    Speed,
    Luck,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::Hp,
        Stat::Def,
        Stat::Atk,
        Stat::Pp,
        Stat::SpeDef,
        Stat::Range,
        Stat::Ap,
        Stat::Shield,
        Stat::CritChance,
        Stat::CritPower,
        Stat::Speed,
        Stat::Luck,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Def => "DEF",
            Stat::Atk => "ATK",
            Stat::Pp => "PP",
            Stat::SpeDef => "SPE_DEF",
            Stat::Range => "RANGE",
            Stat::Ap => "AP",
            Stat::Shield => "SHIELD",
            Stat::CritChance => "CRIT_CHANCE",
            Stat::CritPower => "CRIT_POWER",
            Stat::Speed => "SPEED",
            Stat::Luck => "LUCK",
        }
    }

    pub fn from_key(key: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|stat| stat.key() == key)
    }

    pub fn icon_path(self) -> String {
        format!("assets/icons/{}.png", self.key())
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Stat::Hp => "♥",
            Stat::Def => "◆",
            Stat::Atk => "⚔",
            Stat::Pp => "✦",
            Stat::SpeDef => "◇",
            Stat::Range => "➶",
            Stat::Ap => "✧",
            Stat::Shield => "▣",
            Stat::CritChance => "✷",
            Stat::CritPower => "✸",
            Stat::Speed => "»",
            Stat::Luck => "♣",
        }
    }
}

/// Status effects that get an inline icon in description text.
pub const STATUS_KEYS: &[&str] = &[
    "BURN",
    "SILENCE",
    "POISONNED",
    "FREEZE",
    "PROTECT",
    "SLEEP",
    "CONFUSION",
    "WOUND",
    "RESURECTION",
    "PARALYSIS",
    "ARMOR_REDUCTION",
    "RUNE_PROTECT",
    "CHARM",
    "FLINCH",
    "CURSE",
    "BLINDED",
    "FATIGUE",
    "LOCKED",
    "POSSESSED",
    "ELECTRIFIED",
];

pub const DAMAGE_KEYS: &[&str] = &["PHYSICAL", "SPECIAL", "TRUE"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    #[default]
    Normal,
    Happy,
    Pain,
    Angry,
    Worried,
    Sad,
    Crying,
    Shouting,
    #[serde(rename = "Teary-Eyed")]
    TearyEyed,
    Determined,
    Joyous,
    Inspired,
    Surprised,
    Dizzy,
    Special0,
    Special1,
    Sigh,
    Stunned,
}

impl Emotion {
    pub const ALL: [Emotion; 18] = [
        Emotion::Normal,
        Emotion::Happy,
        Emotion::Pain,
        Emotion::Angry,
        Emotion::Worried,
        Emotion::Sad,
        Emotion::Crying,
        Emotion::Shouting,
        Emotion::TearyEyed,
        Emotion::Determined,
        Emotion::Joyous,
        Emotion::Inspired,
        Emotion::Surprised,
        Emotion::Dizzy,
        Emotion::Special0,
        Emotion::Special1,
        Emotion::Sigh,
        Emotion::Stunned,
    ];

    /// Portrait file stem in the sprite collab layout.
    pub fn file_name(self) -> &'static str {
        match self {
            Emotion::Normal => "Normal",
            Emotion::Happy => "Happy",
            Emotion::Pain => "Pain",
            Emotion::Angry => "Angry",
            Emotion::Worried => "Worried",
            Emotion::Sad => "Sad",
            Emotion::Crying => "Crying",
            Emotion::Shouting => "Shouting",
            Emotion::TearyEyed => "Teary-Eyed",
            Emotion::Determined => "Determined",
            Emotion::Joyous => "Joyous",
            Emotion::Inspired => "Inspired",
            Emotion::Surprised => "Surprised",
            Emotion::Dizzy => "Dizzy",
            Emotion::Special0 => "Special0",
            Emotion::Special1 => "Special1",
            Emotion::Sigh => "Sigh",
            Emotion::Stunned => "Stunned",
        }
    }

    pub fn next(self) -> Emotion {
        let index = Emotion::ALL
            .iter()
            .position(|emotion| *emotion == self)
            .unwrap_or(0);
        Emotion::ALL[(index + 1) % Emotion::ALL.len()]
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_emotion(value);
        Emotion::ALL
            .into_iter()
            .find(|emotion| normalize_emotion(emotion.file_name()) == wanted)
            .ok_or_else(|| format!("unknown emotion '{value}'"))
    }
}

fn normalize_emotion(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_colors_parse() {
        assert_eq!(Rarity::Common.color(), Color::Rgb(0x68, 0x6d, 0x7d));
        assert_eq!(parse_hex_color("ffffff"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn emotion_parses_loose_spelling() {
        assert_eq!("teary_eyed".parse::<Emotion>(), Ok(Emotion::TearyEyed));
        assert_eq!("HAPPY".parse::<Emotion>(), Ok(Emotion::Happy));
        assert!("grumpy".parse::<Emotion>().is_err());
    }

    #[test]
    fn emotion_cycle_wraps() {
        assert_eq!(Emotion::Normal.next(), Emotion::Happy);
        assert_eq!(Emotion::Stunned.next(), Emotion::Normal);
    }

    #[test]
    fn stat_keys_round_trip_through_lookup() {
        for stat in Stat::ALL {
            assert_eq!(Stat::from_key(stat.key()), Some(stat));
        }
        assert_eq!(Synergy::from_key("FIRE"), Some(Synergy::Fire));
        assert_eq!(Synergy::from_key("fire"), None);
    }
}
