//! Inline icon substitution for localized description text.
//!
//! Uppercase keywords that name a stat, synergy, status or damage kind become
//! icon tokens. Bracketed lists such as `[10,20,40,SP]` become tier tokens; the
//! `SP` marker means the values scale with ability power.

use serde::{Deserialize, Serialize};

use crate::data::{Stat, Synergy, DAMAGE_KEYS, STATUS_KEYS};
use crate::i18n::Translations;

const SCALING_MARKER: &str = "SP";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconKind {
    Stat(Stat),
    Synergy(Synergy),
    Status,
    Damage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DescriptionToken {
    Text(String),
    Icon {
        kind: IconKind,
        key: String,
        label: String,
    },
    Tiers {
        values: Vec<String>,
        active: Option<usize>,
        scaled: bool,
    },
}

/// Values that parameterize tier highlighting and scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescriptionContext {
    pub stars: Option<u8>,
    pub ap: i32,
}

pub fn add_icons_to_description(
    text: &str,
    ctx: DescriptionContext,
    translations: &Translations,
) -> Vec<DescriptionToken> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                if let Some(tiers) = parse_tiers(&rest[1..end], ctx) {
                    flush(&mut buffer, &mut tokens);
                    tokens.push(tiers);
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }

        if ch.is_ascii_uppercase() {
            let len = rest
                .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let after = rest[len..].chars().next();
            let bounded = !ends_in_word(&buffer) && !after.is_some_and(|c| c.is_alphanumeric());
            if bounded {
                if let Some(kind) = classify(word) {
                    flush(&mut buffer, &mut tokens);
                    tokens.push(DescriptionToken::Icon {
                        kind,
                        key: word.to_string(),
                        label: icon_label(kind, word, translations),
                    });
                    rest = &rest[len..];
                    continue;
                }
            }
            buffer.push_str(word);
            rest = &rest[len..];
            continue;
        }

        buffer.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut buffer, &mut tokens);
    tokens
}

/// Flattens tokens back to text, icons shown by label and tiers joined by `/`.
pub fn plain_text(tokens: &[DescriptionToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            DescriptionToken::Text(text) => out.push_str(text),
            DescriptionToken::Icon { label, .. } => out.push_str(label),
            DescriptionToken::Tiers { values, .. } => out.push_str(&values.join("/")),
        }
    }
    out
}

fn classify(word: &str) -> Option<IconKind> {
    if word.len() < 2 {
        return None;
    }
    if let Some(stat) = Stat::from_key(word) {
        return Some(IconKind::Stat(stat));
    }
    if let Some(synergy) = Synergy::from_key(word) {
        return Some(IconKind::Synergy(synergy));
    }
    if STATUS_KEYS.contains(&word) {
        return Some(IconKind::Status);
    }
    if DAMAGE_KEYS.contains(&word) {
        return Some(IconKind::Damage);
    }
    None
}

fn icon_label(kind: IconKind, key: &str, translations: &Translations) -> String {
    let namespace = match kind {
        IconKind::Stat(_) => "stat",
        IconKind::Synergy(_) => "synergy",
        IconKind::Status => "status",
        IconKind::Damage => "damage",
    };
    translations.tf(namespace, key)
}

fn parse_tiers(inner: &str, ctx: DescriptionContext) -> Option<DescriptionToken> {
    let mut parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let scaled = parts.last() == Some(&SCALING_MARKER);
    if scaled {
        parts.pop();
    }
    if parts.is_empty() {
        return None;
    }
    let numbers = parts
        .iter()
        .map(|part| part.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    let values = numbers
        .iter()
        .zip(&parts)
        .map(|(value, raw)| {
            if scaled {
                let factor = 1.0 + f64::from(ctx.ap) / 100.0;
                format!("{}", (value * factor).round() as i64)
            } else {
                raw.to_string()
            }
        })
        .collect::<Vec<_>>();

    let active = ctx
        .stars
        .map(|stars| usize::from(stars.max(1) - 1).min(values.len() - 1));

    Some(DescriptionToken::Tiers {
        values,
        active,
        scaled,
    })
}

fn ends_in_word(buffer: &str) -> bool {
    buffer.chars().last().is_some_and(|c| c.is_alphanumeric())
}

fn flush(buffer: &mut String, tokens: &mut Vec<DescriptionToken>) {
    if !buffer.is_empty() {
        tokens.push(DescriptionToken::Text(std::mem::take(buffer)));
    }
}
