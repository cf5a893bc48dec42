//! Dotted-key translations loaded from i18next-style nested JSON.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataError;

const BUILTIN_EN: &str = include_str!("../assets/locales/en.json");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Translations {
    pub language: String,
    entries: BTreeMap<String, String>,
}

impl Translations {
    pub fn builtin_en() -> Result<Self, DataError> {
        Self::from_json_str("en", BUILTIN_EN)
    }

    pub fn from_json_str(language: &str, source: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(source)?;
        let mut entries = BTreeMap::new();
        flatten("", &value, &mut entries);
        Ok(Self {
            language: language.to_string(),
            entries,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| DataError::io(path.display().to_string(), err))?;
        let language = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json_str(&language, &source)
    }

    /// Looks up a dotted key; missing keys render as the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.entries.get(key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key),
        }
    }

    pub fn tf(&self, namespace: &str, id: &str) -> String {
        let key = format!("{namespace}.{id}");
        self.t(&key).into_owned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        Value::Number(number) => {
            out.insert(prefix.to_string(), number.to_string());
        }
        Value::Bool(flag) => {
            out.insert(prefix.to_string(), flag.to_string());
        }
        Value::Array(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_keys_are_flattened() {
        let translations = Translations::from_json_str(
            "en",
            r#"{"pkm": {"PIKACHU": "Pikachu"}, "signature_dish": "Signature dish"}"#,
        )
        .expect("json");
        assert_eq!(translations.t("pkm.PIKACHU"), "Pikachu");
        assert_eq!(translations.t("signature_dish"), "Signature dish");
        assert_eq!(translations.len(), 2);
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let translations = Translations::default();
        assert_eq!(translations.t("rarity.MYTHIC"), "rarity.MYTHIC");
        assert_eq!(translations.tf("item", "LEFTOVERS"), "item.LEFTOVERS");
    }

    #[test]
    fn builtin_locale_loads() {
        let translations = Translations::builtin_en().expect("builtin en");
        assert!(translations.contains("signature_dish"));
        assert_eq!(translations.language, "en");
    }
}
