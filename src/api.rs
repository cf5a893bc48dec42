//! Portrait and meta endpoint I/O with a sha256-keyed disk cache.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::data::{ItemId, Pkm};
use crate::error::DataError;
use crate::portrait::is_remote;

/// One row of the meta endpoint's popular item report.
#[derive(Clone, Debug, Deserialize)]
struct MetaEntry {
    name: Pkm,
    #[serde(default)]
    items: Vec<ItemId>,
}

/// Reads portrait bytes from a URL (cached) or a local path.
pub async fn load_portrait(src: &str) -> Result<Vec<u8>, DataError> {
    if is_remote(src) {
        fetch_bytes_cached(src).await
    } else {
        fs::read(src).await.map_err(|err| DataError::io(src, err))
    }
}

/// Fetches per-species popular items. Never cached: the report changes daily.
pub async fn fetch_popular_items(url: &str) -> Result<BTreeMap<Pkm, Vec<ItemId>>, DataError> {
    let response = http_client().get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    parse_popular_items(&bytes)
}

pub fn parse_popular_items(bytes: &[u8]) -> Result<BTreeMap<Pkm, Vec<ItemId>>, DataError> {
    let entries: Vec<MetaEntry> = serde_json::from_slice(bytes)?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.name, entry.items))
        .collect())
}

async fn fetch_bytes_cached(url: &str) -> Result<Vec<u8>, DataError> {
    let cache_path = cache_path("http", url);
    if let Some(bytes) = read_cache(&cache_path).await {
        tracing::debug!(url, "portrait cache hit");
        return Ok(bytes);
    }

    let response = http_client().get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?.to_vec();
    write_cache(&cache_path, &bytes).await;
    Ok(bytes)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

pub fn cache_root() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shopdex")
}

fn cache_path(kind: &str, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    cache_root().join(kind).join(digest)
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    if let Err(err) = fs::write(path, bytes).await {
        tracing::warn!(path = %path.display(), %err, "failed to write cache entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_paths_are_stable_and_distinct() {
        let a = cache_path("http", "https://example.com/a.png");
        let b = cache_path("http", "https://example.com/b.png");
        assert_eq!(a, cache_path("http", "https://example.com/a.png"));
        assert_ne!(a, b);
        assert_eq!(a.file_name().map(|n| n.len()), Some(64));
    }

    #[test]
    fn popular_items_report_parses() {
        let report = br#"[
            {"name": "PIKACHU", "items": ["CHOICE_SPECS", "SHELL_BELL"]},
            {"name": "MEWTWO"}
        ]"#;
        let items = parse_popular_items(report).expect("report");
        assert_eq!(
            items.get(&Pkm::from("PIKACHU")).map(Vec::len),
            Some(2)
        );
        assert_eq!(items.get(&Pkm::from("MEWTWO")), Some(&Vec::new()));
    }

    #[tokio::test]
    async fn local_portrait_missing_is_io_error() {
        let err = load_portrait("/definitely/not/here/Normal.png")
            .await
            .expect_err("missing file");
        assert!(matches!(err, DataError::Io { .. }));
    }
}
