//! User preferences persisted as RON, plus file logging setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::error::DataError;

const APP_DIR: &str = "shopdex";
const PREFERENCES_FILE: &str = "preferences.ron";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Smooth portrait scaling; when off portraits are drawn pixelated.
    pub antialiasing: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { antialiasing: true }
    }
}

impl Preferences {
    pub fn pixelated(&self) -> bool {
        !self.antialiasing
    }

    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(PREFERENCES_FILE)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, DataError> {
        Ok(ron::de::from_str(source)?)
    }

    pub fn to_ron_string(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .unwrap_or_else(|_| String::from("()"))
    }

    /// Missing files yield defaults; unreadable ones are errors.
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        match tokio::fs::read_to_string(path).await {
            Ok(source) => Self::from_ron_str(&source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(DataError::io(path.display().to_string(), err)),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), DataError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| DataError::io(parent.display().to_string(), err))?;
        }
        tokio::fs::write(path, self.to_ron_string())
            .await
            .map_err(|err| DataError::io(path.display().to_string(), err))
    }
}

pub fn log_directory() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// Routes tracing output to `<cache>/shopdex/logs/shopdex.log`. The terminal
/// belongs to the TUI, so nothing is written to stderr.
pub fn setup_logging(dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, "shopdex.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shopdex=info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antialiasing_defaults_on() {
        let prefs = Preferences::default();
        assert!(prefs.antialiasing);
        assert!(!prefs.pixelated());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let prefs = Preferences::from_ron_str("()").expect("empty prefs");
        assert_eq!(prefs, Preferences::default());
        let prefs = Preferences::from_ron_str("(antialiasing: false)").expect("prefs");
        assert!(prefs.pixelated());
    }

    #[tokio::test]
    async fn save_then_load_restores_preferences() {
        let dir = std::env::temp_dir().join(format!("shopdex-prefs-{}", std::process::id()));
        let path = dir.join(PREFERENCES_FILE);
        let prefs = Preferences {
            antialiasing: false,
        };
        prefs.save(&path).await.expect("save");
        assert_eq!(Preferences::load(&path).await.expect("load"), prefs);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("shopdex-no-such-dir/preferences.ron");
        assert_eq!(
            Preferences::load(&path).await.expect("defaults"),
            Preferences::default()
        );
    }
}
