use thiserror::Error;

/// Failures while loading or resolving the read-only shop data.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("unknown species {0}")]
    UnknownSpecies(String),
    #[error("{species}: stars {stars} outside 1..={stages}")]
    InvalidStages { species: String, stars: u8, stages: u8 },
    #[error("{table} references unknown species {species}")]
    DanglingReference { table: &'static str, species: String },
}

impl DataError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
