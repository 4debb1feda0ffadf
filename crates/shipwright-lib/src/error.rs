use thiserror::Error;

/// Convenient result alias for the shipwright library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Normal editing never produces one of these; only loading a catalog and
/// importing or exporting a snapshot can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when catalog data fails validation.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Raised when an imported snapshot is structurally invalid.
    #[error("snapshot rejected: {message}")]
    InvalidSnapshot { message: String },

    /// Raised when a snapshot declares an API version this build cannot read.
    #[error("unsupported snapshot version {version}{}", format_supported(.supported))]
    UnsupportedSnapshotVersion {
        version: String,
        supported: Vec<String>,
    },

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_supported(supported: &[String]) -> String {
    if supported.is_empty() {
        String::new()
    } else {
        format!(
            "; supported major versions: {}",
            supported
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
