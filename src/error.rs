use thiserror::Error;

/// Errors returned by pixel extraction and clustering in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input contains no points (or no pixels).
    #[error("empty input")]
    EmptyInput,

    /// Pixel data does not have 3 (RGB) or 4 (RGBA) channels.
    #[error("unsupported image format: expected 3 (RGB) or 4 (RGBA) channels, found {channels}")]
    UnsupportedFormat {
        /// Channel count that was rejected.
        channels: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Buffer length or point dimensionality is inconsistent.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length or dimensionality.
        expected: usize,
        /// Found length or dimensionality.
        found: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
