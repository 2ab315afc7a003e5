//! Blog content errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading blog content
#[derive(Debug, Error)]
pub enum BlogError {
    /// The blog directory exists but could not be listed
    #[error("failed to list {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slug cannot name a file in the blog directory
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),
}
