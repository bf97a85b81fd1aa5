//! Error types for the movie gallery plugin.
//!
//! [`GalleryError`] is the single error type used across the crate and
//! [`Result`] is the matching alias. Fetch failures carry no structured detail
//! beyond which endpoint failed; the view layer turns them into one of two fixed
//! user-facing messages.

use thiserror::Error;

/// The main error type for movie gallery operations.
///
/// # Examples
///
/// ```
/// use movie_gallery::GalleryError;
///
/// let err = GalleryError::Fetch("search failed");
/// assert_eq!(err.to_string(), "Fetch failed: search failed");
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// A metadata endpoint returned a non-success status or an unreadable page.
    ///
    /// The payload is one of the fixed endpoint details (`"search failed"`,
    /// `"popular failed"`).
    #[error("Fetch failed: {0}")]
    Fetch(&'static str),

    /// An image could not be fetched or written to disk.
    ///
    /// Never shown to the user. The download helper degrades to opening the
    /// image URL externally instead.
    #[error("Download failed: {0}")]
    Download(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for movie gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
