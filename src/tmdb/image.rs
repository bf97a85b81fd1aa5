//! Image URL construction for the TMDB CDN.
//!
//! Sizes are pre-baked path segments served by the CDN, so building an image
//! URL is plain string concatenation with no network access.

use std::fmt;

/// Default CDN base used when no image base is configured.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// The three image widths the gallery asks the CDN for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Poster width (`w500`), used for grid and detail previews.
    W500,
    /// Wide backdrop width (`w1920`).
    W1920,
    /// Full original resolution, used for downloads.
    Original,
}

impl ImageSize {
    /// The CDN path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::W1920 => "w1920",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds an image URL against an explicit CDN base.
///
/// Returns an empty string when the path fragment is absent or empty.
/// Otherwise returns `{base}/{size}{path}`; the fragment is not validated.
///
/// ```
/// use movie_gallery::tmdb::{build_image_url_with_base, ImageSize};
///
/// let url = build_image_url_with_base("https://cdn.test/t/p", Some("/a.jpg"), ImageSize::W1920);
/// assert_eq!(url, "https://cdn.test/t/p/w1920/a.jpg");
/// assert_eq!(build_image_url_with_base("https://cdn.test/t/p", None, ImageSize::W500), "");
/// ```
#[must_use]
pub fn build_image_url_with_base(base: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(fragment) if !fragment.is_empty() => format!("{base}/{size}{fragment}"),
        _ => String::new(),
    }
}

/// Builds an image URL against the default TMDB CDN.
///
/// ```
/// use movie_gallery::tmdb::{build_image_url, ImageSize};
///
/// assert_eq!(
///     build_image_url(Some("/poster.jpg"), ImageSize::Original),
///     "https://image.tmdb.org/t/p/original/poster.jpg"
/// );
/// ```
#[must_use]
pub fn build_image_url(path: Option<&str>, size: ImageSize) -> String {
    build_image_url_with_base(DEFAULT_IMAGE_BASE_URL, path, size)
}
