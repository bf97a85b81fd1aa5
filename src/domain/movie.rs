//! Movie records and result pages as returned by the TMDB API.
//!
//! Both types deserialize straight from the TMDB JSON payloads. Fields the
//! service sometimes omits (release date, overview, image paths) fall back to
//! empty values instead of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};

/// A single movie from the remote catalog.
///
/// Records are immutable once received. The gallery keeps them in its result
/// list until the next fetch replaces the list wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier, unique per remote catalog.
    pub id: u64,
    /// Display title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// ISO date string (`YYYY-MM-DD`), possibly empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    /// Opaque CDN path fragment for the poster, e.g. `/abc.jpg`.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Opaque CDN path fragment for the backdrop.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Synopsis text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// Average rating. Stored but never rendered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
}

impl Movie {
    /// Returns the release year: the first four characters of the release date.
    ///
    /// `None` when the release date is empty.
    ///
    /// ```
    /// use movie_gallery::Movie;
    ///
    /// let movie = Movie {
    ///     id: 1,
    ///     title: "Heat".to_string(),
    ///     release_date: "1995-12-15".to_string(),
    ///     poster_path: None,
    ///     backdrop_path: None,
    ///     overview: String::new(),
    ///     vote_average: 7.9,
    /// };
    /// assert_eq!(movie.release_year().as_deref(), Some("1995"));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<String> {
        if self.release_date.is_empty() {
            return None;
        }
        Some(self.release_date.chars().take(4).collect())
    }

    /// Poster path, treating an empty fragment like an absent one.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Backdrop path, treating an empty fragment like an absent one.
    #[must_use]
    pub fn backdrop(&self) -> Option<&str> {
        self.backdrop_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Reads `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One page of search or browse results.
///
/// Only `results` drives the UI. The pagination fields are kept as received;
/// the gallery always works with the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl ResultPage {
    /// The page returned for a blank query: page 1, nothing in it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}
