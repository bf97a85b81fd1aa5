//! Input mode and screen types for the application.
//!
//! [`Screen`] is the explicit view state: exactly one variant is active at a
//! time. [`InputMode`] decides whether keys edit the search query or navigate.

use crate::domain::Movie;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the grid and trigger detail actions.
    Normal,
    /// Keys edit the search query; Enter submits.
    Search,
}

/// The active screen.
///
/// Rendering precedence, when several conditions could apply, is resolved by
/// construction: fetches set `Loading`, failures set `Error`, opening a card
/// sets `Detail`, and [`Screen::settled`] picks between the grid and the two
/// empty states.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed with this user-facing message.
    Error(String),
    /// A single movie with its download controls.
    Detail(Movie),
    /// The current result list.
    Grid,
    /// No results and no query yet.
    EmptyNoQuery,
    /// No results for this query.
    EmptyWithQuery(String),
}

impl Screen {
    /// The screen implied by a result list and query when nothing is loading,
    /// failed or selected.
    ///
    /// ```
    /// use movie_gallery::app::Screen;
    ///
    /// assert_eq!(Screen::settled(&[], "  "), Screen::EmptyNoQuery);
    /// assert_eq!(
    ///     Screen::settled(&[], "zzzznotfound"),
    ///     Screen::EmptyWithQuery("zzzznotfound".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn settled(results: &[Movie], query: &str) -> Self {
        if !results.is_empty() {
            Self::Grid
        } else if query.trim().is_empty() {
            Self::EmptyNoQuery
        } else {
            Self::EmptyWithQuery(query.to_string())
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Detail(_) => "detail",
            Self::Grid => "grid",
            Self::EmptyNoQuery => "empty_no_query",
            Self::EmptyWithQuery(_) => "empty_with_query",
        }
    }
}
