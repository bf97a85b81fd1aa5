//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings, selection flags and
//! highlight ranges; no business logic runs after they are built.
//!
//! # Example
//!
//! ```rust
//! use movie_gallery::ui::viewmodel::{GridCard, GridInfo, ViewBody};
//!
//! let body = ViewBody::Grid(GridInfo {
//!     columns: 3,
//!     cards: vec![GridCard {
//!         title: "Heat".to_string(),
//!         year: "1995".to_string(),
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 2)],
//!     }],
//! });
//! assert!(matches!(body, ViewBody::Grid(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Exactly one body is shown, chosen from the active screen.
    pub body: ViewBody,
    pub footer: FooterInfo,
}

/// The main area under the search bar.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Spinner-style message while a page is in flight.
    Loading { message: String },
    /// Error banner text.
    Error { message: String },
    /// Card grid of the current results.
    Grid(GridInfo),
    /// One movie with its assets.
    Detail(DetailInfo),
    /// Centered empty-state message.
    Empty(EmptyState),
}

/// Visible window of the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInfo {
    /// Cards per row.
    pub columns: usize,
    /// Cards in the visible window, row-major.
    pub cards: Vec<GridCard>,
}

/// Display information for one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCard {
    /// Title, truncated to the card width.
    pub title: String,

    /// Four-digit year, or `N/A`.
    pub year: String,

    pub is_selected: bool,

    /// Character ranges of the title matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices of the
    /// untruncated title; the renderer clips them to what is shown.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail view of one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub year: String,
    /// Overview wrapped to the available width.
    pub overview: Vec<String>,
    pub poster: AssetInfo,
    pub backdrop: AssetInfo,
}

/// One downloadable image in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    /// Section label, e.g. `Poster (w500)`.
    pub label: String,

    /// Preview URL, empty when the movie has no such image.
    pub preview_url: String,

    /// Action text next to the key hint.
    pub action: String,

    /// Key that triggers the download.
    pub key: char,

    /// `false` renders the action as inert.
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help for the current screen and mode.
    pub keybindings: String,

    /// Attribution, or the last saved download.
    pub notice: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No Movies Found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Shown dimmed while the query is empty.
    pub placeholder: String,

    /// Whether keys currently edit the query.
    pub focused: bool,
}
