//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the gallery: the query being
//! typed, the current result list, the active [`Screen`], the grid cursor and
//! the request ticket used to drop stale responses. The view model is a pure
//! function of this state and the terminal size.

use super::actions::Action;
use super::modes::{InputMode, Screen};
use crate::domain::{Movie, ResultPage};
use crate::download::DownloadOutcome;
use crate::infrastructure::strip_host_prefix;
use crate::tmdb::{ImageSize, MetadataClient, PageKind};
use crate::ui::helpers::{truncate_chars, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AssetInfo, DetailInfo, EmptyState, FooterInfo, GridCard, GridInfo, HeaderInfo, SearchBarInfo,
    UIViewModel, ViewBody,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Shown when the popular titles cannot be loaded.
pub const POPULAR_FAILED_MESSAGE: &str = "Could not load movies. Try searching instead.";

/// Shown when a title search fails.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Width of one grid card, including its gutter.
pub const CARD_WIDTH: usize = 26;

/// Height of one grid card: title, year badge, spacer.
pub const CARD_HEIGHT: usize = 3;

/// Rows used by everything but the body: blank, header, border, search box,
/// border, footer and one spare.
pub const CHROME_ROWS: usize = 9;

const ATTRIBUTION: &str = "All imagery provided by The Movie Database (TMDB)";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search query as currently typed.
    pub query: String,

    /// Results of the last successful fetch, in the order received.
    pub results: Vec<Movie>,

    /// The active screen.
    pub screen: Screen,

    /// Index of the highlighted card within `results`.
    pub cursor: usize,

    /// Whether keys edit the query or navigate.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Builds request URLs and reads responses.
    pub client: MetadataClient,

    /// What happened to the most recent download.
    pub last_download: Option<DownloadOutcome>,

    latest_ticket: u64,
    viewport: (usize, usize),
}

impl AppState {
    /// Creates the state shown before first activation.
    ///
    /// The screen starts as `Loading`; the first `Activate` event issues the
    /// popular-titles fetch that resolves it.
    #[must_use]
    pub fn new(client: MetadataClient, theme: Theme) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            screen: Screen::Loading,
            cursor: 0,
            input_mode: InputMode::Normal,
            theme,
            client,
            last_download: None,
            latest_ticket: 0,
            viewport: (24, 80),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    /// Ticket of the most recently issued page request (0 before any).
    #[must_use]
    pub const fn latest_ticket(&self) -> u64 {
        self.latest_ticket
    }

    /// The movie shown in the detail view, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        match &self.screen {
            Screen::Detail(movie) => Some(movie),
            _ => None,
        }
    }

    /// The card under the grid cursor.
    #[must_use]
    pub fn movie_under_cursor(&self) -> Option<&Movie> {
        self.results.get(self.cursor)
    }

    /// Enters `Loading` and returns the fetch to perform under a fresh ticket.
    pub fn start_fetch(&mut self, kind: PageKind, url: String) -> Action {
        self.latest_ticket += 1;
        self.screen = Screen::Loading;
        tracing::debug!(ticket = self.latest_ticket, endpoint = kind.as_str(), "fetch started");
        Action::FetchPage {
            ticket: self.latest_ticket,
            kind,
            url,
        }
    }

    /// Starts the first-page popular fetch.
    pub fn fetch_popular(&mut self) -> Action {
        let url = self.client.get_popular_default();
        self.start_fetch(PageKind::Popular, url)
    }

    /// Replaces the result list and settles on the matching screen.
    pub fn apply_page(&mut self, page: ResultPage) {
        self.results = page.results;
        self.cursor = 0;
        self.screen = Screen::settled(&self.results, &self.query);
        tracing::debug!(
            result_count = self.results.len(),
            screen = self.screen.name(),
            "result page applied"
        );
    }

    /// Shows the failure message for `kind`. The previous results are kept.
    pub fn apply_failure(&mut self, kind: PageKind) {
        let message = match kind {
            PageKind::Popular => POPULAR_FAILED_MESSAGE,
            PageKind::Search => SEARCH_FAILED_MESSAGE,
        };
        self.screen = Screen::Error(message.to_string());
    }

    /// Leaves the detail view for the screen implied by results and query.
    pub fn return_from_detail(&mut self) {
        self.screen = Screen::settled(&self.results, &self.query);
    }

    /// Records the terminal size used for grid navigation.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Number of card columns at the current terminal width.
    #[must_use]
    pub fn grid_columns(&self) -> usize {
        Self::columns_for(self.viewport.1)
    }

    const fn columns_for(cols: usize) -> usize {
        let columns = cols / CARD_WIDTH;
        if columns == 0 {
            1
        } else {
            columns
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor + 1 < self.results.len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        let columns = self.grid_columns();
        if self.cursor >= columns {
            self.cursor -= columns;
        }
    }

    pub fn move_cursor_down(&mut self) {
        let columns = self.grid_columns();
        if self.cursor + columns < self.results.len() {
            self.cursor += columns;
        }
    }

    /// Computes the renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match &self.screen {
            Screen::Loading => ViewBody::Loading {
                message: "Fetching high-res assets...".to_string(),
            },
            Screen::Error(message) => ViewBody::Error {
                message: message.clone(),
            },
            Screen::Detail(movie) => ViewBody::Detail(self.compute_detail(movie, cols)),
            Screen::Grid => ViewBody::Grid(self.compute_grid(rows, cols)),
            Screen::EmptyNoQuery => ViewBody::Empty(EmptyState {
                message: "Start Your Search".to_string(),
                subtitle: "Type a movie title to explore high-definition posters and cinematic backdrops."
                    .to_string(),
            }),
            Screen::EmptyWithQuery(query) => ViewBody::Empty(EmptyState {
                message: "No Movies Found".to_string(),
                subtitle: format!(
                    "We couldn't find any movies matching \"{query}\". Try a different title."
                ),
            }),
        };

        UIViewModel {
            header: HeaderInfo {
                title: " MovieGallery ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                placeholder: "Search movie title...".to_string(),
                focused: self.input_mode == InputMode::Search,
            },
            body,
            footer: self.compute_footer(),
        }
    }

    /// Lays out the visible window of cards so the cursor row stays on screen.
    fn compute_grid(&self, rows: usize, cols: usize) -> GridInfo {
        let columns = Self::columns_for(cols);
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);

        let cursor_row = self.cursor / columns;
        let first_row = (cursor_row + 1).saturating_sub(visible_rows);
        let start = (first_row * columns).min(self.results.len());
        let end = ((first_row + visible_rows) * columns).min(self.results.len());

        let query = self.query.trim();
        let matcher = if query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let cards = self.results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| GridCard {
                title: truncate_chars(&movie.title, CARD_WIDTH - 2),
                year: movie.release_year().unwrap_or_else(|| "N/A".to_string()),
                is_selected: start + offset == self.cursor,
                highlight_ranges: matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| compute_highlight_ranges(&movie.title, query, m)),
            })
            .collect();

        GridInfo { columns, cards }
    }

    fn compute_detail(&self, movie: &Movie, cols: usize) -> DetailInfo {
        let wrap_width = cols.saturating_sub(4).clamp(20, 100);

        DetailInfo {
            title: movie.title.clone(),
            year: movie.release_year().unwrap_or_else(|| "N/A".to_string()),
            overview: wrap_text(&movie.overview, wrap_width),
            poster: AssetInfo {
                label: "Poster (w500)".to_string(),
                preview_url: self.client.build_image_url(movie.poster(), ImageSize::W500),
                action: "Download High-Res Poster".to_string(),
                key: 'p',
                enabled: movie.poster().is_some(),
            },
            backdrop: AssetInfo {
                label: "Backdrop (w1920)".to_string(),
                preview_url: self.client.build_image_url(movie.backdrop(), ImageSize::W1920),
                action: "Download Ultra-Wide Backdrop".to_string(),
                key: 'b',
                enabled: movie.backdrop().is_some(),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, &self.screen) {
            (InputMode::Search, _) => "Enter: search  Esc: cancel  Type a movie title",
            (InputMode::Normal, Screen::Grid) => {
                "h/j/k/l: move  Enter: open  /: search  r: popular  q: quit"
            }
            (InputMode::Normal, Screen::Detail(_)) => {
                "p: download poster  b: download backdrop  Esc: back  q: quit"
            }
            (InputMode::Normal, _) => "/: search  r: popular  q: quit",
        };

        let notice = match &self.last_download {
            Some(DownloadOutcome::Saved { path }) => {
                format!("Saved {}", strip_host_prefix(&path.to_string_lossy()))
            }
            _ => ATTRIBUTION.to_string(),
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            notice,
        }
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::TmdbConfig;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_date: "2001-01-01".to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            backdrop_path: None,
            overview: "An overview.".to_string(),
            vote_average: 6.5,
        }
    }

    fn state_with(count: u64) -> AppState {
        let mut state = AppState::new(MetadataClient::new(TmdbConfig::default()), Theme::default());
        state.results = (1..=count).map(|i| movie(i, &format!("Movie {i}"))).collect();
        state.screen = Screen::Grid;
        state
    }

    #[test]
    fn tickets_increase_per_fetch() {
        let mut state = state_with(0);
        let first = state.fetch_popular();
        let second = state.fetch_popular();
        assert!(matches!(first, Action::FetchPage { ticket: 1, .. }));
        assert!(matches!(second, Action::FetchPage { ticket: 2, .. }));
        assert_eq!(state.latest_ticket(), 2);
        assert!(state.is_loading());
    }

    #[test]
    fn cursor_moves_within_grid_bounds() {
        let mut state = state_with(7);
        state.set_viewport(30, CARD_WIDTH * 3);
        assert_eq!(state.grid_columns(), 3);

        state.move_cursor_down();
        assert_eq!(state.cursor, 3);
        state.move_cursor_down();
        assert_eq!(state.cursor, 6);
        state.move_cursor_down();
        assert_eq!(state.cursor, 6);
        state.move_cursor_right();
        assert_eq!(state.cursor, 6);
        state.move_cursor_up();
        assert_eq!(state.cursor, 3);
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn narrow_terminal_still_has_one_column() {
        let mut state = state_with(2);
        state.set_viewport(24, 10);
        assert_eq!(state.grid_columns(), 1);
    }

    #[test]
    fn grid_window_follows_cursor() {
        let mut state = state_with(40);
        state.cursor = 39;
        // 2 columns, (18 - 9) / 3 = 3 visible card rows.
        let vm = state.compute_viewmodel(18, CARD_WIDTH * 2);
        let ViewBody::Grid(grid) = vm.body else {
            panic!("expected grid");
        };
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.cards.len(), 6);
        assert!(grid.cards.last().unwrap().is_selected);
        assert_eq!(grid.cards.last().unwrap().title, "Movie 40");
    }

    #[test]
    fn grid_cards_show_year_or_na() {
        let mut state = state_with(1);
        state.results.push(Movie {
            release_date: String::new(),
            ..movie(2, "Undated")
        });
        let vm = state.compute_viewmodel(24, 80);
        let ViewBody::Grid(grid) = vm.body else {
            panic!("expected grid");
        };
        assert_eq!(grid.cards[0].year, "2001");
        assert_eq!(grid.cards[1].year, "N/A");
    }

    #[test]
    fn query_matches_are_highlighted() {
        let mut state = state_with(0);
        state.results = vec![movie(1, "The Dark Knight")];
        state.screen = Screen::Grid;
        state.query = "dark".to_string();

        let vm = state.compute_viewmodel(24, 80);
        let ViewBody::Grid(grid) = vm.body else {
            panic!("expected grid");
        };
        assert_eq!(grid.cards[0].highlight_ranges, vec![(4, 8)]);
    }

    #[test]
    fn detail_disables_missing_backdrop() {
        let mut state = state_with(1);
        state.screen = Screen::Detail(movie(1, "Movie 1"));

        let vm = state.compute_viewmodel(24, 80);
        let ViewBody::Detail(detail) = vm.body else {
            panic!("expected detail");
        };
        assert!(detail.poster.enabled);
        assert_eq!(detail.poster.preview_url, "https://image.tmdb.org/t/p/w500/1.jpg");
        assert!(!detail.backdrop.enabled);
        assert_eq!(detail.backdrop.preview_url, "");
    }

    #[test]
    fn footer_reports_saved_download() {
        let mut state = state_with(1);
        assert!(state.compute_viewmodel(24, 80).footer.notice.contains("TMDB"));

        state.last_download = Some(DownloadOutcome::Saved {
            path: "/host/Heat_Poster.jpg".into(),
        });
        assert_eq!(state.compute_viewmodel(24, 80).footer.notice, "Saved /Heat_Poster.jpg");
    }
}
