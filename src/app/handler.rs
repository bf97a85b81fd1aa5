//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single reducer of the application: it takes the
//! current state and one event, moves the state to its next [`Screen`] and
//! returns the side effects to run. It performs no I/O, so every transition
//! can be exercised without Zellij or a network.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Activate`, `Home`, `PermissionsDenied`, `Close`
//! - **Search input**: `FocusSearch`, `ExitSearch`, `Char`, `Backspace`, `Submit`
//! - **Grid and detail**: `Move*`, `OpenSelected`, `Back`, `DownloadPoster`, `DownloadBackdrop`
//! - **Completions**: `PageLoaded`, `DownloadFinished`

use super::modes::{InputMode, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::download::{DownloadHelper, DownloadOutcome};
use crate::tmdb::{ImageSize, PageFetch, PageKind};

/// Events triggered by user input or by completed host requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// First activation: load popular titles if nothing is shown yet.
    Activate,
    /// Brand click: clear query and selection, reload popular titles.
    Home,
    /// The host refused the permissions the gallery needs.
    PermissionsDenied,
    /// Hides the plugin pane.
    Close,

    /// Moves keyboard focus to the search bar.
    FocusSearch,
    /// Leaves the search bar, keeping the typed query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Runs a title search for the current query.
    Submit,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Opens the card under the cursor in the detail view.
    OpenSelected,
    /// Leaves the detail view.
    Back,
    /// Downloads the original-size poster of the detail movie.
    DownloadPoster,
    /// Downloads the original-size backdrop of the detail movie.
    DownloadBackdrop,

    /// A page request finished.
    PageLoaded {
        ticket: u64,
        kind: PageKind,
        status: u16,
        body: Vec<u8>,
    },

    /// The download helper finished with this outcome.
    DownloadFinished(DownloadOutcome),
}

/// Which image of the detail movie to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Asset {
    Poster,
    Backdrop,
}

/// Processes an event, moves the state on and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` keeps the
/// signature open for handlers that need to fail.
///
/// # Example
///
/// ```
/// use movie_gallery::{handle_event, initialize, Action, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (render, actions) = handle_event(&mut state, &Event::Activate)?;
/// assert!(render);
/// assert!(matches!(actions.as_slice(), [Action::FetchPage { .. }]));
/// assert!(state.is_loading());
/// # Ok::<(), movie_gallery::GalleryError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = event_name(event), screen = state.screen.name()).entered();

    match event {
        Event::Activate => {
            let untouched = state.results.is_empty()
                && state.query.is_empty()
                && state.selected_movie().is_none();
            if !untouched {
                tracing::debug!("already activated, ignoring");
                return Ok((false, vec![]));
            }
            Ok((true, vec![state.fetch_popular()]))
        }
        Event::Home => {
            tracing::debug!("returning to popular titles");
            state.query.clear();
            state.input_mode = InputMode::Normal;
            Ok((true, vec![state.fetch_popular()]))
        }
        Event::PermissionsDenied => {
            state.screen = Screen::Error(
                "Web access was not granted. Reload the plugin and allow it.".to_string(),
            );
            Ok((true, vec![]))
        }
        Event::Close => Ok((false, vec![Action::CloseFocus])),

        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "query updated");
            resettle_empty_state(state);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.query.pop();
            resettle_empty_state(state);
            Ok((true, vec![]))
        }
        Event::Submit => {
            if state.query.trim().is_empty() {
                tracing::debug!("blank query, search not submitted");
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;

            match state.client.search_by_title(&state.query) {
                PageFetch::Request(url) => Ok((true, vec![state.start_fetch(PageKind::Search, url)])),
                PageFetch::Ready(page) => {
                    state.apply_page(page);
                    Ok((true, vec![]))
                }
            }
        }

        Event::MoveLeft | Event::MoveRight | Event::MoveUp | Event::MoveDown => {
            if state.screen != Screen::Grid {
                return Ok((false, vec![]));
            }
            let before = state.cursor;
            match event {
                Event::MoveLeft => state.move_cursor_left(),
                Event::MoveRight => state.move_cursor_right(),
                Event::MoveUp => state.move_cursor_up(),
                _ => state.move_cursor_down(),
            }
            Ok((state.cursor != before, vec![]))
        }
        Event::OpenSelected => {
            if state.screen != Screen::Grid {
                return Ok((false, vec![]));
            }
            let Some(movie) = state.movie_under_cursor().cloned() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(movie_id = movie.id, title = %movie.title, "opening detail");
            state.screen = Screen::Detail(movie);
            Ok((true, vec![]))
        }
        Event::Back => {
            if state.selected_movie().is_none() {
                return Ok((false, vec![]));
            }
            state.return_from_detail();
            Ok((true, vec![]))
        }
        Event::DownloadPoster => Ok((false, download_action(state, Asset::Poster))),
        Event::DownloadBackdrop => Ok((false, download_action(state, Asset::Backdrop))),

        Event::PageLoaded {
            ticket,
            kind,
            status,
            body,
        } => {
            if *ticket != state.latest_ticket() {
                tracing::debug!(
                    ticket,
                    latest = state.latest_ticket(),
                    "dropping stale page response"
                );
                return Ok((false, vec![]));
            }

            match state.client.read_page(*kind, *status, body) {
                Ok(page) => state.apply_page(page),
                Err(e) => {
                    tracing::warn!(error = %e, status, "page request failed");
                    state.apply_failure(*kind);
                }
            }
            Ok((true, vec![]))
        }
        Event::DownloadFinished(outcome) => {
            tracing::debug!(outcome = ?outcome, "download finished");
            state.last_download = Some(outcome.clone());
            Ok((true, vec![]))
        }
    }
}

/// Empty states name the live query, so they follow it as it is edited.
fn resettle_empty_state(state: &mut AppState) {
    if matches!(state.screen, Screen::EmptyNoQuery | Screen::EmptyWithQuery(_)) {
        state.screen = Screen::settled(&state.results, &state.query);
    }
}

/// Builds the download for the detail movie's asset; empty when there is no
/// detail movie or the asset path is absent.
fn download_action(state: &AppState, asset: Asset) -> Vec<Action> {
    let Some(movie) = state.selected_movie() else {
        return vec![];
    };

    let (path, suffix) = match asset {
        Asset::Poster => (movie.poster(), "Poster"),
        Asset::Backdrop => (movie.backdrop(), "Backdrop"),
    };
    let Some(path) = path else {
        tracing::debug!(movie_id = movie.id, asset = ?asset, "no image path, download ignored");
        return vec![];
    };

    let url = state.client.build_image_url(Some(path), ImageSize::Original);
    let file_name = format!("{}_{suffix}.jpg", movie.title);
    vec![Action::DownloadImage(DownloadHelper::begin(&url, &file_name))]
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Activate => "activate",
        Event::Home => "home",
        Event::PermissionsDenied => "permissions_denied",
        Event::Close => "close",
        Event::FocusSearch => "focus_search",
        Event::ExitSearch => "exit_search",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::Submit => "submit",
        Event::MoveLeft => "move_left",
        Event::MoveRight => "move_right",
        Event::MoveUp => "move_up",
        Event::MoveDown => "move_down",
        Event::OpenSelected => "open_selected",
        Event::Back => "back",
        Event::DownloadPoster => "download_poster",
        Event::DownloadBackdrop => "download_backdrop",
        Event::PageLoaded { .. } => "page_loaded",
        Event::DownloadFinished(_) => "download_finished",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{POPULAR_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
    use crate::domain::Movie;
    use crate::tmdb::{MetadataClient, TmdbConfig};
    use crate::ui::theme::Theme;

    fn fresh_state() -> AppState {
        AppState::new(
            MetadataClient::new(TmdbConfig {
                api_key: "key".to_string(),
                ..TmdbConfig::default()
            }),
            Theme::default(),
        )
    }

    fn page_json(titles: &[&str]) -> Vec<u8> {
        let results: Vec<serde_json::Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                serde_json::json!({
                    "id": i + 1,
                    "title": title,
                    "release_date": "2020-05-01",
                    "poster_path": format!("/{}.jpg", i + 1),
                    "backdrop_path": null,
                    "overview": "",
                    "vote_average": 5.0
                })
            })
            .collect();
        serde_json::json!({
            "page": 1,
            "results": results,
            "total_pages": 1,
            "total_results": titles.len()
        })
        .to_string()
        .into_bytes()
    }

    fn only_fetch(actions: &[Action]) -> (u64, PageKind, String) {
        match actions {
            [Action::FetchPage { ticket, kind, url }] => (*ticket, *kind, url.clone()),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn search(state: &mut AppState, query: &str) -> Vec<Action> {
        handle_event(state, &Event::FocusSearch).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
        handle_event(state, &Event::Submit).unwrap().1
    }

    fn loaded(state: &mut AppState, actions: &[Action], status: u16, body: Vec<u8>) {
        let (ticket, kind, _) = only_fetch(actions);
        handle_event(
            state,
            &Event::PageLoaded {
                ticket,
                kind,
                status,
                body,
            },
        )
        .unwrap();
    }

    #[test]
    fn activation_fetches_popular_page_one() {
        let mut state = fresh_state();
        let (_, actions) = handle_event(&mut state, &Event::Activate).unwrap();
        let (_, kind, url) = only_fetch(&actions);
        assert_eq!(kind, PageKind::Popular);
        assert!(url.contains("/movie/popular?"));
        assert!(url.ends_with("&page=1"));
        assert!(state.is_loading());
    }

    #[test]
    fn activation_is_ignored_once_results_exist() {
        let mut state = fresh_state();
        let actions = handle_event(&mut state, &Event::Activate).unwrap().1;
        loaded(&mut state, &actions, 200, page_json(&["Dune"]));

        let (render, actions) = handle_event(&mut state, &Event::Activate).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn popular_failure_shows_error_and_stops_loading() {
        let mut state = fresh_state();
        let actions = handle_event(&mut state, &Event::Activate).unwrap().1;
        loaded(&mut state, &actions, 500, b"oops".to_vec());

        assert_eq!(state.screen, Screen::Error(POPULAR_FAILED_MESSAGE.to_string()));
        assert!(!state.is_loading());
    }

    #[test]
    fn search_failure_keeps_previous_results() {
        let mut state = fresh_state();
        let actions = handle_event(&mut state, &Event::Activate).unwrap().1;
        loaded(&mut state, &actions, 200, page_json(&["Dune", "Heat"]));

        let actions = search(&mut state, "batman");
        loaded(&mut state, &actions, 503, Vec::new());

        assert_eq!(state.screen, Screen::Error(SEARCH_FAILED_MESSAGE.to_string()));
        assert_eq!(state.results.len(), 2);
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut state = fresh_state();
        let actions = search(&mut state, "   ");
        assert!(actions.is_empty());
        assert_eq!(state.latest_ticket(), 0);
        assert_eq!(state.input_mode, InputMode::Search);
    }

    #[test]
    fn search_results_fill_grid_in_order() {
        let mut state = fresh_state();
        let actions = search(&mut state, "batman");
        let (_, kind, url) = only_fetch(&actions);
        assert_eq!(kind, PageKind::Search);
        assert!(url.contains("query=batman&"));

        loaded(&mut state, &actions, 200, page_json(&["Batman", "Batman Returns"]));
        assert_eq!(state.screen, Screen::Grid);
        let titles: Vec<&str> = state.results.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Batman", "Batman Returns"]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn empty_search_shows_query_empty_state() {
        let mut state = fresh_state();
        let actions = search(&mut state, "zzzznotfound");
        loaded(&mut state, &actions, 200, page_json(&[]));
        assert_eq!(state.screen, Screen::EmptyWithQuery("zzzznotfound".to_string()));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = fresh_state();
        let first = search(&mut state, "alien");
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('s')).unwrap();
        let second = handle_event(&mut state, &Event::Submit).unwrap().1;

        loaded(&mut state, &second, 200, page_json(&["Aliens"]));
        loaded(&mut state, &first, 200, page_json(&["Alien", "Alien 3"]));

        let titles: Vec<&str> = state.results.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Aliens"]);
    }

    #[test]
    fn open_back_and_home() {
        let mut state = fresh_state();
        let actions = search(&mut state, "heat");
        loaded(&mut state, &actions, 200, page_json(&["Heat", "Heatwave"]));

        handle_event(&mut state, &Event::MoveRight).unwrap();
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(state.selected_movie().map(|m| m.title.as_str()), Some("Heatwave"));

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.screen, Screen::Grid);

        let (_, actions) = handle_event(&mut state, &Event::Home).unwrap();
        assert_eq!(only_fetch(&actions).1, PageKind::Popular);
        assert!(state.query.is_empty());
        assert!(state.selected_movie().is_none());
    }

    #[test]
    fn keys_outside_search_mode_do_not_edit_query() {
        let mut state = fresh_state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.query.is_empty());
    }

    #[test]
    fn poster_download_uses_original_size_and_title() {
        let mut state = fresh_state();
        state.screen = Screen::Detail(Movie {
            id: 1,
            title: "Heat".to_string(),
            release_date: "1995-12-15".to_string(),
            poster_path: Some("/heat.jpg".to_string()),
            backdrop_path: Some("/wide.jpg".to_string()),
            overview: String::new(),
            vote_average: 7.9,
        });

        let (_, actions) = handle_event(&mut state, &Event::DownloadPoster).unwrap();
        let [Action::DownloadImage(request)] = actions.as_slice() else {
            panic!("expected a download, got {actions:?}");
        };
        assert_eq!(request.url, "https://image.tmdb.org/t/p/original/heat.jpg");
        assert_eq!(request.file_name, "Heat_Poster.jpg");

        let (_, actions) = handle_event(&mut state, &Event::DownloadBackdrop).unwrap();
        let [Action::DownloadImage(request)] = actions.as_slice() else {
            panic!("expected a download, got {actions:?}");
        };
        assert_eq!(request.file_name, "Heat_Backdrop.jpg");
    }

    #[test]
    fn missing_poster_download_is_inert() {
        let mut state = fresh_state();
        state.screen = Screen::Detail(Movie {
            id: 2,
            title: "Lost".to_string(),
            release_date: String::new(),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            vote_average: 0.0,
        });

        let (render, actions) = handle_event(&mut state, &Event::DownloadPoster).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn download_outside_detail_is_inert() {
        let mut state = fresh_state();
        state.screen = Screen::Grid;
        assert!(handle_event(&mut state, &Event::DownloadBackdrop).unwrap().1.is_empty());
    }

    #[test]
    fn permissions_denied_shows_banner() {
        let mut state = fresh_state();
        let (render, actions) = handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(matches!(&state.screen, Screen::Error(message) if message.contains("Web access")));
        assert!(!state.is_loading());
    }

    #[test]
    fn backspace_edits_only_in_search_mode() {
        let mut state = fresh_state();
        state.query = "heat".to_string();

        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
        assert_eq!(state.query, "heat");

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(render);
        assert_eq!(state.query, "hea");
    }

    #[test]
    fn exit_search_keeps_query() {
        let mut state = fresh_state();
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('u')).unwrap();
        handle_event(&mut state, &Event::Char('p')).unwrap();

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.query, "up");
    }

    #[test]
    fn typing_on_empty_popular_page_names_the_query() {
        let mut state = fresh_state();
        let actions = handle_event(&mut state, &Event::Activate).unwrap().1;
        loaded(&mut state, &actions, 200, page_json(&[]));
        assert_eq!(state.screen, Screen::EmptyNoQuery);

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        assert_eq!(state.screen, Screen::EmptyWithQuery("x".to_string()));
    }

    #[test]
    fn clearing_query_on_empty_search_returns_to_prompt() {
        let mut state = fresh_state();
        let actions = search(&mut state, "zzz");
        loaded(&mut state, &actions, 200, page_json(&[]));
        assert_eq!(state.screen, Screen::EmptyWithQuery("zzz".to_string()));

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        for _ in 0..3 {
            handle_event(&mut state, &Event::Backspace).unwrap();
        }
        assert_eq!(state.screen, Screen::EmptyNoQuery);
    }
}
