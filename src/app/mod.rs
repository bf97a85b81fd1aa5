//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the pure
//! building blocks: the TMDB client, the download helper and the UI view
//! model. Data flows one way:
//!
//! ```text
//! Keys / host results → Event → handle_event → AppState → Vec<Action>
//!        ↑                                                     ↓
//!        └─────── web_request / run_command completions ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: The reducer over [`Event`]s
//! - [`modes`]: Input mode and [`Screen`] types
//! - [`state`]: Application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use movie_gallery::app::{handle_event, AppState, Event, Screen};
//! use movie_gallery::tmdb::MetadataClient;
//! use movie_gallery::ui::theme::Theme;
//!
//! let mut state = AppState::new(MetadataClient::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Activate)?;
//! assert_eq!(actions.len(), 1);
//! assert_eq!(state.screen, Screen::Loading);
//! # Ok::<(), movie_gallery::GalleryError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, PageContext};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Screen};
pub use state::{AppState, POPULAR_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
