//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the `movie_gallery` library and Zellij: it maps
//! host events to library [`Event`]s and carries out the returned
//! [`Action`]s with Zellij's host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess`, `RunCommands`, `FullHdAccess`
//! 3. **Activate**: Once granted, fetch the popular titles
//! 4. **Update**: Keys and `WebRequestResult`s go through `handle_event`
//! 5. **Render**: Record the pane size, draw the view model
//!
//! # Request Routing
//!
//! Every `web_request` carries a context map echoed back with its result:
//!
//! - `kind=search|popular` plus `ticket`: a result page, becomes `Event::PageLoaded`
//! - `kind=image` plus `url` and `file_name`: finished by the download helper,
//!   which may run `open_command <url>` as its fallback
//!
//! # Keybindings
//!
//! In normal mode:
//! - `h`/`j`/`k`/`l` or arrows: Move through the grid
//! - `Enter`: Open the selected movie
//! - `Esc`/`Backspace`: Back to the grid
//! - `p`/`b`: Download poster / backdrop (detail view)
//! - `/`: Focus the search bar
//! - `r`/`Home`: Popular titles
//! - `q`: Hide the plugin
//!
//! In search mode:
//! - Characters edit the query
//! - `Enter`: Search
//! - `Esc`: Leave the search bar

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

// The plugin shim links against Zellij's host imports, so it only exists in
// the wasm build.
#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("movie-gallery is a Zellij plugin; build it for wasm32-wasip1 and load the .wasm");
}

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use movie_gallery::download::DownloadHelper;
    use movie_gallery::{
        handle_event, initialize, Action, AppState, Config, Event, ImageRequest, InputMode,
        PageContext,
    };

    /// Plugin state wrapper.
    pub struct State {
        app: AppState,
        downloads: DownloadHelper,
        open_command: String,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: initialize(&config),
                downloads: DownloadHelper::new(config.download_dir()),
                open_command: config.open_command,
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            movie_gallery::observability::init_tracing(&config);

            let _span = tracing::debug_span!("plugin_load").entered();

            self.app = initialize(&config);
            self.downloads = DownloadHelper::new(config.download_dir());
            self.open_command.clone_from(&config.open_command);
            tracing::debug!(
                download_dir = %self.downloads.dir().display(),
                open_command = %self.open_command,
                "parsed configuration"
            );

            request_permission(&[
                PermissionType::WebAccess,
                PermissionType::RunCommands,
                PermissionType::FullHdAccess,
            ]);
            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::RunCommandResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::event_name(&event);
            let _span = tracing::debug_span!("plugin_update", event_type = event_name).entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match self.map_web_result(status, body, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                    Self::log_command_result(exit_code, &stderr, &context);
                    return false;
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted");
                        Event::Activate
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied");
                        Event::PermissionsDenied
                    }
                },
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    for action in &actions {
                        self.execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.app.set_viewport(rows, cols);
            movie_gallery::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        const fn event_name(event: &zellij_tile::prelude::Event) -> &'static str {
            match event {
                zellij_tile::prelude::Event::Key(_) => "Key",
                zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult",
                zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult",
                zellij_tile::prelude::Event::PermissionRequestResult(_) => "PermissionRequestResult",
                _ => "Other",
            }
        }

        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::trace!(bare_key = ?key.bare_key, "key event");

            if self.app.input_mode == InputMode::Search {
                return match key.bare_key {
                    BareKey::Enter => Some(Event::Submit),
                    BareKey::Esc => Some(Event::ExitSearch),
                    BareKey::Backspace => Some(Event::Backspace),
                    BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Some(Event::Char(c)),
                    _ => None,
                };
            }

            Some(match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
                BareKey::Right | BareKey::Char('l') => Event::MoveRight,
                BareKey::Up | BareKey::Char('k') => Event::MoveUp,
                BareKey::Down | BareKey::Char('j') => Event::MoveDown,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Esc | BareKey::Backspace => Event::Back,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('p') => Event::DownloadPoster,
                BareKey::Char('b') => Event::DownloadBackdrop,
                BareKey::Char('r') | BareKey::Home => Event::Home,
                BareKey::Char('q') => Event::Close,
                _ => return None,
            })
        }

        /// Routes a finished web request by its context.
        fn map_web_result(
            &self,
            status: u16,
            body: Vec<u8>,
            context: &BTreeMap<String, String>,
        ) -> Option<Event> {
            if let Some(page) = PageContext::from_context(context) {
                tracing::debug!(ticket = page.ticket, status, bytes = body.len(), "page response");
                return Some(Event::PageLoaded {
                    ticket: page.ticket,
                    kind: page.kind,
                    status,
                    body,
                });
            }

            if let Some(request) = ImageRequest::from_context(context) {
                let open_command = self.open_command.as_str();
                let mut opener = |url: &str| {
                    tracing::debug!(command = open_command, url, "opening image url");
                    run_command(
                        &[open_command, url],
                        BTreeMap::from([("kind".to_string(), "open".to_string())]),
                    );
                };
                let outcome = self.downloads.complete(&request, status, &body, &mut opener);
                return Some(Event::DownloadFinished(outcome));
            }

            tracing::debug!(?context, "web result with unknown context");
            None
        }

        fn log_command_result(exit_code: Option<i32>, stderr: &[u8], context: &BTreeMap<String, String>) {
            if exit_code == Some(0) {
                tracing::debug!(?context, "command finished");
            } else {
                tracing::warn!(
                    ?exit_code,
                    stderr = %String::from_utf8_lossy(stderr),
                    ?context,
                    "command failed"
                );
            }
        }

        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&self, action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::FetchPage { ticket, kind, url } => {
                    let context = PageContext { ticket: *ticket, kind: *kind }.to_context();
                    web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context);
                }
                Action::DownloadImage(request) => {
                    web_request(
                        &request.url,
                        HttpVerb::Get,
                        BTreeMap::new(),
                        Vec::new(),
                        request.to_context(),
                    );
                }
            }
        }
    }
}
