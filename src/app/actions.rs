//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches the network, the filesystem or Zellij. It
//! returns a `Vec<Action>` and the runtime in `main.rs` carries them out:
//! web requests for pages and images, and hiding the plugin pane.

use crate::download::ImageRequest;
use crate::tmdb::PageKind;
use std::collections::BTreeMap;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one GET for a result page.
    ///
    /// The response must come back as `Event::PageLoaded` carrying the same
    /// ticket; responses for older tickets are dropped.
    FetchPage {
        ticket: u64,
        kind: PageKind,
        url: String,
    },

    /// Fetches an image and hands the response to the download helper.
    DownloadImage(ImageRequest),
}

/// Context attached to a page request and echoed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub ticket: u64,
    pub kind: PageKind,
}

impl PageContext {
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("kind".to_string(), self.kind.as_str().to_string()),
            ("ticket".to_string(), self.ticket.to_string()),
        ])
    }

    /// Parses a response context; `None` if it is not a page response.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = PageKind::parse(context.get("kind")?)?;
        let ticket = context.get("ticket")?.parse().ok()?;
        Some(Self { ticket, kind })
    }
}
