//! TMDB metadata client.
//!
//! The plugin runtime owns the network: the client only builds request URLs
//! and reads the responses that come back as Zellij `WebRequestResult` events.
//! This keeps the client free of host calls and trivially replaceable in tests.

use super::image::{build_image_url_with_base, ImageSize, DEFAULT_IMAGE_BASE_URL};
use crate::domain::{GalleryError, Result, ResultPage};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Default TMDB REST base.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Locale sent with every metadata request.
const LANGUAGE: &str = "en-US";

/// Characters escaped in query values. Matches `encodeURIComponent`: every
/// byte except ASCII alphanumerics and `-_.!~*'()`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Connection settings for the TMDB API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    pub api_key: String,
    /// REST base without trailing slash.
    pub base_url: String,
    /// CDN base without trailing slash.
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

/// Which metadata endpoint a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Search,
    Popular,
}

impl PageKind {
    /// Stable name used in request contexts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Popular => "popular",
        }
    }

    /// Inverse of [`PageKind::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "search" => Some(Self::Search),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }

    /// Detail carried by the fetch failure for this endpoint.
    #[must_use]
    pub const fn failure_detail(self) -> &'static str {
        match self {
            Self::Search => "search failed",
            Self::Popular => "popular failed",
        }
    }
}

/// Outcome of asking the client for a search page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageFetch {
    /// Answered locally, no request needed.
    Ready(ResultPage),
    /// Exactly one GET must be issued to this URL.
    Request(String),
}

/// Client for the two read-only TMDB endpoints plus the image URL builder.
#[derive(Debug, Clone, Default)]
pub struct MetadataClient {
    config: TmdbConfig,
}

impl MetadataClient {
    #[must_use]
    pub const fn new(config: TmdbConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Prepares a title search.
    ///
    /// A blank or whitespace-only query is answered with an empty page and no
    /// request. Anything else yields a single search URL with the query
    /// percent-encoded as given.
    ///
    /// ```
    /// use movie_gallery::tmdb::{MetadataClient, PageFetch, TmdbConfig};
    ///
    /// let client = MetadataClient::new(TmdbConfig {
    ///     api_key: "k".to_string(),
    ///     ..TmdbConfig::default()
    /// });
    /// assert_eq!(
    ///     client.search_by_title("the thing"),
    ///     PageFetch::Request(
    ///         "https://api.themoviedb.org/3/search/movie?api_key=k&query=the%20thing&language=en-US"
    ///             .to_string()
    ///     )
    /// );
    /// assert!(matches!(client.search_by_title("   "), PageFetch::Ready(_)));
    /// ```
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> PageFetch {
        if query.trim().is_empty() {
            tracing::debug!("blank query, skipping search request");
            return PageFetch::Ready(ResultPage::empty());
        }

        let url = format!(
            "{}/search/movie?api_key={}&query={}&language={LANGUAGE}",
            self.config.base_url,
            encode(&self.config.api_key),
            encode(query),
        );
        tracing::debug!(query_len = query.len(), "prepared search request");
        PageFetch::Request(url)
    }

    /// URL for one page of popular titles.
    #[must_use]
    pub fn get_popular(&self, page: u32) -> String {
        format!(
            "{}/movie/popular?api_key={}&language={LANGUAGE}&page={page}",
            self.config.base_url,
            encode(&self.config.api_key),
        )
    }

    /// URL for the first page of popular titles.
    #[must_use]
    pub fn get_popular_default(&self) -> String {
        self.get_popular(1)
    }

    /// Reads a metadata response into a result page.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Fetch`] with the endpoint's failure detail when
    /// the status is not 2xx or the body is not a result page.
    pub fn read_page(&self, kind: PageKind, status: u16, body: &[u8]) -> Result<ResultPage> {
        if !(200..300).contains(&status) {
            tracing::debug!(endpoint = kind.as_str(), status, "metadata request failed");
            return Err(GalleryError::Fetch(kind.failure_detail()));
        }

        serde_json::from_slice::<ResultPage>(body).map_err(|e| {
            tracing::debug!(endpoint = kind.as_str(), error = %e, "unreadable result page");
            GalleryError::Fetch(kind.failure_detail())
        })
    }

    /// Image URL against the configured CDN base.
    #[must_use]
    pub fn build_image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        build_image_url_with_base(&self.config.image_base_url, path, size)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MetadataClient {
        MetadataClient::new(TmdbConfig {
            api_key: "abc123".to_string(),
            base_url: "http://tmdb.test/3".to_string(),
            image_base_url: "http://img.test/t/p".to_string(),
        })
    }

    fn search_url(query: &str) -> String {
        match client().search_by_title(query) {
            PageFetch::Request(url) => url,
            PageFetch::Ready(_) => panic!("expected a request for {query:?}"),
        }
    }

    #[test]
    fn search_encodes_like_encode_uri_component() {
        let cases = [
            ("batman", "batman"),
            ("star wars", "star%20wars"),
            ("Amélie", "Am%C3%A9lie"),
            ("rock & roll", "rock%20%26%20roll"),
            ("a+b=c?d/e#f", "a%2Bb%3Dc%3Fd%2Fe%23f"),
            ("it's (not) *that* ~odd~ -_.!", "it's%20(not)%20*that*%20~odd~%20-_.!"),
            ("千と千尋", "%E5%8D%83%E3%81%A8%E5%8D%83%E5%B0%8B"),
        ];

        for (query, encoded) in cases {
            assert_eq!(
                search_url(query),
                format!("http://tmdb.test/3/search/movie?api_key=abc123&query={encoded}&language=en-US")
            );
        }
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        assert!(search_url(" heat ").contains("query=%20heat%20&"));
    }

    #[test]
    fn blank_queries_never_request() {
        for query in ["", " ", "\t\n  "] {
            assert_eq!(client().search_by_title(query), PageFetch::Ready(ResultPage::empty()));
        }
    }

    #[test]
    fn popular_url_carries_page() {
        assert_eq!(
            client().get_popular(3),
            "http://tmdb.test/3/movie/popular?api_key=abc123&language=en-US&page=3"
        );
        assert!(client().get_popular_default().ends_with("&page=1"));
    }

    #[test]
    fn read_page_fails_on_non_success_status() {
        let err = client().read_page(PageKind::Search, 500, b"{}").unwrap_err();
        assert!(matches!(err, GalleryError::Fetch("search failed")));

        let err = client().read_page(PageKind::Popular, 401, b"").unwrap_err();
        assert!(matches!(err, GalleryError::Fetch("popular failed")));
    }

    #[test]
    fn read_page_fails_on_garbage_body() {
        let err = client().read_page(PageKind::Popular, 200, b"<html>").unwrap_err();
        assert!(matches!(err, GalleryError::Fetch("popular failed")));
    }

    #[test]
    fn read_page_preserves_order() {
        let body = br#"{"page":1,"results":[{"id":2,"title":"B"},{"id":1,"title":"A"}],"total_pages":1,"total_results":2}"#;
        let page = client().read_page(PageKind::Search, 200, body).unwrap();
        let ids: Vec<u64> = page.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn image_urls_use_configured_cdn() {
        assert_eq!(
            client().build_image_url(Some("/p.jpg"), ImageSize::W500),
            "http://img.test/t/p/w500/p.jpg"
        );
    }

    #[test]
    fn page_kind_names_round_trip() {
        for kind in [PageKind::Search, PageKind::Popular] {
            assert_eq!(PageKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PageKind::parse("image"), None);
    }
}
