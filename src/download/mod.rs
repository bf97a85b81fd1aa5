//! Download helper for posters and backdrops.
//!
//! A download is split around the host's network call:
//!
//! 1. [`DownloadHelper::begin`] describes the GET to issue.
//! 2. The plugin runtime performs it through Zellij's `web_request`.
//! 3. [`DownloadHelper::complete`] saves the bytes under the requested file
//!    name, or falls back to opening the URL with a [`UrlOpener`].
//!
//! `complete` never fails from the caller's point of view. The returned
//! [`DownloadOutcome`] tells whether the file was saved or the fallback ran.

mod partial;

use crate::domain::{GalleryError, Result};
use partial::PartialFile;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Opens a URL outside the plugin (a browser tab, an image viewer).
pub trait UrlOpener {
    fn open_url(&mut self, url: &str);
}

impl<F: FnMut(&str)> UrlOpener for F {
    fn open_url(&mut self, url: &str) {
        self(url);
    }
}

/// A pending image download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub url: String,
    pub file_name: String,
}

impl ImageRequest {
    /// Request context attached to the web request so the response can be
    /// matched back to this download.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("kind".to_string(), "image".to_string()),
            ("url".to_string(), self.url.clone()),
            ("file_name".to_string(), self.file_name.clone()),
        ])
    }

    /// Rebuilds a request from a response context, if it belongs to a download.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get("kind").map(String::as_str) != Some("image") {
            return None;
        }
        Some(Self {
            url: context.get("url")?.clone(),
            file_name: context.get("file_name")?.clone(),
        })
    }
}

/// Which path a download took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Bytes written to `path` under the requested name.
    Saved { path: PathBuf },
    /// Fetch or save failed; `url` was handed to the opener instead.
    FellBack { url: String },
}

/// Saves downloaded images into a fixed directory.
#[derive(Debug, Clone)]
pub struct DownloadHelper {
    dir: PathBuf,
}

impl DownloadHelper {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Describes the fetch for `url`, to be saved as `file_name`.
    #[must_use]
    pub fn begin(url: &str, file_name: &str) -> ImageRequest {
        tracing::debug!(url = %url, file_name = %file_name, "download requested");
        ImageRequest {
            url: url.to_string(),
            file_name: file_name.to_string(),
        }
    }

    /// Finishes a download with the host's response.
    ///
    /// On a 2xx response with a body the image is written to
    /// `<dir>/<file_name>`. Any failure is logged and the original URL goes to
    /// `opener` exactly once.
    pub fn complete<O: UrlOpener + ?Sized>(
        &self,
        request: &ImageRequest,
        status: u16,
        body: &[u8],
        opener: &mut O,
    ) -> DownloadOutcome {
        let _span = tracing::debug_span!("download_complete", url = %request.url, status).entered();

        match self.save(request, status, body) {
            Ok(path) => {
                tracing::info!(path = %path.display(), bytes = body.len(), "image saved");
                DownloadOutcome::Saved { path }
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %request.url, "download failed, opening url instead");
                opener.open_url(&request.url);
                DownloadOutcome::FellBack {
                    url: request.url.clone(),
                }
            }
        }
    }

    fn save(&self, request: &ImageRequest, status: u16, body: &[u8]) -> Result<PathBuf> {
        if !(200..300).contains(&status) {
            return Err(GalleryError::Download(format!("image request returned status {status}")));
        }
        if body.is_empty() {
            return Err(GalleryError::Download("image response had no body".to_string()));
        }

        fs::create_dir_all(&self.dir)?;

        let file_name = sanitize_file_name(&request.file_name);
        let destination = self.dir.join(&file_name);

        let mut partial = PartialFile::create(&self.dir, &file_name)?;
        tracing::trace!(partial = %partial.path().display(), "writing partial download");
        partial.write_all(body)?;
        partial.commit(&destination)?;

        Ok(destination)
    }
}

/// Replaces characters that cannot appear in a single path component.
///
/// ```
/// use movie_gallery::download::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Face/Off_Poster.jpg"), "Face_Off_Poster.jpg");
/// assert_eq!(sanitize_file_name("Heat_Poster.jpg"), "Heat_Poster.jpg");
/// ```
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "download.jpg".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
    }

    impl UrlOpener for RecordingOpener {
        fn open_url(&mut self, url: &str) {
            self.opened.push(url.to_string());
        }
    }

    const URL: &str = "https://image.tmdb.org/t/p/original/poster.jpg";

    #[test]
    fn successful_fetch_saves_under_requested_name() {
        let dir = tempfile::tempdir().unwrap();
        let helper = DownloadHelper::new(dir.path());
        let mut opener = RecordingOpener::default();

        let request = DownloadHelper::begin(URL, "Heat_Poster.jpg");
        let outcome = helper.complete(&request, 200, b"\xff\xd8jpeg", &mut opener);

        let expected = dir.path().join("Heat_Poster.jpg");
        assert_eq!(outcome, DownloadOutcome::Saved { path: expected.clone() });
        assert_eq!(fs::read(expected).unwrap(), b"\xff\xd8jpeg");
        assert!(opener.opened.is_empty());
    }

    #[test]
    fn rejected_fetch_opens_original_url_once() {
        let dir = tempfile::tempdir().unwrap();
        let helper = DownloadHelper::new(dir.path());
        let mut opener = RecordingOpener::default();

        let request = DownloadHelper::begin(URL, "Heat_Poster.jpg");
        let outcome = helper.complete(&request, 400, b"connection refused", &mut opener);

        assert_eq!(outcome, DownloadOutcome::FellBack { url: URL.to_string() });
        assert_eq!(opener.opened, vec![URL.to_string()]);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_body_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let helper = DownloadHelper::new(dir.path());
        let mut opened = Vec::new();
        let mut opener = |url: &str| opened.push(url.to_string());

        let request = DownloadHelper::begin(URL, "Heat_Backdrop.jpg");
        let outcome = helper.complete(&request, 200, b"", &mut opener);

        assert!(matches!(outcome, DownloadOutcome::FellBack { .. }));
        assert_eq!(opened.len(), 1);
    }

    #[test]
    fn unwritable_directory_falls_back_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file in the way").unwrap();

        let helper = DownloadHelper::new(&blocker);
        let mut opener = RecordingOpener::default();
        let request = DownloadHelper::begin(URL, "Heat_Poster.jpg");
        let outcome = helper.complete(&request, 200, b"bytes", &mut opener);

        assert_eq!(outcome, DownloadOutcome::FellBack { url: URL.to_string() });
        assert_eq!(opener.opened.len(), 1);
    }

    #[test]
    fn slash_in_title_stays_inside_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let helper = DownloadHelper::new(dir.path());
        let mut opener = RecordingOpener::default();

        let request = DownloadHelper::begin(URL, "Face/Off_Poster.jpg");
        let outcome = helper.complete(&request, 200, b"img", &mut opener);

        assert_eq!(
            outcome,
            DownloadOutcome::Saved { path: dir.path().join("Face_Off_Poster.jpg") }
        );
    }

    #[test]
    fn context_round_trip() {
        let request = DownloadHelper::begin(URL, "Heat_Poster.jpg");
        assert_eq!(ImageRequest::from_context(&request.to_context()), Some(request));

        let page_context = BTreeMap::from([("kind".to_string(), "search".to_string())]);
        assert_eq!(ImageRequest::from_context(&page_context), None);
    }

    #[test]
    fn degenerate_names_get_a_default() {
        assert_eq!(sanitize_file_name(".."), "download.jpg");
        assert_eq!(sanitize_file_name(""), "download.jpg");
    }
}
