//! Remote metadata client for The Movie Database (TMDB).
//!
//! Two read-only endpoints (title search, popular titles) and a pure image URL
//! builder. Requests themselves are issued by the plugin runtime; see
//! [`client::MetadataClient`] for the request/response split.

pub mod client;
pub mod image;

pub use client::{MetadataClient, PageFetch, PageKind, TmdbConfig, DEFAULT_BASE_URL};
pub use image::{build_image_url, build_image_url_with_base, ImageSize, DEFAULT_IMAGE_BASE_URL};
