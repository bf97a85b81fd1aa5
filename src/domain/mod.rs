//! Domain layer for the movie gallery.
//!
//! Plain data types with no dependency on Zellij or the network:
//!
//! - [`error`]: Error type and result alias
//! - [`movie`]: Movie records and result pages

pub mod error;
pub mod movie;

pub use error::{GalleryError, Result};
pub use movie::{Movie, ResultPage};
