//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Header, search box, grid, detail, footer
//! - [`helpers`]: Character-safe truncation, wrapping and highlighting
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    AssetInfo, DetailInfo, EmptyState, FooterInfo, GridCard, GridInfo, HeaderInfo, SearchBarInfo,
    UIViewModel, ViewBody,
};
