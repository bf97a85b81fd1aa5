//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox,
//! so every user-supplied path goes through [`paths`] before it is opened.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_host_path, strip_host_prefix};
