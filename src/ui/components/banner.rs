//! Loading and error banners.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;

/// Renders the loading message centered two rows below `row`.
pub fn render_loading(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", centered(&format!("⠋ {message}"), cols));
    print!("{}", Theme::reset());
    row + 3
}

/// Renders the error banner. Only the message is shown; the cause is in the
/// trace file.
pub fn render_error(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 2, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", centered(&format!("! {message}"), cols));
    print!("{}", Theme::reset());
    row + 3
}
