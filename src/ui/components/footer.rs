//! Footer component renderer.
//!
//! Two centered lines: keybinding hints, then the attribution or the last
//! saved download.

use crate::ui::helpers::{centered, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer starting at `row` and returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    render_centered_line(row, &footer.keybindings, &theme.colors.text_dim, cols);
    print!("{}", Theme::dim());
    render_centered_line(row + 1, &footer.notice, &theme.colors.text_dim, cols);
    row + 2
}

fn render_centered_line(row: usize, text: &str, color: &str, cols: usize) {
    let line = centered(&truncate_chars(text, cols), cols);
    let line_len = line.chars().count();

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
}
