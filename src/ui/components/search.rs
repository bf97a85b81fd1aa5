//! Search bar component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box at `row` and returns the next row.
///
/// ```text
/// [margin] ┌──────────────────────────┐ [margin]
/// [margin] │ / Search movie title...  │ [margin]
/// [margin] └──────────────────────────┘ [margin]
/// ```
///
/// The frame takes the accent color while focused. An empty query shows the
/// placeholder dimmed; a focused query ends in a block cursor.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let (text, color) = if search.query.is_empty() && !search.focused {
        (format!(" / {}", search.placeholder), &theme.colors.text_dim)
    } else if search.focused {
        (format!(" / {}█", search.query), &theme.colors.text_normal)
    } else {
        (format!(" / {}", search.query), &theme.colors.text_normal)
    };
    let text = truncate_chars(&text, inner_width);
    let padding = inner_width.saturating_sub(text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
