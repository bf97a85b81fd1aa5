//! Detail view component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AssetInfo, DetailInfo};

/// Renders the detail view starting at `row`, leaving `bottom` free for the
/// footer. Returns the next row.
///
/// ```text
///   Heat  [1995]
///
///   Obsessive master thief Neil McCauley leads a ...
///
///   Poster (w500)      https://image.tmdb.org/t/p/w500/...
///   [p] Download High-Res Poster
///   Backdrop (w1920)   Not available
///   [b] Download Ultra-Wide Backdrop
/// ```
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize, bottom: usize) -> usize {
    let mut current_row = row + 1;

    position_cursor(current_row, 3);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", truncate_chars(&detail.title, cols.saturating_sub(12)));
    print!("{}", Theme::reset());
    print!("  {}[{}]{}", Theme::fg(&theme.colors.badge_fg), detail.year, Theme::reset());
    current_row += 2;

    // Assets take 4 rows plus a blank line; the overview gets what is left.
    let overview_rows = bottom.saturating_sub(current_row + 5);
    for line in detail.overview.iter().take(overview_rows) {
        position_cursor(current_row, 3);
        print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
        current_row += 1;
    }
    current_row += 1;

    current_row = render_asset(current_row, &detail.poster, theme, cols);
    render_asset(current_row, &detail.backdrop, theme, cols)
}

fn render_asset(row: usize, asset: &AssetInfo, theme: &Theme, cols: usize) -> usize {
    let preview = if asset.preview_url.is_empty() {
        "Not available"
    } else {
        asset.preview_url.as_str()
    };

    position_cursor(row, 3);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{:<19}", asset.label);
    print!("{}", truncate_chars(preview, cols.saturating_sub(24)));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 3);
    if asset.enabled {
        print!("{}[{}]{} ", Theme::fg(&theme.colors.action_fg), asset.key, Theme::reset());
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), asset.action, Theme::reset());
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("[{}] {}", asset.key, asset.action);
        print!("{}", Theme::reset());
    }
    row + 2
}
