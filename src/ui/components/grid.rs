//! Result grid component renderer.
//!
//! Cards are laid out row-major, `columns` per row. Each card takes
//! `CARD_HEIGHT` lines: the title, the year badge and a spacer.

use crate::app::state::{CARD_HEIGHT, CARD_WIDTH};
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GridCard, GridInfo};

/// Renders the visible cards starting at `row` and returns the next row.
pub fn render_grid(row: usize, grid: &GridInfo, theme: &Theme) -> usize {
    let columns = grid.columns.max(1);
    let mut current_row = row;

    for line in grid.cards.chunks(columns) {
        for (col, card) in line.iter().enumerate() {
            render_card(current_row, 2 + col * CARD_WIDTH, card, theme);
        }
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card(row: usize, col: usize, card: &GridCard, theme: &Theme) {
    let inner = CARD_WIDTH - 2;
    let title_len = card.title.chars().count();

    position_cursor(row, col);
    if card.is_selected {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!(
        "{}",
        helpers::highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected)
    );
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{}", " ".repeat(inner.saturating_sub(title_len)));
    print!("{}", Theme::reset());

    position_cursor(row + 1, col);
    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("[{}]", card.year);
    print!("{}", Theme::reset());
}
