//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Brand title
//! - [`search`]: Search input box
//! - [`grid`]: Result cards
//! - [`detail`]: One movie with its download actions
//! - [`empty`]: Empty state message
//! - [`banner`]: Loading and error messages
//! - [`footer`]: Keybinding hints and attribution
//!
//! Every screen shares one frame; only the body between the search box and
//! the footer changes:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Body]
//! [Border]
//! [Footer - 2 lines]
//! ```

mod banner;
mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewBody};

use banner::{render_error, render_loading};
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full frame for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    match &vm.body {
        ViewBody::Loading { message } => {
            render_loading(current_row, message, theme, cols);
        }
        ViewBody::Error { message } => {
            render_error(current_row, message, theme, cols);
        }
        ViewBody::Grid(grid) => {
            render_grid(current_row, grid, theme);
        }
        ViewBody::Detail(detail) => {
            render_detail(current_row, detail, theme, cols, border_row);
        }
        ViewBody::Empty(empty) => {
            render_empty_state(current_row, empty, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
