//! Shared rendering utilities and helpers.
//!
//! Everything here works on character indices, never byte offsets, so
//! titles with accents or CJK characters are cut and highlighted safely.
//!
//! # Example
//!
//! ```rust
//! use movie_gallery::ui::helpers::{truncate_chars, wrap_text};
//!
//! assert_eq!(truncate_chars("Amélie", 10), "Amélie");
//! assert_eq!(truncate_chars("Once Upon a Time in Hollywood", 12), "Once Upon...");
//! assert_eq!(wrap_text("a bb ccc", 4), vec!["a bb", "ccc"]);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Greedy word wrap to `width` columns. Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width && line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line_len += word.len();
        line.extend(word);
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Styles `text` with `ranges` highlighted in the theme's match colors.
///
/// Ranges are `(start, end)` character indices, end exclusive. Ranges past
/// the end of `text` are clipped, which covers titles truncated after the
/// ranges were computed. Selected cards are returned unhighlighted so the
/// selection colors stay intact.
#[must_use]
pub fn highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start == end {
            continue;
        }

        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        pos = end;
    }

    out.extend(&chars[pos..]);
    out
}

/// Left pads `text` so it sits centered in `width` columns.
#[must_use]
pub fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("Léon: The Professional", 8), "Léon:...");
        assert_eq!(truncate_chars("千と千尋の神隠し", 5), "千と...");
        assert_eq!(truncate_chars("Heat", 2), "He");
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap_text("A thief who steals corporate secrets", 12);
        assert_eq!(lines, vec!["A thief who", "steals", "corporate", "secrets"]);
    }

    #[test]
    fn wrap_splits_long_words_and_handles_empty() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn highlight_wraps_ranges_in_escapes() {
        let theme = Theme::default();
        let out = highlighted_text("Heat", &[(0, 2)], &theme, false);
        assert!(out.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(out.ends_with(&format!("He{}at", Theme::reset())));
    }

    #[test]
    fn highlight_clips_ranges_past_truncation() {
        let theme = Theme::default();
        let out = highlighted_text("Hea", &[(1, 10)], &theme, false);
        assert!(out.starts_with('H'));
        assert!(out.ends_with(&format!("ea{}", Theme::reset())));
    }

    #[test]
    fn selected_text_is_plain() {
        let theme = Theme::default();
        assert_eq!(highlighted_text("Heat", &[(0, 2)], &theme, true), "Heat");
    }

    #[test]
    fn centering_pads_left() {
        assert_eq!(centered("ab", 6), "  ab");
        assert_eq!(centered("toolong", 3), "toolong");
    }
}
