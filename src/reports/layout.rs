//! Column alignment helpers for terminal output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Apply ANSI color formatting if colored output is enabled.
pub(super) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub(super) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Cells laid out in aligned columns separated by two spaces.
pub(super) struct Grid {
    widths: Vec<usize>,
    max_width: usize,
}

impl Grid {
    /// Size columns to fit `header` and every row, capped at `max_width`.
    pub(super) fn fit(header: &[String], rows: &[Vec<String>], max_width: usize) -> Self {
        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for row in rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(idx) {
                    *w = (*w).max(cell.width());
                }
            }
        }
        for w in &mut widths {
            *w = (*w).min(max_width);
        }
        Self { widths, max_width }
    }

    pub(super) fn line(&self, cells: &[String]) -> String {
        let joined = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, &w)| pad(&truncate(cell, self.max_width), w))
            .collect::<Vec<_>>()
            .join("  ");
        joined.trim_end().to_string()
    }

    pub(super) fn total_width(&self) -> usize {
        self.widths.iter().sum::<usize>() + 2 * self.widths.len().saturating_sub(1)
    }

    pub(super) fn separator(&self) -> String {
        "─".repeat(self.total_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Goldman Sachs", 20), "Goldman Sachs");
        assert_eq!(truncate("Goldman Sachs", 8), "Goldman…");
        assert_eq!(truncate("株式会社", 5), "株式…");
    }

    #[test]
    fn test_grid_alignment() {
        let header = vec!["Id".to_string(), "Issuer".to_string()];
        let rows = vec![
            vec!["1".to_string(), "JP Morgan".to_string()],
            vec!["20".to_string(), "UBS".to_string()],
        ];
        let grid = Grid::fit(&header, &rows, 40);
        assert_eq!(grid.line(&header), "Id  Issuer");
        assert_eq!(grid.line(&rows[1]), "20  UBS");
        assert_eq!(grid.total_width(), 2 + 2 + 9);
        assert_eq!(grid.separator().chars().count(), 13);
    }

    #[test]
    fn test_ansi_color_disabled() {
        assert_eq!(ansi_color("x", "bold", false), "x");
        assert_eq!(ansi_color("x", "bold", true), "\x1b[1mx\x1b[0m");
    }
}
