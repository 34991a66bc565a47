//! Keypad map renderer.
//!
//! Draws the physical 4x6 keypad with box-drawing characters, placing each
//! logical button where [`BUTTON_NUMBERS`] says it sits.
//!
//! ```text
//! ┌──────────┬──────────┬ ...
//! │19 S      │20 T    HA│
//! │Kitchen   │          │
//! ├──────────┼──────────┼ ...
//! ```

use crate::models::keypad::{self, BUTTON_NUMBERS, GRID_COLS};
use crate::models::ButtonEntry;
use std::fmt::Write;

/// Content width of one cell.
const CELL_WIDTH: usize = 10;

/// Renders the keypad map for a batch.
///
/// Buttons without an entry show only their number and key. Bound buttons
/// carry an `HA` marker; hidden (unexposed) buttons a trailing `*`.
#[must_use]
pub fn render_keypad_map(entries: &[ButtonEntry]) -> String {
    let rows = BUTTON_NUMBERS.len() / GRID_COLS;
    let mut output = String::new();

    output.push_str(&border('┌', '┬', '┐'));
    for row in 0..rows {
        let cells: Vec<[String; 2]> = (0..GRID_COLS)
            .filter_map(|col| keypad::button_at(row, col))
            .map(|num| cell(num, entries.iter().find(|e| e.component.num == num)))
            .collect();

        for line in 0..2 {
            output.push('│');
            for cell in &cells {
                let _ = write!(output, "{:<width$}│", cell[line], width = CELL_WIDTH);
            }
            output.push('\n');
        }

        if row + 1 < rows {
            output.push_str(&border('├', '┼', '┤'));
        }
    }
    output.push_str(&border('└', '┴', '┘'));

    output
}

/// Horizontal border line.
fn border(left: char, join: char, right: char) -> String {
    let segment = "─".repeat(CELL_WIDTH);
    let mut line = String::new();
    line.push(left);
    line.push_str(&vec![segment; GRID_COLS].join(&join.to_string()));
    line.push(right);
    line.push('\n');
    line
}

/// The two content lines of one cell.
fn cell(num: u8, entry: Option<&ButtonEntry>) -> [String; 2] {
    let mut head = format!("{num:>2} {}", keypad::key_for(num));
    let mut text = String::new();

    if let Some(entry) = entry {
        if !entry.component.expose {
            head.push('*');
        }
        if entry.component.entity().is_some() {
            head = format!("{head:<8}HA");
        }
        if let Some(label) = &entry.label {
            text = label.normalized_text().chars().take(CELL_WIDTH).collect();
        }
    }

    [head, text]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ButtonSettings, Label};

    #[test]
    fn test_empty_map_shows_every_button() {
        let map = render_keypad_map(&[]);
        let lines: Vec<&str> = map.lines().collect();

        // 4 rows x 2 content lines + 5 borders
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[1].starts_with("│19 S"));
        assert!(lines[10].starts_with("│ 1 A"));
        assert!(lines[12].starts_with('└'));
        for num in 1..=24 {
            assert!(map.contains(&format!("{num:>2} ")), "missing button {num}");
        }
    }

    #[test]
    fn test_lines_have_equal_width() {
        let map = render_keypad_map(&[]);
        let widths: Vec<usize> = map.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert_eq!(widths[0], GRID_COLS * (CELL_WIDTH + 1) + 1);
    }

    #[test]
    fn test_configured_button_cell() {
        let entries = vec![ButtonEntry {
            key_num: Some(1),
            component: ButtonSettings {
                expose: false,
                ..ButtonSettings::new(1).with_entity("light.kitchen")
            },
            label: Some(Label::text("Kitchen_Ceiling\nLight")),
        }];
        let map = render_keypad_map(&entries);
        let lines: Vec<&str> = map.lines().collect();
        assert!(lines[10].starts_with("│ 1 A*   HA│"), "got {}", lines[10]);
        assert!(lines[11].starts_with("│Kitchen Ce│"), "got {}", lines[11]);
    }
}
