//! Terminal output helpers.
//!
//! `Table` draws a box-drawn table that shrinks its widest columns to fit
//! the terminal.
//!
//! ```rust
//! let mut table = cxs::ui::Table::new(&["Library", "Used by"]);
//! table.add_row(vec!["mathutils".to_string(), "sim".to_string()]);
//! table.print();
//! ```

use colored::*;
use console::{Term, measure_text_width, truncate_str};

/// Columns are never shrunk below this width.
const MIN_COLUMN: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row.into_iter().map(|c| flatten(&c)).collect());
        }
    }

    pub fn print(&self) {
        if self.headers.is_empty() {
            return;
        }
        let (_, term_width) = Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{line}");
        }
    }

    /// Lay the table out for a terminal `max_width` columns wide.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        let widths = self.column_widths(max_width);
        let border = |left: &str, mid: &str, right: &str| {
            let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {left}{}{right}", inner.join(mid))
        };
        let line = |cells: Vec<String>| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| {
                    let cut = truncate_str(cell, w, "...");
                    let pad = w.saturating_sub(measure_text_width(&cut));
                    format!(" {cut}{} ", " ".repeat(pad))
                })
                .collect();
            format!("  │{}│", padded.join("│"))
        };

        let mut out = vec![border("┌", "┬", "┐")];
        out.push(line(
            self.headers.iter().map(|h| h.bold().to_string()).collect(),
        ));
        out.push(border("├", "┼", "┤"));
        out.extend(self.rows.iter().map(|row| line(row.clone())));
        out.push(border("└", "┴", "┘"));
        out
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(measure_text_width(cell));
            }
        }

        let overhead = 3 + 3 * widths.len();
        let budget = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > budget {
            let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widest <= MIN_COLUMN {
                break;
            }
            widths[idx] -= 1;
        }
        widths
    }
}

fn flatten(cell: &str) -> String {
    cell.replace(['\n', '\r', '\t'], " ")
}
