//! Directory-style grid packing.
//!
//! Entries fill each column top to bottom before spilling into the next,
//! the way a directory listing does, rather than reading order.

const GAP: usize = 2;

/// Lay entries out in a grid no wider than `width` columns of text.
pub fn layout(entries: &[String], width: usize) -> String {
    let longest = entries.iter().map(|e| e.chars().count()).max().unwrap_or(0);
    let column_width = longest + GAP;

    let columns = (width / column_width).max(1);
    let rows = entries.len().div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        for col in 0..columns {
            // Fill down each column before moving to the next
            let entry = match entries.get(row + col * rows) {
                Some(entry) => entry,
                None => break,
            };
            out.push_str(&format!("{:<width$}", entry, width = column_width));
        }
        out.push('\n');
    }

    out
}
