//! Table strategy: recover rows of cell text and convert them to markers.
//!
//! Table shape varies between processor versions, so row recovery probes
//! three access paths in order and takes the first that yields data. Cell
//! text likewise falls back through every known representation before giving
//! up on a cell.

use tracing::{debug, warn};

use crate::document::anchor::resolve_anchor;
use crate::document::{Document, Table, TableCell, TableRow};
use crate::extraction::error::ExtractionError;
use crate::extraction::marker::{is_valid_marker_row, marker_from_row};
use crate::extraction::result::ParseResult;

/// Walks every table on every page and adds the markers of all valid rows to
/// the result. Returns the number of markers added.
///
/// # Errors
///
/// Returns [`ExtractionError::NoPages`] when the document has no pages at
/// all; individual empty pages or tables are merely logged.
pub fn extract_from_tables(
    document: &Document,
    result: &mut ParseResult,
) -> Result<usize, ExtractionError> {
    if document.pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }

    let mut added = 0;

    for page in &document.pages {
        if page.tables.is_empty() {
            debug!("Page {} has no tables", page.page_number);
            continue;
        }

        for (table_idx, table) in page.tables.iter().enumerate() {
            let rows = extract_rows(table, &document.text);
            if rows.is_empty() {
                warn!(
                    "No data extracted from table {} on page {}",
                    table_idx + 1,
                    page.page_number
                );
                continue;
            }

            debug!(
                "Extracted {} rows from table {} on page {}",
                rows.len(),
                table_idx + 1,
                page.page_number
            );
            added += process_rows(&rows, result);
        }
    }

    Ok(added)
}

fn process_rows(rows: &[Vec<String>], result: &mut ParseResult) -> usize {
    let mut added = 0;

    for row in rows {
        if !is_valid_marker_row(row) {
            continue;
        }
        match marker_from_row(row) {
            Ok(marker) => {
                result.add_marker(marker);
                added += 1;
            }
            Err(e) => {
                debug!("Skipping row {:?}: {e}", row.first());
            }
        }
    }

    added
}

/// Recovers a table's rows as cell-text matrices.
///
/// Probes body rows, then header+body combined, then the undifferentiated
/// row list; the first shape yielding at least one row with a non-empty cell
/// wins. Returns an empty vec when every shape is absent or empty, in which
/// case the caller falls back to pattern extraction over the flat text.
#[must_use]
pub fn extract_rows(table: &Table, full_text: &str) -> Vec<Vec<String>> {
    rows_from_body(table, full_text)
        .or_else(|| rows_from_header_and_body(table, full_text))
        .or_else(|| rows_from_generic(table, full_text))
        .unwrap_or_default()
}

fn rows_from_body(table: &Table, full_text: &str) -> Option<Vec<Vec<String>>> {
    collect_rows(table.body_rows.iter(), full_text)
}

fn rows_from_header_and_body(table: &Table, full_text: &str) -> Option<Vec<Vec<String>>> {
    collect_rows(table.header_rows.iter().chain(table.body_rows.iter()), full_text)
}

fn rows_from_generic(table: &Table, full_text: &str) -> Option<Vec<Vec<String>>> {
    collect_rows(table.rows.iter(), full_text)
}

fn collect_rows<'a>(
    rows: impl Iterator<Item = &'a TableRow>,
    full_text: &str,
) -> Option<Vec<Vec<String>>> {
    let collected: Vec<Vec<String>> = rows
        .filter(|row| !row.cells.is_empty())
        .map(|row| row.cells.iter().map(|cell| cell_text(cell, full_text)).collect())
        .filter(|row: &Vec<String>| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected)
    }
}

/// Resolves a cell's text, trying every representation the OCR layer is
/// known to produce: the layout anchor, an inline `text` field, an inline
/// `content` field, and finally the layout's own `text`.
#[must_use]
pub fn cell_text(cell: &TableCell, full_text: &str) -> String {
    if let Some(layout) = &cell.layout {
        let text = resolve_anchor(layout.text_anchor.as_ref(), full_text);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(text) = &cell.text {
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    if let Some(content) = &cell.content {
        let content = content.trim();
        if !content.is_empty() {
            return content.to_string();
        }
    }

    if let Some(text) = cell.layout.as_ref().and_then(|l| l.text.as_deref()) {
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    String::new()
}
