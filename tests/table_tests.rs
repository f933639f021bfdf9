use labmarker::document::{Document, Layout, Page, Table, TableCell, TableRow, TextAnchor};
use labmarker::extraction::table::{cell_text, extract_from_tables, extract_rows};
use labmarker::extraction::{ExtractionError, ParseResult};

fn plain_cell(text: &str) -> TableCell {
    TableCell {
        layout: Some(Layout {
            text_anchor: Some(TextAnchor::Plain(text.to_string())),
            text: None,
        }),
        text: None,
        content: None,
    }
}

fn row(cells: &[&str]) -> TableRow {
    TableRow {
        cells: cells.iter().map(|c| plain_cell(c)).collect(),
    }
}

#[test]
fn test_body_rows_are_preferred() {
    let table = Table {
        header_rows: vec![row(&["Test", "Ergebnis"])],
        body_rows: vec![row(&["Ferritin", "120"])],
        rows: vec![row(&["ignored", "1"])],
    };

    let rows = extract_rows(&table, "");
    assert_eq!(rows, vec![vec!["Ferritin".to_string(), "120".to_string()]]);
}

#[test]
fn test_header_and_body_fallback_when_body_is_empty() {
    let table = Table {
        header_rows: vec![row(&["Test", "Ergebnis"])],
        body_rows: Vec::new(),
        rows: Vec::new(),
    };

    let rows = extract_rows(&table, "");
    assert_eq!(rows, vec![vec!["Test".to_string(), "Ergebnis".to_string()]]);
}

#[test]
fn test_generic_rows_fallback() {
    let table = Table {
        header_rows: Vec::new(),
        body_rows: Vec::new(),
        rows: vec![row(&["Zink", "0,95", "mg/l"])],
    };

    let rows = extract_rows(&table, "");
    assert_eq!(
        rows,
        vec![vec![
            "Zink".to_string(),
            "0,95".to_string(),
            "mg/l".to_string()
        ]]
    );
}

#[test]
fn test_empty_table_yields_no_rows() {
    let table = Table::default();

    assert!(extract_rows(&table, "").is_empty());
}

#[test]
fn test_rows_with_only_empty_cells_are_dropped() {
    let table = Table {
        header_rows: Vec::new(),
        body_rows: vec![row(&["", "", ""])],
        rows: Vec::new(),
    };

    assert!(extract_rows(&table, "").is_empty());
}

#[test]
fn test_cell_text_falls_back_to_inline_text() {
    let cell = TableCell {
        layout: None,
        text: Some(" Ferritin ".to_string()),
        content: None,
    };

    assert_eq!(cell_text(&cell, ""), "Ferritin");
}

#[test]
fn test_cell_text_falls_back_to_content() {
    let cell = TableCell {
        layout: None,
        text: None,
        content: Some("120".to_string()),
    };

    assert_eq!(cell_text(&cell, ""), "120");
}

#[test]
fn test_cell_text_falls_back_to_layout_text() {
    let cell = TableCell {
        layout: Some(Layout {
            text_anchor: None,
            text: Some("g/dl".to_string()),
        }),
        text: None,
        content: None,
    };

    assert_eq!(cell_text(&cell, ""), "g/dl");
}

#[test]
fn test_cell_text_resolves_segments_against_document_text() {
    let full_text = "Hämoglobin 14,2";
    let cell = TableCell {
        layout: Some(Layout {
            text_anchor: Some(TextAnchor::Structured {
                content: None,
                text_segments: vec![labmarker::document::TextSegment {
                    start_index: 0,
                    end_index: 11,
                }],
            }),
            text: None,
        }),
        text: None,
        content: None,
    };

    assert_eq!(cell_text(&cell, full_text), "Hämoglobin");
}

#[test]
fn test_extract_from_tables_adds_valid_rows() {
    let document = Document {
        text: String::new(),
        pages: vec![Page {
            page_number: 1,
            tables: vec![Table {
                header_rows: Vec::new(),
                body_rows: vec![
                    row(&["Hämoglobin", "14,2", "g/dl", "13.5-17.5"]),
                    row(&["Seite 1", "", "", ""]),
                ],
                rows: Vec::new(),
            }],
            form_fields: Vec::new(),
        }],
        entities: Vec::new(),
    };

    let mut result = ParseResult::new();
    let added = extract_from_tables(&document, &mut result).unwrap();

    assert_eq!(added, 1);
    assert_eq!(result.hematology.len(), 1);
    assert_eq!(result.hematology[0].test, "Hämoglobin");
    assert_eq!(result.hematology[0].result, "14.2");
    assert_eq!(result.hematology[0].unit, "g/dl");
    assert!(!result.hematology[0].is_critical);
}

#[test]
fn test_extract_from_tables_without_pages_degrades() {
    let document = Document::default();
    let mut result = ParseResult::new();

    assert_eq!(
        extract_from_tables(&document, &mut result),
        Err(ExtractionError::NoPages)
    );
}
