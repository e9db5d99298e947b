//! Integration tests for table reconstruction.
//!
//! Pages are built from mock fragments laid out the way statement generators
//! draw them: a title block, a header row, body lines and a footer.

use pdf_tabular::geometry::{Axis, BBox};
use pdf_tabular::layout::{
    find_attr_group_matching, find_header_group, find_row_table, merge_overlapping_rows,
    Fragment, LabelPattern, Orientation, Row,
};
use pdf_tabular::record::{parse_amount, RecordBuilder};
use pdf_tabular::text::TextNormalization;
use pdf_tabular::{Diagnostic, Error, TableConfig, TableExtractor};
use serde_json::json;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

/// Fragment of `text` with its lower-left corner at (x0, y0), 6pt per char.
fn mock_fragment(text: &str, x0: f32, y0: f32) -> Fragment {
    let width = text.chars().count() as f32 * 6.0;
    Fragment::new(text, BBox::new(x0, y0, x0 + width, y0 + 10.0))
}

fn pairs(map: &indexmap::IndexMap<String, String>) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// A card statement page: title, header, five transactions (one drawn in
/// two passes), a footer and a margin note past the right boundary.
fn create_statement_page() -> Vec<Fragment> {
    vec![
        mock_fragment("ACME BANK", 20.0, 760.0),
        mock_fragment("Statement period 07/01 - 07/31", 20.0, 740.0),
        // Header
        mock_fragment("Date", 20.0, 700.0),
        mock_fragment("Description", 80.0, 700.0),
        mock_fragment("Amount", 400.0, 700.0),
        // Body
        mock_fragment("07/02", 20.0, 680.0),
        mock_fragment("COFFEE HOUSE", 80.0, 680.0),
        mock_fragment("4.50", 420.0, 680.0),
        mock_fragment("07/05", 20.0, 665.0),
        mock_fragment("PAYMENT - THANK YOU", 80.0, 665.0),
        mock_fragment("(250.00)", 405.0, 665.0),
        // Drawn in two passes with baseline jitter
        mock_fragment("07/09", 20.0, 650.3),
        mock_fragment("HARDWARE ", 80.0, 650.3),
        mock_fragment("STORE #12", 134.0, 649.0),
        mock_fragment("1,204.99", 405.0, 649.0),
        // Missing description
        mock_fragment("07/12", 20.0, 635.0),
        mock_fragment("15.00", 415.0, 635.0),
        mock_fragment("07/20", 20.0, 620.0),
        mock_fragment("BOOKSHOP", 80.0, 620.0),
        mock_fragment("32.10", 415.0, 620.0),
        // Margin note past the right boundary
        mock_fragment("*", 560.0, 620.0),
        // Footer
        mock_fragment("Page 1 of 3", 250.0, 40.0),
    ]
}

fn statement_extractor() -> TableExtractor {
    TableExtractor::new(["Date", "Description", "Amount"])
        .with_config(TableConfig::default().with_right_boundary(540.0))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_row_scenario() {
    let h1 = mock_fragment("Last Name", 0.0, 100.0);
    let h2 = mock_fragment("First Name", 50.0, 100.0);
    let b1 = mock_fragment("Smith", 0.0, 90.0);
    let b2 = mock_fragment("John", 50.0, 90.0);

    let table = find_row_table(&[&h1, &h2], &[&b1, &b2], &TableConfig::default()).unwrap();
    let norm = TextNormalization::default();

    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        pairs(&table.rows[0].to_map(&norm)),
        vec![("Last Name", "Smith"), ("First Name", "John")]
    );
}

#[test]
fn test_overlapping_rows_scenario() {
    let a1 = Fragment::new("Acme ", BBox::new(0.0, 88.0, 30.0, 91.0));
    let a2 = Fragment::new("12", BBox::new(50.0, 88.0, 60.0, 91.0));
    let b1 = Fragment::new("Corp", BBox::new(0.0, 89.0, 30.0, 92.0));
    let b2 = Fragment::new(".50", BBox::new(60.0, 89.0, 75.0, 92.0));

    let mut first = Row::new();
    first.push(0, "Name", &a1);
    first.push(1, "Amount", &a2);
    let mut second = Row::new();
    second.push(0, "Name", &b1);
    second.push(1, "Amount", &b2);

    let merged = merge_overlapping_rows(vec![first, second], Axis::Y);

    assert_eq!(merged.len(), 1);
    assert_eq!(
        pairs(&merged[0].to_map(&TextNormalization::default())),
        vec![("Name", "Acme Corp"), ("Amount", "12.50")]
    );
}

#[test]
fn test_unassigned_fragment_scenario() {
    let h1 = mock_fragment("Last Name", 0.0, 100.0);
    let h2 = mock_fragment("First Name", 50.0, 100.0);
    let b1 = mock_fragment("Smith", 0.0, 90.0);
    let b2 = mock_fragment("John", 50.0, 90.0);
    let stray = mock_fragment("X", 200.0, 90.0);
    let config = TableConfig::default().with_right_boundary(150.0);

    let table = find_row_table(&[&h1, &h2], &[&b1, &b2, &stray], &config).unwrap();

    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        pairs(&table.rows[0].to_map(&config.text_normalization)),
        vec![("Last Name", "Smith"), ("First Name", "John")]
    );
    assert_eq!(
        table.diagnostics,
        vec![Diagnostic::UnassignedFragment {
            text: "X".to_string(),
            bbox: stray.bbox,
        }]
    );
}

// ============================================================================
// Full page
// ============================================================================

#[test]
fn test_statement_page() {
    let page = create_statement_page();
    let result = statement_extractor().extract_rows(&page).unwrap();

    assert_eq!(result.labels, vec!["Date", "Description", "Amount"]);

    let rows: Vec<Vec<(&str, &str)>> = result.rows.iter().map(pairs).collect();
    assert_eq!(
        rows,
        vec![
            vec![("Date", "07/02"), ("Description", "COFFEE HOUSE"), ("Amount", "4.50")],
            vec![
                ("Date", "07/05"),
                ("Description", "PAYMENT - THANK YOU"),
                ("Amount", "(250.00)")
            ],
            vec![
                ("Date", "07/09"),
                ("Description", "HARDWARE STORE #12"),
                ("Amount", "1,204.99")
            ],
            vec![("Date", "07/12"), ("Amount", "15.00")],
            vec![("Date", "07/20"), ("Description", "BOOKSHOP"), ("Amount", "32.10")],
            vec![("Description", "Page 1 of 3")],
        ]
    );

    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].to_string().contains("\"*\""));
}

#[test]
fn test_statement_page_without_merge_keeps_split_line() {
    let page = create_statement_page();
    let extractor = TableExtractor::new(["Date", "Description", "Amount"]).with_config(
        TableConfig::default()
            .with_right_boundary(540.0)
            .with_merge_overlapping_rows(false),
    );
    let result = extractor.extract_rows(&page).unwrap();

    // 07/09 line is two rows before the repair
    assert_eq!(result.rows.len(), 7);
    assert_eq!(pairs(&result.rows[2]), vec![("Date", "07/09"), ("Description", "HARDWARE")]);
    assert_eq!(
        pairs(&result.rows[3]),
        vec![("Description", "STORE #12"), ("Amount", "1,204.99")]
    );
}

#[test]
fn test_header_baseline_and_body_split() {
    let page = create_statement_page();
    let labels = vec![LabelPattern::from("Date"), LabelPattern::from("Amount")];
    let y0 = find_attr_group_matching(&labels, Axis::Y, &page, &TableConfig::default()).unwrap();
    assert_eq!(y0, 700.0);

    let group = find_header_group(&labels, Axis::Y, &page, &TableConfig::default()).unwrap();
    let texts: Vec<&str> = group.headers.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["Date", "Amount"]);
}

#[test]
fn test_regex_labels() {
    let page = vec![
        mock_fragment("Posting Date", 20.0, 700.0),
        mock_fragment("Amount ($)", 300.0, 700.0),
        mock_fragment("07/02", 20.0, 680.0),
        mock_fragment("4.50", 310.0, 680.0),
    ];
    let extractor = TableExtractor::new(vec![
        LabelPattern::regex(r"Date$").unwrap(),
        LabelPattern::regex(r"^Amount").unwrap(),
    ]);
    let result = extractor.extract_rows(&page).unwrap();

    // Keys are the header texts as printed
    assert_eq!(
        pairs(&result.rows[0]),
        vec![("Posting Date", "07/02"), ("Amount ($)", "4.50")]
    );
}

#[test]
fn test_missing_header_is_page_level() {
    let page = vec![mock_fragment("Summary of fees", 20.0, 700.0)];
    match statement_extractor().extract_rows(&page) {
        Err(Error::NoMatchFound { labels }) => assert_eq!(labels, vec!["Date", "Description", "Amount"]),
        other => panic!("expected NoMatchFound, got {:?}", other.map(|r| r.rows)),
    }
}

#[test]
fn test_multi_page_extraction() {
    let pages = vec![
        create_statement_page(),
        vec![mock_fragment("Important notices", 20.0, 700.0)],
        create_statement_page(),
    ];
    let extractor = statement_extractor();

    let mut seen = Vec::new();
    for outcome in extractor.extract_pages(pages) {
        match outcome {
            Ok(page) => seen.push((page.page_index, page.rows.len())),
            Err(Error::NoMatchFound { .. }) => continue,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(seen, vec![(0, 6), (2, 6)]);
}

#[test]
fn test_transposed_table() {
    let page = vec![
        mock_fragment("Name", 10.0, 300.0),
        mock_fragment("Grade", 10.0, 280.0),
        mock_fragment("Ann", 100.0, 300.0),
        mock_fragment("A-", 100.0, 280.0),
        mock_fragment("Bob", 160.0, 300.0),
        mock_fragment("B+", 160.0, 280.0),
    ];
    let extractor = TableExtractor::new(["Name", "Grade"]).with_orientation(Orientation::Columns);
    let result = extractor.extract_rows(&page).unwrap();

    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows[0]["Name"], "Ann");
    assert_eq!(result.rows[0]["Grade"], "A-");
    assert_eq!(result.rows[1]["Name"], "Bob");
}

#[test]
fn test_records_for_persistence() {
    let page = create_statement_page();
    let result = statement_extractor().extract_rows(&page).unwrap();
    let builder = RecordBuilder::new()
        .with_column_name("Description", "memo")
        .with_converter("Amount", parse_amount);

    let records: Vec<_> = result.rows.iter().map(|row| builder.build(row)).collect();

    assert_eq!(records[0]["date"], json!("07/02"));
    assert_eq!(records[0]["memo"], json!("COFFEE HOUSE"));
    assert_eq!(records[0]["amount"], json!(4.5));
    assert_eq!(records[1]["amount"], json!(-250.0));
    assert_eq!(records[2]["amount"], json!(1204.99));
    assert!(records[3].get("memo").is_none());
}

#[test]
fn test_case_insensitive_header() {
    let page = vec![
        mock_fragment("DATE", 20.0, 700.0),
        mock_fragment("AMOUNT", 300.0, 700.0),
        mock_fragment("07/02", 20.0, 680.0),
        mock_fragment("4.50", 310.0, 680.0),
    ];
    let config = TableConfig::default()
        .with_text_normalization(TextNormalization::default().with_case_insensitive(true));
    let result = TableExtractor::new(["Date", "Amount"])
        .with_config(config)
        .extract_rows(&page)
        .unwrap();

    assert_eq!(pairs(&result.rows[0]), vec![("DATE", "07/02"), ("AMOUNT", "4.50")]);
}

#[test]
fn test_identical_text_fragments_stay_distinct() {
    let page = vec![
        mock_fragment("Debit", 20.0, 700.0),
        mock_fragment("Credit", 120.0, 700.0),
        mock_fragment("0.00", 20.0, 680.0),
        mock_fragment("0.00", 120.0, 680.0),
        mock_fragment("0.00", 20.0, 660.0),
    ];
    let result = TableExtractor::new(["Debit", "Credit"]).extract_rows(&page).unwrap();

    assert_eq!(result.rows.len(), 2);
    assert_eq!(pairs(&result.rows[0]), vec![("Debit", "0.00"), ("Credit", "0.00")]);
    assert_eq!(pairs(&result.rows[1]), vec![("Debit", "0.00")]);
}
