use super::*;

fn live_lines(text: &str) -> Vec<String> {
    let mut cursor = ParseCursor::for_text(text);
    text.lines().filter_map(|l| cursor.advance(l)).collect()
}

#[test]
fn test_collapse_spaces() {
    assert_eq!(collapse_spaces("SELECT    *  FROM   T"), "SELECT * FROM T");
    assert_eq!(collapse_spaces("no-runs"), "no-runs");
    assert_eq!(collapse_spaces(""), "");
}

#[test]
fn test_is_line_comment() {
    assert!(is_line_comment("   -- note"));
    assert!(!is_line_comment("SELECT 1; -- note"));
}

#[test]
fn test_count_terminators_skips_comment_lines() {
    let text = "-- drop it; really;\nCREATE TABLE A.B (X INT);\n/* old; */\nSELECT 1; SELECT 2;\n";
    assert_eq!(count_terminators(text), 3);
}

#[test]
fn test_line_comments_are_dropped() {
    let text = "-- header\nSELECT 1; -- trailing note\n   --indented\n";
    assert_eq!(live_lines(text), vec!["SELECT 1;"]);
}

#[test]
fn test_multi_line_block_comment() {
    let text = "/* header\nCREATE TABLE HIDDEN.T (A INT);\n*/ CREATE TABLE DB.T (A INT);\n";
    assert_eq!(live_lines(text), vec!["CREATE TABLE DB.T (A INT);"]);
}

#[test]
fn test_block_comment_opened_mid_line() {
    let mut cursor = ParseCursor::new();
    assert_eq!(
        cursor.advance("SELECT 1 /* start"),
        Some("SELECT 1".to_string())
    );
    assert_eq!(cursor.state(), ScanState::InBlockComment);
    assert_eq!(cursor.advance("still comment; DELETE"), None);
    assert_eq!(cursor.advance("end */ FROM T;"), Some("FROM T;".to_string()));
    assert_eq!(cursor.state(), ScanState::Live);
    assert_eq!(cursor.line_number(), 3);
}

#[test]
fn test_inline_block_comment_is_removed() {
    let mut cursor = ParseCursor::new();
    assert_eq!(
        cursor.advance("CREATE /* set */ TABLE   DB.T (A INT);"),
        Some("CREATE TABLE DB.T (A INT);".to_string())
    );
    assert_eq!(cursor.state(), ScanState::Live);
}

#[test]
fn test_line_comment_marker_inside_block_does_not_end_block() {
    let mut cursor = ParseCursor::new();
    assert_eq!(cursor.advance("/*"), None);
    assert_eq!(cursor.advance("-- not the end"), None);
    assert_eq!(cursor.state(), ScanState::InBlockComment);
    assert_eq!(cursor.advance("*/"), None);
    assert_eq!(cursor.state(), ScanState::Live);
}

#[test]
fn test_blank_lines_have_no_live_text() {
    let mut cursor = ParseCursor::new();
    assert_eq!(cursor.advance("   "), None);
    assert_eq!(cursor.advance(""), None);
}

#[test]
fn test_for_text_counts_terminators() {
    let cursor = ParseCursor::for_text("SELECT 1;\nSELECT 2;\n");
    assert_eq!(cursor.terminators(), 2);
    assert_eq!(cursor.line_number(), 0);
}
