//! Ordered keyword tables
//!
//! Matching is substring-based on upper-cased live text, so one line can
//! contain several keywords (`CREATE VIEW ... AS SELECT`). Tables are tested
//! in order and the first keyword found wins. The order is part of the
//! contract: statistics collection first, then structural DDL, then DML,
//! with bare `SELECT` last.

use serde::Serialize;

/// What kind of statement a keyword introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementCategory {
    /// `COLLECT STATISTICS`
    Statistics,
    /// Structural DDL
    Ddl,
    /// Data manipulation
    Dml,
}

impl StatementCategory {
    /// Whether synopsis text for this category is cut to a fixed width.
    /// Structural DDL keeps the whole line.
    pub fn truncates(self) -> bool {
        !matches!(self, StatementCategory::Ddl)
    }
}

/// A classifier keyword and its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub text: &'static str,
    pub category: StatementCategory,
}

const fn kw(text: &'static str, category: StatementCategory) -> Keyword {
    Keyword { text, category }
}

/// Statement classifier keywords in priority order. First match wins.
pub const CLASSIFIER_KEYWORDS: &[Keyword] = &[
    kw("COLLECT STATISTICS", StatementCategory::Statistics),
    kw("COLLECT STATS", StatementCategory::Statistics),
    kw("ALTER TABLE", StatementCategory::Ddl),
    kw("CREATE TABLE", StatementCategory::Ddl),
    kw("CREATE MULTISET TABLE", StatementCategory::Ddl),
    kw("CREATE SET TABLE", StatementCategory::Ddl),
    kw("RENAME TABLE", StatementCategory::Ddl),
    kw("REPLACE VIEW", StatementCategory::Ddl),
    kw("CREATE VIEW", StatementCategory::Ddl),
    kw("REPLACE RECURSIVE VIEW", StatementCategory::Ddl),
    kw("RENAME VIEW", StatementCategory::Ddl),
    kw("EXEC", StatementCategory::Dml),
    kw("INSERT INTO", StatementCategory::Dml),
    kw("DROP TABLE", StatementCategory::Ddl),
    kw("DROP VIEW", StatementCategory::Ddl),
    kw("DELETE", StatementCategory::Dml),
    kw("UPDATE", StatementCategory::Dml),
    kw("SELECT", StatementCategory::Dml),
];

/// How the extractor reads the object name after a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatement {
    /// `CREATE ... TABLE name` / `REPLACE VIEW name`
    Define,
    /// `RENAME VIEW old TO new`; the new name is recorded
    Rename,
}

/// Schema-defining keywords scanned by the object-database extractor, in order
pub const OBJECT_KEYWORDS: &[(&str, ObjectStatement)] = &[
    ("CREATE TABLE", ObjectStatement::Define),
    ("CREATE MULTISET TABLE", ObjectStatement::Define),
    ("CREATE SET TABLE", ObjectStatement::Define),
    ("REPLACE VIEW", ObjectStatement::Define),
    ("RENAME VIEW", ObjectStatement::Rename),
];

/// First classifier keyword contained in `upper`, in priority order.
pub fn match_keyword(upper: &str) -> Option<&'static Keyword> {
    CLASSIFIER_KEYWORDS.iter().find(|k| upper.contains(k.text))
}

/// First object keyword contained in `upper`, with the text following it.
pub fn match_object_keyword(upper: &str) -> Option<(ObjectStatement, &str)> {
    OBJECT_KEYWORDS.iter().find_map(|(text, statement)| {
        upper
            .find(text)
            .map(|pos| (*statement, &upper[pos + text.len()..]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_view_beats_select() {
        let k = match_keyword("REPLACE VIEW DB.V AS SELECT * FROM DB.T;").unwrap();
        assert_eq!(k.text, "REPLACE VIEW");
        assert_eq!(k.category, StatementCategory::Ddl);
    }

    #[test]
    fn test_statistics_beats_table_keywords() {
        let k = match_keyword("COLLECT STATISTICS ON DB.T COLUMN (A);").unwrap();
        assert_eq!(k.category, StatementCategory::Statistics);
        assert!(k.category.truncates());
    }

    #[test]
    fn test_select_is_last_resort() {
        assert_eq!(match_keyword("SELECT 1;").unwrap().text, "SELECT");
        assert!(match_keyword("BT;").is_none());
    }

    #[test]
    fn test_match_object_keyword_returns_remainder() {
        let (statement, rest) = match_object_keyword("CREATE MULTISET TABLE DB.T ,NO FALLBACK").unwrap();
        assert_eq!(statement, ObjectStatement::Define);
        assert_eq!(rest, " DB.T ,NO FALLBACK");

        let (statement, rest) = match_object_keyword("RENAME VIEW A.B TO A.C;").unwrap();
        assert_eq!(statement, ObjectStatement::Rename);
        assert_eq!(rest, " A.B TO A.C;");

        assert!(match_object_keyword("INSERT INTO DB.T SELECT 1;").is_none());
    }
}
