//! Shaping row mappings into flat records for a relational store.
//!
//! Header labels make poor column names ("Last Name", "Amount ($)"), so each
//! label is mapped to a stable column name, either explicitly or by the
//! default rule: lowercase, spaces replaced by underscores. Values can be run
//! through per-label converters to get typed JSON (numbers, nulls) instead of
//! text.

use crate::layout::RowMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Converts one cell's text into a JSON value.
pub type ValueConverter = Box<dyn Fn(&str) -> Value + Send + Sync>;

/// Default column name for a header label.
///
/// # Examples
///
/// ```
/// use pdf_tabular::record::key_to_col_name;
/// use std::collections::HashMap;
///
/// let mut mapping = HashMap::new();
/// mapping.insert("Amount ($)".to_string(), "amount".to_string());
///
/// assert_eq!(key_to_col_name("Last Name", &mapping), "last_name");
/// assert_eq!(key_to_col_name("Amount ($)", &mapping), "amount");
/// ```
pub fn key_to_col_name(key: &str, mapping: &HashMap<String, String>) -> String {
    match mapping.get(key) {
        Some(name) => name.clone(),
        None => key.to_lowercase().replace(' ', "_"),
    }
}

/// Builds flat JSON records from row mappings.
#[derive(Default)]
pub struct RecordBuilder {
    column_names: HashMap<String, String>,
    converters: HashMap<String, ValueConverter>,
}

impl fmt::Debug for RecordBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("column_names", &self.column_names)
            .field("converters", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RecordBuilder {
    /// A builder using only the default naming rule and text values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `column` as the column name for `label`.
    pub fn with_column_name(mut self, label: impl Into<String>, column: impl Into<String>) -> Self {
        self.column_names.insert(label.into(), column.into());
        self
    }

    /// Convert values of `label` with `converter`.
    pub fn with_converter<C>(mut self, label: impl Into<String>, converter: C) -> Self
    where
        C: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.converters.insert(label.into(), Box::new(converter));
        self
    }

    /// Column name used for `label`.
    pub fn column_name(&self, label: &str) -> String {
        key_to_col_name(label, &self.column_names)
    }

    /// Turn one row mapping into a record. Absent cells stay absent.
    pub fn build(&self, row: &RowMap) -> Map<String, Value> {
        row.iter()
            .map(|(label, text)| {
                let value = match self.converters.get(label) {
                    Some(convert) => convert(text),
                    None => Value::String(text.clone()),
                };
                (self.column_name(label), value)
            })
            .collect()
    }
}

/// Parse a printed amount such as `1,234.56`, `$12.00` or `(45.10)`.
///
/// Parentheses and a trailing minus mark negatives. Blank cells and
/// placeholder dashes become `null`; anything else that is not a number is
/// kept as text.
///
/// # Examples
///
/// ```
/// use pdf_tabular::record::parse_amount;
/// use serde_json::json;
///
/// assert_eq!(parse_amount("1,234.56"), json!(1234.56));
/// assert_eq!(parse_amount("(45.10)"), json!(-45.1));
/// assert_eq!(parse_amount("-"), json!(null));
/// assert_eq!(parse_amount("n/a"), json!("n/a"));
/// ```
pub fn parse_amount(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '-' || c == '\u{2014}' || c == '\u{2013}') {
        return Value::Null;
    }

    let (negative, body) = if let Some(inner) = trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        (true, inner)
    } else if let Some(inner) = trimmed.strip_suffix('-') {
        (true, inner)
    } else {
        (false, trimmed)
    };

    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' ' | '\u{a0}'))
        .collect();

    match digits.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            let number = if negative { -number } else { number };
            serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(text.to_string()))
        },
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> RowMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_column_names() {
        let builder = RecordBuilder::new();
        let record = builder.build(&row(&[("Last Name", "Smith"), ("First Name", "John")]));

        assert_eq!(record["last_name"], json!("Smith"));
        assert_eq!(record["first_name"], json!("John"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_explicit_column_name() {
        let builder = RecordBuilder::new().with_column_name("Amount ($)", "amount_usd");
        assert_eq!(builder.column_name("Amount ($)"), "amount_usd");
        assert_eq!(builder.column_name("Posting Date"), "posting_date");
    }

    #[test]
    fn test_converter_applies_per_label() {
        let builder = RecordBuilder::new().with_converter("Amount", parse_amount);
        let record = builder.build(&row(&[("Memo", "1,000"), ("Amount", "1,000")]));

        assert_eq!(record["memo"], json!("1,000"));
        assert_eq!(record["amount"], json!(1000.0));
    }

    #[test]
    fn test_absent_cells_stay_absent() {
        let record = RecordBuilder::new().build(&row(&[("Date", "07/01")]));
        assert!(record.get("amount").is_none());
    }

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(parse_amount("12"), json!(12.0));
        assert_eq!(parse_amount("$1,250.00"), json!(1250.0));
        assert_eq!(parse_amount("45.10-"), json!(-45.1));
        assert_eq!(parse_amount("( 7.50 )"), json!(-7.5));
        assert_eq!(parse_amount(""), json!(null));
        assert_eq!(parse_amount("\u{2014}"), json!(null));
        assert_eq!(parse_amount("TOTAL"), json!("TOTAL"));
    }

    #[test]
    fn test_debug_lists_converters() {
        let builder = RecordBuilder::new().with_converter("Amount", parse_amount);
        assert!(format!("{:?}", builder).contains("Amount"));
    }
}
