//! Field coercion helpers.
//!
//! Every helper is total: missing or untypeable input yields a fallback
//! value instead of an error. Deciding whether a fallback is a data-quality
//! problem is left to [`crate::validation`].

use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

use crate::models::RawRow;

/// `start-end` phase range, e.g. `"2-4"`.
static PHASE_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("valid regex"));

/// Widest `start-end` range that is expanded. Wider ranges are treated as
/// malformed and yield no phases.
pub const MAX_PHASE_RANGE: i64 = 10_000;

/// Fallback for required-positive integer columns.
pub const DEFAULT_INTEGER: i64 = 1;

/// Looks up a column by its canonical header, then by its lowercase alias.
///
/// A null or empty-string cell counts as absent, so `{"ClientID": "", "clientid": "C1"}`
/// reads as `"C1"`.
pub fn lookup<'a>(row: &'a RawRow, header: &str) -> Option<&'a Value> {
    let present = |v: &&Value| !is_blank(v);
    row.get(header)
        .filter(present)
        .or_else(|| row.get(&header.to_lowercase()).filter(present))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerces a cell to a string. Missing → `""`.
pub fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| text(Some(v)))
            .collect::<Vec<_>>()
            .join(","),
        Some(obj @ Value::Object(_)) => obj.to_string(),
    }
}

/// Whole floats print without a fractional part (`3.0` → `"3"`), the way
/// spreadsheet cells display them.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.as_i64().is_none() && n.as_u64().is_none() && f.fract() == 0.0 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

/// Parses one numeric token. Fractions truncate toward zero.
fn parse_number(token: &str) -> Option<i64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

fn number_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Coerces a cell to an integer. Missing or non-numeric → [`DEFAULT_INTEGER`].
pub fn integer(value: Option<&Value>) -> i64 {
    value.and_then(number_value).unwrap_or(DEFAULT_INTEGER)
}

/// Splits a comma-delimited cell into trimmed, non-empty tokens.
///
/// Order and duplicates are preserved. An array cell is flattened element by
/// element, so an already-normalized list passes through unchanged.
pub fn delimited(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().flat_map(|v| delimited(Some(v))).collect(),
        other => text(other)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    }
}

/// Coerces a cell to a list of integers.
///
/// Strings have `[`/`]` stripped and are split on commas. Tokens that are
/// not numeric are dropped.
pub fn number_list(value: Option<&Value>, column: &str) -> Vec<i64> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(_)) | Some(Value::Object(_)) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| keep_numeric(number_value(v), v, column))
            .collect(),
        Some(v @ Value::Number(_)) => number_value(v).into_iter().collect(),
        Some(Value::String(s)) => s
            .replace(['[', ']'], "")
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .filter_map(|t| keep_numeric(parse_number(t), &t.trim(), column))
            .collect(),
    }
}

fn keep_numeric(parsed: Option<i64>, raw: &dyn fmt::Display, column: &str) -> Option<i64> {
    if parsed.is_none() {
        tracing::trace!(column, token = %raw, "Dropping non-numeric list element");
    }
    parsed
}

/// Coerces a phase cell: a `start-end` range expands inclusively, anything
/// else is read as a number list.
///
/// A reversed range (`"5-2"`) yields an empty list.
pub fn phase_list(value: Option<&Value>, column: &str) -> Vec<i64> {
    if let Some(Value::String(s)) = value {
        if let Some(caps) = PHASE_RANGE_RE.captures(s) {
            let start = caps[1].parse::<i64>().ok();
            let end = caps[2].parse::<i64>().ok();
            if let (Some(start), Some(end)) = (start, end) {
                if end - start > MAX_PHASE_RANGE {
                    tracing::trace!(column, range = %s, "Phase range too wide, ignoring");
                    return Vec::new();
                }
                return (start..=end).collect();
            }
        }
    }
    number_list(value, column)
}

/// Coerces a cell to a JSON value.
///
/// Strings are parsed as JSON; a parse failure, a missing cell, or a JSON
/// `null` becomes an empty object. Non-string cells are kept as they are.
pub fn json_object(value: Option<&Value>) -> Value {
    let parsed = match value {
        Some(Value::String(s)) => serde_json::from_str(s).unwrap_or(Value::Null),
        Some(other) => other.clone(),
        None => Value::Null,
    };
    match parsed {
        Value::Null => Value::Object(Map::new()),
        v => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> RawRow {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lookup_primary_then_alias() {
        let r = row(json!({"ClientID": "C1", "clientid": "C2"}));
        assert_eq!(lookup(&r, "ClientID"), Some(&json!("C1")));

        let r = row(json!({"clientid": "C2"}));
        assert_eq!(lookup(&r, "ClientID"), Some(&json!("C2")));

        let r = row(json!({"ClientID": "", "clientid": "C2"}));
        assert_eq!(lookup(&r, "ClientID"), Some(&json!("C2")));

        let r = row(json!({"CLIENTID": "C3"}));
        assert_eq!(lookup(&r, "ClientID"), None);
    }

    #[test]
    fn test_text() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(&json!("abc"))), "abc");
        assert_eq!(text(Some(&json!(42))), "42");
        assert_eq!(text(Some(&json!(3.0))), "3");
        assert_eq!(text(Some(&json!(2.5))), "2.5");
        assert_eq!(text(Some(&json!(true))), "true");
        assert_eq!(text(Some(&json!(["a", "b"]))), "a,b");
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(Some(&json!("3"))), 3);
        assert_eq!(integer(Some(&json!(" 4 "))), 4);
        assert_eq!(integer(Some(&json!(5))), 5);
        assert_eq!(integer(Some(&json!(2.9))), 2);
        assert_eq!(integer(Some(&json!("0"))), 0);
        assert_eq!(integer(Some(&json!("-2"))), -2);
        assert_eq!(integer(Some(&json!("abc"))), DEFAULT_INTEGER);
        assert_eq!(integer(Some(&json!("NaN"))), DEFAULT_INTEGER);
        assert_eq!(integer(Some(&json!([1]))), DEFAULT_INTEGER);
        assert_eq!(integer(None), DEFAULT_INTEGER);
    }

    #[test]
    fn test_delimited() {
        assert_eq!(delimited(Some(&json!(" a, b ,,c, a"))), vec!["a", "b", "c", "a"]);
        assert_eq!(delimited(Some(&json!(["x", "y"]))), vec!["x", "y"]);
        assert!(delimited(Some(&json!(""))).is_empty());
        assert!(delimited(None).is_empty());
    }

    #[test]
    fn test_number_list() {
        assert_eq!(number_list(Some(&json!("[1, 2, 3]")), "AvailableSlots"), vec![1, 2, 3]);
        assert_eq!(number_list(Some(&json!("1,x,3")), "AvailableSlots"), vec![1, 3]);
        assert_eq!(number_list(Some(&json!("1,,3")), "AvailableSlots"), vec![1, 3]);
        assert_eq!(number_list(Some(&json!([1, "2", "q"])), "AvailableSlots"), vec![1, 2]);
        assert_eq!(number_list(Some(&json!(4)), "AvailableSlots"), vec![4]);
        assert!(number_list(None, "AvailableSlots").is_empty());
        assert!(number_list(Some(&json!({"a": 1})), "AvailableSlots").is_empty());
    }

    #[test]
    fn test_phase_list_range() {
        assert_eq!(phase_list(Some(&json!("2-4")), "PreferredPhases"), vec![2, 3, 4]);
        assert_eq!(phase_list(Some(&json!(" 1 - 2 ")), "PreferredPhases"), vec![1, 2]);
        assert_eq!(phase_list(Some(&json!("3-3")), "PreferredPhases"), vec![3]);
        assert!(phase_list(Some(&json!("5-2")), "PreferredPhases").is_empty());
        assert!(phase_list(Some(&json!("1-99999999")), "PreferredPhases").is_empty());
    }

    #[test]
    fn test_phase_list_explicit() {
        assert_eq!(phase_list(Some(&json!("1,3,5")), "PreferredPhases"), vec![1, 3, 5]);
        assert_eq!(phase_list(Some(&json!("[2,4]")), "PreferredPhases"), vec![2, 4]);
        assert_eq!(phase_list(Some(&json!([1, 2])), "PreferredPhases"), vec![1, 2]);
        assert!(phase_list(None, "PreferredPhases").is_empty());
    }

    #[test]
    fn test_json_object() {
        assert_eq!(json_object(Some(&json!(r#"{"a": 1}"#))), json!({"a": 1}));
        assert_eq!(json_object(Some(&json!("{bad json"))), json!({}));
        assert_eq!(json_object(Some(&json!("null"))), json!({}));
        assert_eq!(json_object(None), json!({}));
        assert_eq!(json_object(Some(&json!("[1,2]"))), json!([1, 2]));
        assert_eq!(json_object(Some(&json!({"k": "v"}))), json!({"k": "v"}));
    }
}
