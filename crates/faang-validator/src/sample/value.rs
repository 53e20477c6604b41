//! Field values and the reserved sentinel strings.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// "not applicable" placeholder.
pub const NOT_APPLICABLE: &str = "not applicable";
/// "not collected" placeholder.
pub const NOT_COLLECTED: &str = "not collected";
/// "not provided" placeholder.
pub const NOT_PROVIDED: &str = "not provided";
/// "restricted access" placeholder. Policy-exempt everywhere it is accepted.
pub const RESTRICTED_ACCESS: &str = "restricted access";

/// All reserved placeholder values.
pub const SENTINELS: &[&str] = &[NOT_APPLICABLE, NOT_COLLECTED, NOT_PROVIDED, RESTRICTED_ACCESS];

/// Whether a value is one of the reserved placeholders.
///
/// Matching is exact after trimming; "Not Applicable" is not a sentinel.
pub fn is_sentinel(value: &str) -> bool {
    SENTINELS.contains(&value.trim())
}

/// One value slot of a record.
///
/// Repeated spreadsheet columns arrive already coalesced into `List`; a list
/// of structured entries (e.g. health status `{text, term}`) arrives as
/// `Objects`.
///
/// Deserialization never fails on well-formed JSON: nulls inside lists are
/// dropped and other scalars are rendered as text, so one odd value cannot
/// reject a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar string.
    Text(String),
    /// Scalar number.
    Number(f64),
    /// List of strings.
    List(Vec<String>),
    /// List of structured sub-objects.
    Objects(Vec<IndexMap<String, String>>),
}

impl FieldValue {
    /// Whether the value counts as missing.
    ///
    /// Empty or whitespace text, and lists whose every entry is blank, are
    /// missing. Numbers never are.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
            FieldValue::Objects(objects) => objects.is_empty(),
        }
    }

    /// Whether the value is list-shaped.
    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_) | FieldValue::Objects(_))
    }

    /// Borrow the text of a scalar string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar as a string; lists have no scalar form.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }

    /// String entries of the value, treating a scalar as a one-element list.
    pub fn items(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::Number(n) => vec![format_number(*n)],
            FieldValue::List(items) => items.clone(),
            FieldValue::Objects(_) => Vec::new(),
        }
    }

    /// Structured entries, if any.
    pub fn objects(&self) -> &[IndexMap<String, String>] {
        match self {
            FieldValue::Objects(objects) => objects,
            _ => &[],
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => FieldValue::Text(n.to_string()),
            },
            Value::Array(items) => {
                let items: Vec<Value> = items.into_iter().filter(|v| !v.is_null()).collect();
                if !items.is_empty() && items.iter().all(Value::is_object) {
                    FieldValue::Objects(
                        items
                            .into_iter()
                            .filter_map(|item| match item {
                                Value::Object(map) => Some(
                                    map.into_iter()
                                        .filter_map(|(k, v)| json_text(v).map(|v| (k, v)))
                                        .collect::<IndexMap<String, String>>(),
                                ),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    FieldValue::List(items.into_iter().filter_map(json_text).collect())
                }
            }
            other => FieldValue::Text(json_text(other).unwrap_or_default()),
        }
    }
}

/// Text form of a JSON value; `None` for null.
fn json_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Integers print without a trailing ".0".
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(is_sentinel("restricted access"));
        assert!(is_sentinel("  not collected "));
        assert!(!is_sentinel("Not Applicable"));
        assert!(!is_sentinel("missing"));
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from(vec!["", " "]).is_blank());
        assert!(!FieldValue::from(vec!["", "SAMEA1"]).is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
        assert!(FieldValue::Objects(Vec::new()).is_blank());
    }

    #[test]
    fn test_untagged_deserialize() {
        let text: FieldValue = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(text, FieldValue::from("male"));

        let number: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(number, FieldValue::Number(12.5));

        let list: FieldValue = serde_json::from_str("[\"A\", \"\"]").unwrap();
        assert_eq!(list, FieldValue::from(vec!["A", ""]));

        let objects: FieldValue =
            serde_json::from_str(r#"[{"text": "normal", "term": "PATO:0000461"}]"#).unwrap();
        assert_eq!(objects.objects().len(), 1);
        assert_eq!(objects.objects()[0]["term"], "PATO:0000461");
    }

    #[test]
    fn test_nulls_inside_lists_are_dropped() {
        let list: FieldValue = serde_json::from_str(r#"["B", null, ""]"#).unwrap();
        assert_eq!(list, FieldValue::from(vec!["B", ""]));

        let objects: FieldValue =
            serde_json::from_str(r#"[null, {"text": "normal", "term": "PATO:0000461", "note": null}]"#)
                .unwrap();
        assert_eq!(objects.objects().len(), 1);
        assert_eq!(objects.objects()[0].len(), 2);

        let empty: FieldValue = serde_json::from_str("[null]").unwrap();
        assert!(empty.is_blank());
    }

    #[test]
    fn test_odd_scalars_become_text() {
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::from("true"));

        let mixed: FieldValue = serde_json::from_str(r#"["A", 3, {"text": "x"}]"#).unwrap();
        assert_eq!(mixed.items(), vec!["A".to_string(), "3".to_string(), r#"{"text":"x"}"#.to_string()]);

        let object: FieldValue = serde_json::from_str(r#"{"text": "normal"}"#).unwrap();
        assert!(!object.is_list());
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(FieldValue::Number(3.0).to_scalar_string().unwrap(), "3");
        assert_eq!(FieldValue::Number(-77.11).to_scalar_string().unwrap(), "-77.11");
        assert!(FieldValue::from(vec!["a"]).to_scalar_string().is_none());
        assert_eq!(FieldValue::from("x").items(), vec!["x".to_string()]);
    }
}
