use std::collections::BTreeMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;

use crate::text_utils::{format_date, parse_date};

lazy_static! {
    // YAML 1.1 timestamp: what a YAML loader would hand back as a date object
    static ref YAML_TIMESTAMP: Regex = Regex::new(
        r"^\d{4}-\d{1,2}-\d{1,2}([Tt ]+\d{1,2}:\d{2}:\d{2}(\.\d+)?\s*(Z|[+-]\d{1,2}(:?\d{2})?)?)?$"
    ).unwrap();
}

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn from_yaml(value: Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => {
                if YAML_TIMESTAMP.is_match(&s) {
                    if let Ok(date) = parse_date(&s) {
                        return FieldValue::Date(date);
                    }
                }
                FieldValue::String(s)
            }
            Value::Sequence(seq) => FieldValue::List(seq.into_iter().map(FieldValue::from_yaml).collect()),
            Value::Mapping(mapping) => {
                let map = mapping.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, FieldValue::from_yaml(v))))
                    .collect();
                FieldValue::Map(map)
            }
            Value::Tagged(tagged) => FieldValue::from_yaml(tagged.value),
        }
    }

    /// Loose truthiness: empty strings, zero, false and null are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Integer(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0 && !f.is_nan(),
            FieldValue::String(s) => !s.is_empty(),
            FieldValue::Date(_) | FieldValue::List(_) | FieldValue::Map(_) => true,
        }
    }

    /// Text form of a scalar. Lists and maps have none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Date(d) => Some(format_date(d)),
            FieldValue::List(_) | FieldValue::Map(_) => None,
        }
    }

    /// Leading-integer reading: `"3rd"` is 3, `2.7` is 2.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            FieldValue::String(s) => leading_int(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Replaces every date, nested ones included, with its `YYYY-MM-DD` text.
    pub fn stringify_dates(self) -> FieldValue {
        match self {
            FieldValue::Date(d) => FieldValue::String(format_date(&d)),
            FieldValue::List(items) => FieldValue::List(items.into_iter().map(FieldValue::stringify_dates).collect()),
            FieldValue::Map(map) => FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.stringify_dates())).collect()),
            other => other,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

fn yaml_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
