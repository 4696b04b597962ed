//! Runtime values supplied by callers for merge tags.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use serde::Deserialize;

/// Caller-supplied values keyed by tag key.
pub type VarValues = HashMap<String, VariableValue>;

/// A value provided for a merge tag at render time.
///
/// JSON callers deserialize straight into this type; Rust callers use the
/// `From` conversions. [`VariableValue::Null`] counts as "not provided".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum VariableValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Date(DateTime<FixedOffset>),
    List(Vec<VariableValue>),
    Map(BTreeMap<String, VariableValue>),
}

impl VariableValue {
    /// Runtime type name, as reported in type mismatch errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            VariableValue::Null => "null",
            VariableValue::Boolean(_) => "boolean",
            VariableValue::Number(_) => "number",
            VariableValue::String(_) => "string",
            VariableValue::Date(_) => "date",
            VariableValue::List(_) => "array",
            VariableValue::Map(_) => "object",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, VariableValue::Null)
    }

    /// Plain string conversion used for `string`-typed and undeclared tags.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        match self {
            VariableValue::Null => "null".to_string(),
            VariableValue::Boolean(b) => b.to_string(),
            VariableValue::Number(n) => format_number(*n),
            VariableValue::String(s) => s.clone(),
            VariableValue::Date(d) => d.to_rfc3339(),
            VariableValue::List(items) => items
                .iter()
                .map(|item| match item {
                    VariableValue::Null => String::new(),
                    other => other.to_plain_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            VariableValue::Map(_) => serde_json::Value::from(self).to_string(),
        }
    }
}

/// Shortest decimal form: `1` rather than `1.0`.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent form
/// with an explicit sign (`1e+21`, `1.5e-7`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n == 0.0 {
        // Covers -0.0 as well
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for VariableValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => VariableValue::Null,
            serde_json::Value::Bool(b) => VariableValue::Boolean(b),
            serde_json::Value::Number(n) => {
                n.as_f64().map_or(VariableValue::Null, VariableValue::Number)
            }
            serde_json::Value::String(s) => VariableValue::String(s),
            serde_json::Value::Array(items) => {
                VariableValue::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                VariableValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&VariableValue> for serde_json::Value {
    fn from(value: &VariableValue) -> Self {
        match value {
            VariableValue::Null => serde_json::Value::Null,
            VariableValue::Boolean(b) => serde_json::Value::Bool(*b),
            VariableValue::Number(n) => json_number(*n),
            VariableValue::String(s) => serde_json::Value::String(s.clone()),
            VariableValue::Date(d) => serde_json::Value::String(d.to_rfc3339()),
            VariableValue::List(items) => {
                serde_json::Value::Array(items.iter().map(Into::into).collect())
            }
            VariableValue::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}

/// Whole numbers serialize as JSON integers; non-finite numbers as `null`.
fn json_number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::String(s.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(s: String) -> Self {
        VariableValue::String(s)
    }
}

impl From<bool> for VariableValue {
    fn from(b: bool) -> Self {
        VariableValue::Boolean(b)
    }
}

impl From<f64> for VariableValue {
    fn from(n: f64) -> Self {
        VariableValue::Number(n)
    }
}

impl From<i32> for VariableValue {
    fn from(n: i32) -> Self {
        VariableValue::Number(f64::from(n))
    }
}

impl From<u32> for VariableValue {
    fn from(n: u32) -> Self {
        VariableValue::Number(f64::from(n))
    }
}

impl From<i64> for VariableValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        VariableValue::Number(n as f64)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for VariableValue {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        VariableValue::Date(dt.with_timezone(&offset))
    }
}

impl From<NaiveDateTime> for VariableValue {
    fn from(dt: NaiveDateTime) -> Self {
        VariableValue::Date(dt.and_utc().fixed_offset())
    }
}

impl From<NaiveDate> for VariableValue {
    fn from(date: NaiveDate) -> Self {
        date.and_time(NaiveTime::default()).into()
    }
}

impl<T: Into<VariableValue>> From<Option<T>> for VariableValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(VariableValue::Null, Into::into)
    }
}
