//! Variable type and definition types.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap());

/// The closed set of kinds a merge-tag variable can declare.
///
/// Metadata is read from stored template definitions, so deserialization is
/// lenient: any name outside the four known kinds becomes [`VariableType::String`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum VariableType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
}

impl VariableType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Number => "number",
            VariableType::Boolean => "boolean",
            VariableType::Date => "date",
        }
    }

    /// Parse a type name, falling back to `string` for anything unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => VariableType::String,
            "number" => VariableType::Number,
            "boolean" => VariableType::Boolean,
            "date" => VariableType::Date,
            other => {
                tracing::warn!("unknown variable type '{}', treating as string", other);
                VariableType::String
            }
        }
    }
}

impl From<String> for VariableType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one declared merge tag on a template.
///
/// Serialized with the field names used by stored template definitions:
/// ```yaml
/// variables:
///   - key: ORDER_ID
///     type: string
///     isRequired: true
///   - key: PROMO_CODE
///     fallbackValue: WELCOME10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub key: String,

    #[serde(rename = "type", default)]
    pub var_type: VariableType,

    /// Substitute used when no value is provided. `None` means no fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_value: Option<String>,

    #[serde(default)]
    pub is_required: bool,
}

impl VariableDefinition {
    /// An optional `string` variable with no fallback.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            var_type: VariableType::String,
            fallback_value: None,
            is_required: false,
        }
    }

    #[must_use]
    pub fn with_type(mut self, var_type: VariableType) -> Self {
        self.var_type = var_type;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_value = Some(fallback.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// Check a key against the declaration format `^[A-Z_][A-Z0-9_]*$`.
///
/// This is wider than what the tag detector recognizes: digits are allowed
/// here after the first character, but a tag containing digits is never
/// detected in template text.
pub fn is_valid_key(key: &str) -> bool {
    KEY_RE.is_match(key)
}
