//! Validation and save-time derivation of variable definitions.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{VariableDefinition, is_valid_key};
use crate::templates::detector::detect_tags;

/// Problems that make a set of variable definitions unacceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Key does not match `^[A-Z_][A-Z0-9_]*$`.
    #[error("invalid variable key '{key}': must match ^[A-Z_][A-Z0-9_]*$")]
    InvalidKey { key: String },

    /// A required variable declares a fallback value.
    #[error("variable '{key}' is required and cannot have a fallback value")]
    RequiredWithFallback { key: String },

    /// The same key is declared more than once.
    #[error("variable '{key}' is declared more than once")]
    DuplicateKey { key: String },
}

/// Result of checking a template's declared variables against its body.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Whether the definitions are valid.
    pub valid: bool,
    /// Validation errors (empty if valid).
    pub errors: Vec<DefinitionError>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self { valid: true, errors: vec![], warnings: vec![] }
    }

    pub fn add_error(&mut self, error: DefinitionError) {
        self.errors.push(error);
        self.valid = false;
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate a single definition.
pub fn validate_definition(def: &VariableDefinition) -> Result<(), DefinitionError> {
    if !is_valid_key(&def.key) {
        return Err(DefinitionError::InvalidKey { key: def.key.clone() });
    }
    if def.is_required && def.fallback_value.is_some() {
        return Err(DefinitionError::RequiredWithFallback { key: def.key.clone() });
    }
    Ok(())
}

/// Validate a full definition set: every definition plus key uniqueness.
pub fn validate_definitions(definitions: &[VariableDefinition]) -> Vec<DefinitionError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for def in definitions {
        if let Err(e) = validate_definition(def) {
            errors.push(e);
        }
        if !seen.insert(def.key.as_str()) {
            errors.push(DefinitionError::DuplicateKey { key: def.key.clone() });
        }
    }

    errors
}

/// Check a template's definitions against the tags its body actually uses.
pub fn check_template(body: &str, definitions: &[VariableDefinition]) -> ValidationResult {
    let mut result = ValidationResult::success();

    for error in validate_definitions(definitions) {
        result.add_error(error);
    }

    let used = detect_tags(body);
    let used_set: HashSet<&str> = used.iter().map(String::as_str).collect();

    for def in definitions {
        if def.key.chars().any(|c| c.is_ascii_digit()) {
            result.add_warning(format!(
                "variable '{}' contains digits and can never be matched as a merge tag",
                def.key
            ));
        } else if !used_set.contains(def.key.as_str()) {
            result.add_warning(format!("variable '{}' is declared but not used", def.key));
        }
    }

    let declared: HashSet<&str> = definitions.iter().map(|d| d.key.as_str()).collect();
    for key in &used {
        if !declared.contains(key.as_str()) {
            result.add_warning(format!("merge tag '{{{{{key}}}}}' has no declaration"));
        }
    }

    result
}

/// Derive the definitions to store when a template's content is saved.
///
/// One definition per detected tag, in detection order. Existing definitions
/// are kept verbatim for keys that are still used; new tags get a default
/// optional `string` definition; definitions for vanished tags are dropped.
pub fn sync_definitions(
    body: &str,
    existing: &[VariableDefinition],
) -> Vec<VariableDefinition> {
    let mut by_key: HashMap<&str, &VariableDefinition> = HashMap::new();
    for def in existing {
        by_key.entry(def.key.as_str()).or_insert(def);
    }

    detect_tags(body)
        .into_iter()
        .map(|key| match by_key.get(key.as_str()) {
            Some(def) => (*def).clone(),
            None => VariableDefinition::new(key),
        })
        .collect()
}
