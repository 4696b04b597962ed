//! Per-tag resolution: decides what replaces one merge tag.

use crate::error::RenderError;
use crate::vars::typecheck::{format_value, validate_type};
use crate::vars::types::{VariableDefinition, VariableType};
use crate::vars::value::VariableValue;

/// Outcome of resolving one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Substitute this text for the tag.
    Replace(String),
    /// Leave the original `{{KEY}}` in place.
    Keep,
}

/// Resolve one tag key.
///
/// Precedence, in order:
/// 1. a provided non-null value, type checked when the key is declared
/// 2. the declared fallback, used verbatim
/// 3. a required declaration fails with `RequiredVariableMissing`
/// 4. otherwise the tag is kept
pub fn resolve(
    key: &str,
    definition: Option<&VariableDefinition>,
    value: Option<&VariableValue>,
    date_format: &str,
) -> Result<Resolution, RenderError> {
    if let Some(value) = value.filter(|v| !v.is_null()) {
        let var_type = definition.map_or(VariableType::String, |d| d.var_type);
        if definition.is_some() && !validate_type(value, var_type) {
            return Err(RenderError::TemplateVariableType {
                variable_name: key.to_string(),
                expected_type: var_type,
                provided_type: value.type_name().to_string(),
            });
        }
        return Ok(Resolution::Replace(format_value(value, var_type, date_format)));
    }

    let Some(def) = definition else {
        return Ok(Resolution::Keep);
    };

    // Fallbacks are trusted as stored; they are not checked against the type
    if let Some(fallback) = &def.fallback_value {
        return Ok(Resolution::Replace(fallback.clone()));
    }

    if def.is_required {
        return Err(RenderError::RequiredVariableMissing { variable_name: key.to_string() });
    }

    Ok(Resolution::Keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::typecheck::DEFAULT_DATE_FORMAT;

    fn run(
        def: Option<&VariableDefinition>,
        value: Option<&VariableValue>,
    ) -> Result<Resolution, RenderError> {
        resolve("KEY", def, value, DEFAULT_DATE_FORMAT)
    }

    #[test]
    fn test_value_wins_over_fallback() {
        let def = VariableDefinition::new("KEY").with_fallback("fb");
        let value = VariableValue::from("given");
        assert_eq!(run(Some(&def), Some(&value)), Ok(Resolution::Replace("given".into())));
    }

    #[test]
    fn test_null_value_falls_through_to_fallback() {
        let def = VariableDefinition::new("KEY").with_fallback("fb");
        assert_eq!(
            run(Some(&def), Some(&VariableValue::Null)),
            Ok(Resolution::Replace("fb".into()))
        );
    }

    #[test]
    fn test_fallback_not_type_checked() {
        let def = VariableDefinition::new("KEY")
            .with_type(VariableType::Number)
            .with_fallback("not a number");
        assert_eq!(run(Some(&def), None), Ok(Resolution::Replace("not a number".into())));
    }

    #[test]
    fn test_required_missing() {
        let def = VariableDefinition::new("KEY").required();
        assert_eq!(
            run(Some(&def), None),
            Err(RenderError::RequiredVariableMissing { variable_name: "KEY".into() })
        );
    }

    #[test]
    fn test_required_satisfied_by_value() {
        let def = VariableDefinition::new("KEY").required();
        let value = VariableValue::from("x");
        assert_eq!(run(Some(&def), Some(&value)), Ok(Resolution::Replace("x".into())));
    }

    #[test]
    fn test_optional_without_fallback_is_kept() {
        let def = VariableDefinition::new("KEY");
        assert_eq!(run(Some(&def), None), Ok(Resolution::Keep));
        assert_eq!(run(None, None), Ok(Resolution::Keep));
    }

    #[test]
    fn test_type_mismatch_reports_context() {
        let def = VariableDefinition::new("KEY").with_type(VariableType::Boolean);
        let value = VariableValue::from("true");
        assert_eq!(
            run(Some(&def), Some(&value)),
            Err(RenderError::TemplateVariableType {
                variable_name: "KEY".into(),
                expected_type: VariableType::Boolean,
                provided_type: "string".into(),
            })
        );
    }

    #[test]
    fn test_undeclared_value_is_not_type_checked() {
        let value = VariableValue::from(42);
        assert_eq!(run(None, Some(&value)), Ok(Resolution::Replace("42".into())));
    }
}
