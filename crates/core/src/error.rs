//! Error taxonomy shared by rendering and template lookup.

use serde::Serialize;
use thiserror::Error;

use crate::vars::types::VariableType;

/// The closed set of failures a render request can end in.
///
/// Each variant keeps its structured context so callers can map it to a
/// response without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No template with this name exists in the store.
    #[error("template not found: {template_name}")]
    TemplateNotFound { template_name: String },

    /// A provided value does not match the declared variable type.
    #[error(
        "invalid type for variable '{variable_name}': expected {expected_type}, got {provided_type}"
    )]
    TemplateVariableType {
        variable_name: String,
        expected_type: VariableType,
        provided_type: String,
    },

    /// A required variable received neither a value nor a fallback.
    #[error("missing required variable: {variable_name}")]
    RequiredVariableMissing { variable_name: String },

    /// The template store failed, or an unexpected error was wrapped.
    #[error("database connection error: {details}")]
    DatabaseConnection { details: String },
}

impl RenderError {
    /// Wrap an unexpected error so its internal shape does not leak.
    pub fn wrap_unexpected(err: impl std::fmt::Display) -> Self {
        RenderError::DatabaseConnection { details: err.to_string() }
    }

    /// Taxonomy name of this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::TemplateNotFound { .. } => "TemplateNotFoundError",
            RenderError::TemplateVariableType { .. } => "TemplateVariableTypeError",
            RenderError::RequiredVariableMissing { .. } => "RequiredVariableMissingError",
            RenderError::DatabaseConnection { .. } => "DatabaseConnectionError",
        }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RenderError::TemplateVariableType { .. }
            | RenderError::RequiredVariableMissing { .. } => 400,
            RenderError::TemplateNotFound { .. } => 404,
            RenderError::DatabaseConnection { .. } => 500,
        }
    }

    /// Structured payload for JSON responses.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let mut body = ErrorBody {
            error: self.kind(),
            status: self.status_code(),
            template_name: None,
            variable_name: None,
            expected_type: None,
            provided_type: None,
            details: None,
        };
        match self {
            RenderError::TemplateNotFound { template_name } => {
                body.template_name = Some(template_name.clone());
            }
            RenderError::TemplateVariableType { variable_name, expected_type, provided_type } => {
                body.variable_name = Some(variable_name.clone());
                body.expected_type = Some(*expected_type);
                body.provided_type = Some(provided_type.clone());
            }
            RenderError::RequiredVariableMissing { variable_name } => {
                body.variable_name = Some(variable_name.clone());
            }
            RenderError::DatabaseConnection { details } => {
                body.details = Some(details.clone());
            }
        }
        body
    }
}

/// JSON shape of a [`RenderError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: &'static str,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<VariableType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
