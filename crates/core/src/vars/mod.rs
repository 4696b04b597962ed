//! Merge-tag variables: declared types, provided values, and validation.
//!
//! - [`types`] defines the closed [`VariableType`] set and [`VariableDefinition`]
//! - [`value`] holds the runtime values callers supply at render time
//! - [`typecheck`] validates and formats provided values per declared type
//! - [`definition`] validates stored definitions and re-derives them on save

pub mod definition;
pub mod typecheck;
pub mod types;
pub mod value;

pub use definition::{
    DefinitionError, ValidationResult, check_template, sync_definitions, validate_definition,
    validate_definitions,
};
pub use typecheck::{DEFAULT_DATE_FORMAT, format_value, parse_date, validate_type};
pub use types::{VariableDefinition, VariableType, is_valid_key};
pub use value::{VarValues, VariableValue};
