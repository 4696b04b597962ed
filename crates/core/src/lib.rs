//! Typed merge-tag rendering for HTML email templates.
//!
//! Templates contain `{{KEY}}` placeholders. At send time a caller supplies
//! values; each tag is replaced by its type-checked value, its declared
//! fallback, or left in place, and missing required variables fail the render.
//!
//! ```
//! use mergetag_core::templates::render;
//! use mergetag_core::vars::{VarValues, VariableDefinition, VariableValue};
//!
//! let defs = [VariableDefinition::new("CODE").with_fallback("WELCOME10")];
//! let html = render("<p>{{CODE}}</p>", &VarValues::new(), &defs).unwrap();
//! assert_eq!(html, "<p>WELCOME10</p>");
//!
//! let mut values = VarValues::new();
//! values.insert("CODE".into(), VariableValue::from("SPRING5"));
//! assert_eq!(render("<p>{{CODE}}</p>", &values, &defs).unwrap(), "<p>SPRING5</p>");
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod templates;
pub mod vars;

pub use error::{ErrorBody, RenderError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
