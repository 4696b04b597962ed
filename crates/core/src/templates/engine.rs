//! Merge-tag substitution over a whole document.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::RenderError;
use crate::vars::typecheck::DEFAULT_DATE_FORMAT;
use crate::vars::types::VariableDefinition;
use crate::vars::value::VarValues;

use super::detector::TAG_RE;
use super::resolver::{Resolution, resolve};

/// Options that affect how values are formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// strftime format for `date` variables.
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string() }
    }
}

/// Merge-tag substitution engine.
///
/// Holds only formatting options; every call works on its own arguments, so
/// one renderer can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace every merge tag in `document`.
    ///
    /// All occurrences are processed left to right; the first resolution
    /// error aborts the call. Unresolved optional tags stay as written.
    pub fn render(
        &self,
        document: &str,
        values: &VarValues,
        definitions: &[VariableDefinition],
    ) -> Result<String, RenderError> {
        debug!(
            "rendering document ({} bytes, {} values, {} definitions)",
            document.len(),
            values.len(),
            definitions.len()
        );

        // First declaration of a key wins
        let mut by_key: HashMap<&str, &VariableDefinition> = HashMap::new();
        for def in definitions {
            by_key.entry(def.key.as_str()).or_insert(def);
        }

        let mut out = String::with_capacity(document.len());
        let mut last = 0;

        for cap in TAG_RE.captures_iter(document) {
            let Some(whole) = cap.get(0) else { continue };
            let key = &cap[1];

            out.push_str(&document[last..whole.start()]);

            match resolve(
                key,
                by_key.get(key).copied(),
                values.get(key),
                &self.options.date_format,
            )? {
                Resolution::Replace(text) => {
                    trace!("resolved {{{{{}}}}}", key);
                    out.push_str(&text);
                }
                Resolution::Keep => {
                    trace!("left {{{{{}}}}} unresolved", key);
                    out.push_str(whole.as_str());
                }
            }

            last = whole.end();
        }

        out.push_str(&document[last..]);
        Ok(out)
    }
}

/// Render with default options.
///
/// Shorthand for `Renderer::default().render(...)`.
pub fn render(
    document: &str,
    values: &VarValues,
    definitions: &[VariableDefinition],
) -> Result<String, RenderError> {
    Renderer::default().render(document, values, definitions)
}
