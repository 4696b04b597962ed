//! Render a stored template by name.

use serde::Serialize;
use tracing::debug;

use crate::error::RenderError;
use crate::vars::value::VarValues;

use super::engine::Renderer;
use super::repository::TemplateRepository;

/// A rendered email: subject (when the template declares one) and HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub template_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub html: String,
}

/// Look up `name` in the store and render it with `values`.
///
/// The subject and body share the same values and metadata. A missing
/// template becomes `TemplateNotFound`; any other store failure is wrapped as
/// `DatabaseConnection`.
pub fn render_template(
    repo: &TemplateRepository,
    renderer: &Renderer,
    name: &str,
    values: &VarValues,
) -> Result<RenderedEmail, RenderError> {
    let template = repo.get_by_name(name)?;
    debug!("rendering template '{}' from {}", name, template.path.display());

    let subject = template
        .subject
        .as_deref()
        .map(|s| renderer.render(s, values, &template.definitions))
        .transpose()?;
    let html = renderer.render(&template.body, values, &template.definitions)?;

    Ok(RenderedEmail { template_name: template.logical_name, subject, html })
}
