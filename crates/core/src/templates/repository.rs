//! Filesystem-backed template store: lookup, validation and save.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::templates::discovery::{
    TemplateDiscoveryError, TemplateInfo, discover_templates, is_valid_logical_name,
    template_path,
};
use crate::templates::frontmatter::{self, FrontmatterParseError, TemplateFrontmatter};
use crate::vars::definition::{DefinitionError, sync_definitions, validate_definitions};
use crate::vars::types::VariableDefinition;

#[derive(Debug, Error)]
pub enum TemplateRepoError {
    #[error(transparent)]
    Discovery(#[from] TemplateDiscoveryError),

    #[error("template not found: {0}")]
    NotFound(String),

    #[error("invalid template name '{0}': use '/'-separated segments without '.' or '..'")]
    InvalidName(String),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse frontmatter in {path}: {source}")]
    FrontmatterParse {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },

    #[error("invalid variable definitions in template '{name}': {}", format_errors(.errors))]
    InvalidDefinitions { name: String, errors: Vec<DefinitionError> },
}

fn format_errors(errors: &[DefinitionError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl From<TemplateRepoError> for RenderError {
    fn from(err: TemplateRepoError) -> Self {
        match err {
            TemplateRepoError::NotFound(name) => {
                RenderError::TemplateNotFound { template_name: name }
            }
            other => RenderError::wrap_unexpected(other),
        }
    }
}

/// A template read from the store.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub logical_name: String,
    pub path: PathBuf,
    /// Subject line from frontmatter, if any.
    pub subject: Option<String>,
    /// Declared variables, already validated.
    pub definitions: Vec<VariableDefinition>,
    /// HTML body (excludes frontmatter).
    pub body: String,
}

/// Filesystem-backed template store.
pub struct TemplateRepository {
    pub root: PathBuf,
    pub templates: Vec<TemplateInfo>,
}

impl TemplateRepository {
    pub fn new(root: &Path) -> Result<Self, TemplateDiscoveryError> {
        let templates = discover_templates(root)?;
        debug!("discovered {} templates under {}", templates.len(), root.display());
        Ok(Self { root: root.to_path_buf(), templates })
    }

    pub fn list_all(&self) -> &[TemplateInfo] {
        &self.templates
    }

    pub fn get_by_name(&self, name: &str) -> Result<LoadedTemplate, TemplateRepoError> {
        let info = self
            .templates
            .iter()
            .find(|t| t.logical_name == name)
            .ok_or_else(|| TemplateRepoError::NotFound(name.to_string()))?;

        let loaded = Self::read(info)?;

        let errors = validate_definitions(&loaded.definitions);
        if !errors.is_empty() {
            warn!("template '{}' has {} invalid definitions", name, errors.len());
            return Err(TemplateRepoError::InvalidDefinitions { name: name.to_string(), errors });
        }

        Ok(loaded)
    }

    /// Read a template without validating its definitions.
    pub fn read_unchecked(&self, name: &str) -> Result<LoadedTemplate, TemplateRepoError> {
        let info = self
            .templates
            .iter()
            .find(|t| t.logical_name == name)
            .ok_or_else(|| TemplateRepoError::NotFound(name.to_string()))?;
        Self::read(info)
    }

    /// Store a template's content, re-deriving its variable definitions.
    ///
    /// Definitions are replaced wholesale: existing declarations are kept for
    /// tags the new body still uses, new tags get defaults, and declarations
    /// for removed tags are dropped.
    pub fn save(
        &mut self,
        name: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<LoadedTemplate, TemplateRepoError> {
        if !is_valid_logical_name(name) {
            return Err(TemplateRepoError::InvalidName(name.to_string()));
        }

        // Existing templates are rewritten in place, keeping their extension
        let (path, existing) = match self.read_unchecked(name) {
            Ok(t) => (t.path, t.definitions),
            Err(TemplateRepoError::NotFound(_)) => (template_path(&self.root, name), Vec::new()),
            Err(e) => return Err(e),
        };

        // Tags in the subject count as used too
        let scanned = match subject {
            Some(s) => format!("{s}\n{body}"),
            None => body.to_string(),
        };
        let definitions = sync_definitions(&scanned, &existing);

        let fm = TemplateFrontmatter {
            subject: subject.map(ToOwned::to_owned),
            variables: definitions.clone(),
        };

        let content = frontmatter::serialize(&fm, body).map_err(|e| {
            TemplateRepoError::FrontmatterParse { path: path.clone(), source: e }
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TemplateRepoError::Io { path: parent.to_path_buf(), source: e })?;
        }
        fs::write(&path, content)
            .map_err(|e| TemplateRepoError::Io { path: path.clone(), source: e })?;

        debug!("saved template '{}' with {} definitions", name, definitions.len());

        self.templates = discover_templates(&self.root)?;

        Ok(LoadedTemplate {
            logical_name: name.to_string(),
            path,
            subject: subject.map(ToOwned::to_owned),
            definitions,
            body: body.to_string(),
        })
    }

    fn read(info: &TemplateInfo) -> Result<LoadedTemplate, TemplateRepoError> {
        let content = fs::read_to_string(&info.path)
            .map_err(|e| TemplateRepoError::Io { path: info.path.clone(), source: e })?;

        let (fm, body) = frontmatter::parse(&content).map_err(|e| {
            TemplateRepoError::FrontmatterParse { path: info.path.clone(), source: e }
        })?;

        Ok(LoadedTemplate {
            logical_name: info.logical_name.clone(),
            path: info.path.clone(),
            subject: fm.subject,
            definitions: fm.variables,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_template_not_found() {
        let err: RenderError = TemplateRepoError::NotFound("welcome".into()).into();
        assert_eq!(err, RenderError::TemplateNotFound { template_name: "welcome".into() });
    }

    #[test]
    fn test_other_errors_map_to_database_connection() {
        let err: RenderError = TemplateRepoError::Io {
            path: PathBuf::from("/tpl/welcome.html"),
            source: std::io::Error::other("permission denied"),
        }
        .into();
        assert_eq!(err.kind(), "DatabaseConnectionError");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_invalid_name_is_unexpected_for_render() {
        let err: RenderError = TemplateRepoError::InvalidName("../x".into()).into();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_invalid_definitions_message() {
        let err = TemplateRepoError::InvalidDefinitions {
            name: "welcome".into(),
            errors: vec![
                DefinitionError::InvalidKey { key: "name".into() },
                DefinitionError::DuplicateKey { key: "CODE".into() },
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid variable definitions in template 'welcome': invalid variable key 'name': \
             must match ^[A-Z_][A-Z0-9_]*$; variable 'CODE' is declared more than once"
        );
    }
}
