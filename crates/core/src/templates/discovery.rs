//! Template file discovery and logical-name mapping.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub logical_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum TemplateDiscoveryError {
    #[error("templates directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to read templates directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// Find every template under `root`, sorted by logical name.
///
/// A template is any `*.html` or `*.htm` file. Its logical name is the path
/// relative to `root` without the extension, `/`-separated.
pub fn discover_templates(root: &Path) -> Result<Vec<TemplateInfo>, TemplateDiscoveryError> {
    if !root.is_dir() {
        return Err(TemplateDiscoveryError::MissingDir(root.display().to_string()));
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry
            .map_err(|e| TemplateDiscoveryError::WalkError(root.display().to_string(), e))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_template_file(path) {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else { continue };
        out.push(TemplateInfo {
            logical_name: logical_name_from_relative(rel),
            path: path.to_path_buf(),
        });
    }

    out.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
    Ok(out)
}

/// Whether `name` is a usable logical name.
///
/// Names are relative and `/`-separated; empty, `.` and `..` segments are
/// rejected so a name can never point outside the store root.
pub fn is_valid_logical_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && name.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}

/// Path of the file a new template with `logical_name` lives in.
pub fn template_path(root: &Path, logical_name: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut parts = logical_name.split('/').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            path.push(part);
        } else {
            path.push(format!("{part}.html"));
        }
    }
    path
}

fn is_template_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("html") | Some("htm")
    )
}

fn logical_name_from_relative(rel: &Path) -> String {
    let stem = rel.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_name_nested() {
        assert_eq!(logical_name_from_relative(Path::new("orders/shipped.html")), "orders/shipped");
        assert_eq!(logical_name_from_relative(Path::new("welcome.htm")), "welcome");
    }

    #[test]
    fn test_is_valid_logical_name() {
        assert!(is_valid_logical_name("welcome"));
        assert!(is_valid_logical_name("orders/shipped"));
        assert!(is_valid_logical_name("v1.2/notice"));
        assert!(!is_valid_logical_name(""));
        assert!(!is_valid_logical_name("/etc/passwd"));
        assert!(!is_valid_logical_name("../escaped"));
        assert!(!is_valid_logical_name("orders/../../x"));
        assert!(!is_valid_logical_name("./welcome"));
        assert!(!is_valid_logical_name("orders//shipped"));
        assert!(!is_valid_logical_name("orders/"));
        assert!(!is_valid_logical_name("a\\..\\b"));
    }

    #[test]
    fn test_is_template_file() {
        assert!(is_template_file(Path::new("a/welcome.html")));
        assert!(is_template_file(Path::new("legacy.htm")));
        assert!(!is_template_file(Path::new("notes.md")));
        assert!(!is_template_file(Path::new(".draft.html")));
        assert!(!is_template_file(Path::new("design.json")));
    }

    #[test]
    fn test_template_path() {
        let p = template_path(Path::new("/tpl"), "orders/shipped");
        assert_eq!(p, Path::new("/tpl/orders/shipped.html"));
    }
}
