//! YAML frontmatter carried at the top of stored template files.
//!
//! ```html
//! ---
//! subject: "Your order {{ORDER_ID}}"
//! variables:
//!   - key: ORDER_ID
//!     isRequired: true
//! ---
//! <p>Order {{ORDER_ID}} is on its way.</p>
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vars::types::VariableDefinition;

#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Template metadata stored in frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateFrontmatter {
    /// Email subject line; may contain merge tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableDefinition>,
}

/// Split a template file into its frontmatter and body.
///
/// Files without a leading `---` block, or with an unterminated one, are all
/// body.
pub fn parse(content: &str) -> Result<(TemplateFrontmatter, String), FrontmatterParseError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((TemplateFrontmatter::default(), content.to_string()));
    }

    let after_first = &trimmed[3..];

    // Skip the newline after opening ---
    let after_newline = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
        .unwrap_or(after_first);

    let Some(end_pos) = find_closing_delimiter(after_newline) else {
        return Ok((TemplateFrontmatter::default(), content.to_string()));
    };

    let yaml_content = &after_newline[..end_pos];

    // Body starts after the closing --- and its newline
    let after_closing = &after_newline[end_pos + 3..];
    let body = after_closing
        .strip_prefix('\n')
        .or_else(|| after_closing.strip_prefix("\r\n"))
        .unwrap_or(after_closing)
        .to_string();

    let frontmatter = if yaml_content.trim().is_empty() {
        TemplateFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)?
    };

    Ok((frontmatter, body))
}

/// Serialize a template back into its stored file form.
pub fn serialize(
    frontmatter: &TemplateFrontmatter,
    body: &str,
) -> Result<String, FrontmatterParseError> {
    if *frontmatter == TemplateFrontmatter::default() {
        return Ok(body.to_string());
    }
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{yaml}---\n{body}"))
}

/// Byte position of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}
