//! Merge-tag templates: detection, resolution, substitution and storage.

pub mod detector;
pub mod discovery;
pub mod engine;
pub mod frontmatter;
pub mod repository;
pub mod resolver;
pub mod service;

pub use detector::detect_tags;
pub use engine::{RenderOptions, Renderer, render};
pub use repository::{LoadedTemplate, TemplateRepoError, TemplateRepository};
pub use resolver::{Resolution, resolve};
pub use service::{RenderedEmail, render_template};
