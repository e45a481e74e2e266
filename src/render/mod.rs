//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::config::Config;
use crate::error::{DocgenError, Result};
use crate::model::DocumentedStructure;

/// Trait for rendering the documentation model into a specific output format.
pub trait Renderer {
    fn render(&self, structures: &[DocumentedStructure]) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, config: &Config) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer::new(config))),
        _ => Err(DocgenError::UnsupportedOutputFormat(format.to_string())),
    }
}
