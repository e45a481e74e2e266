//! GitHub-flavored markdown renderer.
//!
//! One section per structure: an HTML anchor so field types can link to
//! it, a heading, the structure doc and a column-aligned field table.

use crate::config::{Config, Headers};
use crate::error::Result;
use crate::links::LinkTable;
use crate::model::*;
use crate::render::Renderer;
use std::collections::HashSet;

pub struct MarkdownRenderer {
    title: String,
    headers: Headers,
    links: LinkTable,
}

impl MarkdownRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            headers: config.headers.clone(),
            links: LinkTable::with_overrides(&config.links),
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, structures: &[DocumentedStructure]) -> Result<String> {
        let documented: HashSet<&str> = structures.iter().map(|s| s.name.as_str()).collect();
        let mut lines: Vec<String> = Vec::new();

        if !self.title.is_empty() {
            lines.push(format!("# {}\n", self.title));
        }

        for structure in structures {
            lines.push(format!("<a name='{}'></a>\n", structure.name));
            lines.push(format!("## {}\n", structure.name));
            if !structure.doc.is_empty() {
                lines.push(structure.doc.clone());
                lines.push(String::new());
            }
            if !structure.fields.is_empty() {
                lines.extend(self.render_table(&structure.fields, &documented));
                lines.push(String::new());
            }
        }

        let mut out = lines.join("\n");
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

impl MarkdownRenderer {
    /// Render the field table with every column padded to its widest cell.
    fn render_table(&self, fields: &[DocumentedField], documented: &HashSet<&str>) -> Vec<String> {
        let header = [
            self.headers.name.clone(),
            self.headers.doc.clone(),
            self.headers.type_.clone(),
            self.headers.mandatory.clone(),
        ];
        let rows: Vec<[String; 4]> = fields
            .iter()
            .map(|field| {
                let reference = self.links.resolve(&field.ty, documented);
                [
                    escape_cell(&field.name),
                    escape_cell(&field.doc),
                    reference.decorate(&escape_cell(&field.ty.name)),
                    field.mandatory.to_string(),
                ]
            })
            .collect();

        let mut widths = header.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(table_row(&header, &widths));
        let dashes = widths.map(|w| "-".repeat(w));
        lines.push(table_row(&dashes, &widths));
        for row in &rows {
            lines.push(table_row(row, &widths));
        }
        lines
    }
}

fn table_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| right_pad(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn right_pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Make text safe inside a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br />")
}
