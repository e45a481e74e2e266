//! JSON renderer: structured output for tooling integration.
//!
//! Each structure becomes `{name, description, items}` and each field
//! `{field, description, schema, required}`, indented with tabs.

use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonType<'a> {
    name: &'a str,
    description: &'a str,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    field: &'a str,
    description: &'a str,
    schema: &'a str,
    required: bool,
}

impl<'a> From<&'a DocumentedStructure> for JsonType<'a> {
    fn from(structure: &'a DocumentedStructure) -> Self {
        Self {
            name: &structure.name,
            description: &structure.doc,
            items: structure
                .fields
                .iter()
                .map(|field| JsonItem {
                    field: &field.name,
                    description: &field.doc,
                    schema: &field.ty.name,
                    required: field.mandatory,
                })
                .collect(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, structures: &[DocumentedStructure]) -> Result<String> {
        let types: Vec<JsonType> = structures.iter().map(JsonType::from).collect();

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        types.serialize(&mut serializer)?;
        out.push(b'\n');

        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
