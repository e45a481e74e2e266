//! Type extraction: turns parsed declarations into documented structures.
//!
//! Structures are processed in declaration order. Each finished structure
//! is remembered so that later `json:",inline"` fields referencing it can
//! splice its fields in place.

pub mod field;

use crate::doc;
use crate::model::*;
use field::FieldClass;
use std::borrow::Cow;
use std::collections::HashMap;

/// Knobs for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Also document unexported types and fields.
    pub include_unexported: bool,
}

/// Build the documentation model for every struct declaration.
///
/// The first declaration of a name wins; later duplicates are skipped.
pub fn extract(declarations: &[SourceDeclaration], options: &ExtractOptions) -> Vec<DocumentedStructure> {
    let mut ctx = ExtractContext::new(options);
    let mut structures = Vec::new();

    for decl in declarations {
        let DeclarationKind::Struct(fields) = &decl.kind else {
            continue;
        };
        if !options.include_unexported && !is_exported(&decl.name) {
            tracing::trace!(name = %decl.name, "skipping unexported type");
            continue;
        }
        if ctx.documented.contains_key(&decl.name) {
            tracing::warn!(name = %decl.name, "duplicate type declaration, keeping the first one");
            continue;
        }

        let structure = ctx.extract_struct(decl, fields);
        ctx.documented
            .insert(structure.name.clone(), structure.fields.clone());
        structures.push(structure);
    }

    structures
}

/// Per-run state: fields of the structures extracted so far.
struct ExtractContext<'o> {
    options: &'o ExtractOptions,
    documented: HashMap<String, Vec<DocumentedField>>,
}

impl<'o> ExtractContext<'o> {
    fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            documented: HashMap::new(),
        }
    }

    fn extract_struct(&self, decl: &SourceDeclaration, raw_fields: &[RawField]) -> DocumentedStructure {
        let mut fields = Vec::new();

        for raw in raw_fields {
            let Some(raw) = self.visible(raw) else {
                continue;
            };
            match field::classify(&raw) {
                FieldClass::Field(documented) => fields.push(documented),
                FieldClass::Excluded => {}
                FieldClass::Inline(target) => self.splice(&decl.name, &target, &mut fields),
            }
        }

        DocumentedStructure {
            name: decl.name.clone(),
            doc: doc::normalize(&decl.doc),
            fields,
        }
    }

    /// Append the fields of an inlined type documented earlier in the run.
    /// External and not-yet-documented targets contribute nothing.
    fn splice(&self, owner: &str, target: &TypeInfo, fields: &mut Vec<DocumentedField>) {
        if !target.internal {
            tracing::debug!(owner, target = %target.name, "not inlining external type");
            return;
        }
        match self.documented.get(&target.base_type) {
            Some(inlined) => fields.extend(inlined.iter().cloned()),
            None => {
                tracing::debug!(owner, target = %target.base_type, "inline target is not documented");
            }
        }
    }

    /// Apply exported-only filtering to a field.
    ///
    /// Named fields keep their exported names; embedded fields are kept
    /// when their type name is exported.
    fn visible<'f>(&self, raw: &'f RawField) -> Option<Cow<'f, RawField>> {
        if self.options.include_unexported {
            return Some(Cow::Borrowed(raw));
        }
        if raw.names.is_empty() {
            return is_exported(&field::embedded_name(&raw.ty)).then_some(Cow::Borrowed(raw));
        }
        if raw.names.iter().all(|n| is_exported(n)) {
            return Some(Cow::Borrowed(raw));
        }
        let names: Vec<String> = raw.names.iter().filter(|n| is_exported(n)).cloned().collect();
        if names.is_empty() {
            return None;
        }
        Some(Cow::Owned(RawField {
            names,
            ..raw.clone()
        }))
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
