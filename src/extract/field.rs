//! Field classification: serialized name, requiredness, inlining and type.

use crate::doc;
use crate::model::*;
use crate::tag::{JsonTag, StructTag};

/// What a raw struct field contributes to its structure's documentation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldClass {
    /// A regular documented field.
    Field(DocumentedField),
    /// `json:",inline"`: the fields of the target type are flattened in.
    Inline(TypeInfo),
    /// `json:"-"`: not serialized, not documented.
    Excluded,
}

/// Classify one raw field.
pub fn classify(field: &RawField) -> FieldClass {
    let tag = field.tag.as_deref().and_then(parse_tag);
    let json = tag.as_ref().and_then(StructTag::json);
    let ty = field_type(&field.ty);

    if json.as_ref().is_some_and(JsonTag::is_inline) {
        return FieldClass::Inline(ty);
    }

    let name = json
        .as_ref()
        .and_then(|j| j.name.clone())
        .or_else(|| field.names.first().cloned())
        .unwrap_or_else(|| embedded_name(&field.ty));

    if name == "-" {
        return FieldClass::Excluded;
    }

    // No tag, or a tag without omitempty, means the field is required
    let mandatory = !json.as_ref().is_some_and(JsonTag::omits_empty);

    FieldClass::Field(DocumentedField {
        name,
        ty,
        doc: doc::normalize(&field.doc),
        mandatory,
    })
}

/// Malformed tags degrade to "no tag".
fn parse_tag(raw: &str) -> Option<StructTag> {
    match StructTag::parse(raw) {
        Ok(tag) => Some(tag),
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed struct tag");
            None
        }
    }
}

/// The implicit name of an embedded field: its type name without `*` or
/// package qualifier.
pub fn embedded_name(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Identifier(name) => name.clone(),
        TypeExpr::Qualified { name, .. } => name.clone(),
        TypeExpr::Pointer(inner) => embedded_name(inner),
        _ => String::new(),
    }
}

/// Resolve a type expression into its rendered form and base type.
///
/// Unsupported shapes, and constructors wrapping them, give the empty type.
pub fn field_type(ty: &TypeExpr) -> TypeInfo {
    match ty {
        TypeExpr::Identifier(name) => TypeInfo {
            name: name.clone(),
            base_type: name.clone(),
            constructor: Constructor::None,
            internal: true,
        },
        TypeExpr::Qualified { package, name } => {
            let qualified = format!("{}.{}", package, name);
            TypeInfo {
                name: qualified.clone(),
                base_type: qualified,
                constructor: Constructor::None,
                internal: false,
            }
        }
        TypeExpr::Pointer(inner) => wrap(field_type(inner), "*", Constructor::Pointer),
        TypeExpr::Array(elem) => wrap(field_type(elem), "[]", Constructor::Slice),
        TypeExpr::Map { key, value } => {
            // Keys serialize as strings; only the value type is tracked
            let key = field_type(key);
            let key_name = if key.is_empty() { "string" } else { key.name.as_str() };
            let prefix = format!("map[{}]", key_name);
            wrap(field_type(value), &prefix, Constructor::Map)
        }
        TypeExpr::Unsupported => TypeInfo::empty(),
    }
}

fn wrap(inner: TypeInfo, prefix: &str, constructor: Constructor) -> TypeInfo {
    if inner.is_empty() {
        return TypeInfo::empty();
    }
    TypeInfo {
        name: format!("{}{}", prefix, inner.name),
        constructor,
        ..inner
    }
}
