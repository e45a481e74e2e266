//! Data model for extracted API documentation: format-agnostic.
//!
//! Two layers live here: the raw declarations produced by the Go source
//! parser, and the normalized documentation model the renderers consume.

// -- Parser output ------------------------------------------------------------

/// A named `type` declaration as reported by the source parser.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDeclaration {
    pub name: String,
    /// Comment text attached to the declaration, markers already stripped.
    pub doc: String,
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// `type Foo struct { ... }` with its fields in declaration order.
    Struct(Vec<RawField>),
    /// Aliases, interfaces, named scalars and everything else.
    Other,
}

/// A struct member before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    /// Declared names; empty for embedded fields.
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Tag content without the surrounding quotes.
    pub tag: Option<String>,
    pub doc: String,
}

/// Shape of a field's type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `Foo`, `string`
    Identifier(String),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// `[]T` and `[N]T`
    Array(Box<TypeExpr>),
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// Interfaces, channels, funcs, anonymous structs, generic instances.
    Unsupported,
}

// -- Documentation model ------------------------------------------------------

/// One documented struct type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentedStructure {
    pub name: String,
    pub doc: String,
    pub fields: Vec<DocumentedField>,
}

/// One serialized field of a documented struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentedField {
    /// JSON name of the field.
    pub name: String,
    pub ty: TypeInfo,
    pub doc: String,
    /// False when the tag carries `omitempty`.
    pub mandatory: bool,
}

/// Outermost type constructor of a field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Constructor {
    #[default]
    None,
    Pointer,
    Slice,
    Map,
}

/// Rendered type of a field plus the named type it is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeInfo {
    /// Full type string, e.g. `*Foo`, `[]Bar`, `map[string]Baz`.
    pub name: String,
    /// Innermost named type, e.g. `Foo`, `metav1.Time`.
    pub base_type: String,
    pub constructor: Constructor,
    /// True when the base type carries no package qualifier.
    pub internal: bool,
}

impl TypeInfo {
    /// The zero value, used for type shapes the extractor does not model.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
