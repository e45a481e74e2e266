//! Go source parser.
//!
//! Walks a tree-sitter syntax tree and reports every `type` declaration:
//! - the comment group directly above a declaration or field → its doc
//! - `type Foo struct { ... }` → struct fields with names, type and tag
//! - aliases, interfaces and named scalars → `DeclarationKind::Other`

use crate::error::{DocgenError, Result};
use crate::model::*;
use crate::tag;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser, Tree};

/// Tool directives such as `//go:generate` or `//nolint:lll` never belong to docs.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z0-9]+:[a-z0-9]|line |extern |export )").unwrap());

/// Create a parser loaded with the Go grammar.
pub fn new_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    Ok(parser)
}

/// Parse one Go file into its type declarations, in source order.
pub fn parse(parser: &mut Parser, content: &str, path: &Path) -> Result<Vec<SourceDeclaration>> {
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| DocgenError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;
    check_syntax(&tree, path)?;

    let ctx = ExtractContext::new(content);
    Ok(ctx.declarations(tree.root_node()))
}

/// Fail on the first ERROR or MISSING node.
fn check_syntax(tree: &Tree, path: &Path) -> Result<()> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }
    let node = first_error(root).unwrap_or(root);
    let pos = node.start_position();
    Err(DocgenError::Syntax {
        path: path.to_path_buf(),
        line: pos.row + 1,
        column: pos.column + 1,
    })
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

/// Comments collected while scanning siblings, waiting for the next node.
#[derive(Default)]
struct PendingComments<'t> {
    group: Vec<Node<'t>>,
    /// Last row of the previous non-comment sibling.
    code_end_row: Option<usize>,
}

impl<'t> PendingComments<'t> {
    fn push(&mut self, comment: Node<'t>) {
        let start = comment.start_position().row;
        if self.code_end_row == Some(start) {
            // Trailing comment of the previous line; not a lead comment
            self.group.clear();
            return;
        }
        let adjacent = self
            .group
            .last()
            .is_some_and(|last| last.end_position().row + 1 >= start);
        if !adjacent {
            self.group.clear();
        }
        self.group.push(comment);
    }

    /// Take the group if it ends on the line right above `node`.
    fn take_for(&mut self, node: Node<'t>) -> Vec<Node<'t>> {
        let group = std::mem::take(&mut self.group);
        self.code_end_row = Some(node.end_position().row);
        match group.last() {
            Some(last) if last.end_position().row + 1 == node.start_position().row => group,
            _ => Vec::new(),
        }
    }

    fn skip(&mut self, node: Node<'t>) {
        self.group.clear();
        // A `\n` terminator ends on the following row
        let row = if node.is_named() {
            node.end_position().row
        } else {
            node.start_position().row
        };
        self.code_end_row = Some(row);
    }
}

struct ExtractContext<'a> {
    source: &'a str,
}

impl<'a> ExtractContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn declarations(&self, root: Node) -> Vec<SourceDeclaration> {
        let mut out = Vec::new();
        let mut pending = PendingComments::default();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            match child.kind() {
                "comment" => pending.push(child),
                "type_declaration" => {
                    let doc = self.comment_text(&pending.take_for(child));
                    self.type_declaration(child, &doc, &mut out);
                }
                _ => pending.skip(child),
            }
        }
        out
    }

    /// Handle `type X ...` and `type ( ... )`; a type spec without its own
    /// comment inherits the declaration's.
    fn type_declaration(&self, decl: Node, decl_doc: &str, out: &mut Vec<SourceDeclaration>) {
        let mut pending = PendingComments::default();
        let mut cursor = decl.walk();

        for child in decl.children(&mut cursor) {
            match child.kind() {
                "comment" => pending.push(child),
                "type_spec" | "type_alias" => {
                    let mut doc = self.comment_text(&pending.take_for(child));
                    if doc.is_empty() {
                        doc = decl_doc.to_string();
                    }
                    if let Some(spec) = self.type_spec(child, doc) {
                        out.push(spec);
                    }
                }
                _ => pending.skip(child),
            }
        }
    }

    fn type_spec(&self, spec: Node, doc: String) -> Option<SourceDeclaration> {
        let name = self.node_text(spec.child_by_field_name("name")?).to_string();

        let kind = match spec.child_by_field_name("type") {
            Some(ty) if spec.kind() == "type_spec" && ty.kind() == "struct_type" => {
                DeclarationKind::Struct(self.struct_fields(ty))
            }
            _ => DeclarationKind::Other,
        };

        Some(SourceDeclaration { name, doc, kind })
    }

    fn struct_fields(&self, struct_type: Node) -> Vec<RawField> {
        let mut fields = Vec::new();
        let mut cursor = struct_type.walk();
        let Some(list) = struct_type
            .named_children(&mut cursor)
            .find(|c| c.kind() == "field_declaration_list")
        else {
            return fields;
        };

        let mut pending = PendingComments::default();
        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "comment" => pending.push(child),
                "field_declaration" => {
                    let doc = self.comment_text(&pending.take_for(child));
                    fields.push(self.field(child, doc));
                }
                _ => pending.skip(child),
            }
        }
        fields
    }

    fn field(&self, decl: Node, doc: String) -> RawField {
        let mut cursor = decl.walk();
        let names = decl
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.node_text(n).to_string())
            .collect::<Vec<_>>();

        let mut ty = decl
            .child_by_field_name("type")
            .map(|t| self.type_expr(t))
            .unwrap_or(TypeExpr::Unsupported);

        // Embedded `*T`: the star is an anonymous token of the declaration
        if names.is_empty() {
            let mut cursor = decl.walk();
            let starred = decl
                .children(&mut cursor)
                .any(|c| !c.is_named() && c.kind() == "*");
            if starred {
                ty = TypeExpr::Pointer(Box::new(ty));
            }
        }

        let tag = decl
            .child_by_field_name("tag")
            .map(|t| self.string_literal(t));

        RawField {
            names,
            ty,
            tag,
            doc,
        }
    }

    fn type_expr(&self, node: Node) -> TypeExpr {
        match node.kind() {
            "type_identifier" => TypeExpr::Identifier(self.node_text(node).to_string()),

            "pointer_type" | "parenthesized_type" => match self.first_named(node) {
                Some(inner) if node.kind() == "pointer_type" => {
                    TypeExpr::Pointer(Box::new(self.type_expr(inner)))
                }
                Some(inner) => self.type_expr(inner),
                None => TypeExpr::Unsupported,
            },

            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => TypeExpr::Qualified {
                        package: self.node_text(package).to_string(),
                        name: self.node_text(name).to_string(),
                    },
                    _ => TypeExpr::Unsupported,
                }
            }

            "slice_type" | "array_type" => match node.child_by_field_name("element") {
                Some(elem) => TypeExpr::Array(Box::new(self.type_expr(elem))),
                None => TypeExpr::Unsupported,
            },

            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeExpr::Map {
                    key: Box::new(self.type_expr(key)),
                    value: Box::new(self.type_expr(value)),
                },
                _ => TypeExpr::Unsupported,
            },

            _ => TypeExpr::Unsupported,
        }
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node.named_children(&mut cursor).next();
        found
    }

    /// Tag literal content: raw strings verbatim, interpreted strings unescaped.
    fn string_literal(&self, node: Node) -> String {
        let text = self.node_text(node);
        if let Some(raw) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
            return raw.to_string();
        }
        let inner = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);
        tag::unescape(inner)
    }

    /// Comment group text with markers removed, following Go's doc rules:
    /// one space after `//` is dropped, directives are skipped, trailing
    /// spaces are trimmed and blank runs collapse to a single blank line.
    fn comment_text(&self, group: &[Node]) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for comment in group {
            let text = self.node_text(*comment);
            if let Some(line) = text.strip_prefix("//") {
                if RE_DIRECTIVE.is_match(line) {
                    continue;
                }
                lines.push(line.strip_prefix(' ').unwrap_or(line));
            } else if let Some(block) = text.strip_prefix("/*") {
                let block = block.strip_suffix("*/").unwrap_or(block);
                lines.extend(block.split('\n'));
            }
        }

        let mut out: Vec<&str> = Vec::new();
        for line in lines {
            let line = line.trim_end();
            if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        if out.is_empty() {
            return String::new();
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}
