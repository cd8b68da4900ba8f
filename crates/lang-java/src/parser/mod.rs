//! Java source front end: finds JSNI blocks and the name-resolution context
//! they live in.

pub mod jsni;

pub use jsni::{JsniScanner, JsniToken, MalformedReason, MalformedReference, parse_references};

use crate::error::{JsniError, Result};
use crate::model::{CompilationUnit, JsniMethod};
use crate::naming::JavaNamingConvention;
use std::path::PathBuf;
use tracing::debug;
use tree_sitter::{Node, Parser};

pub const JSNI_BLOCK_START: &str = "/*-{";
pub const JSNI_BLOCK_END: &str = "}-*/";

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

const METHOD_DECLARATIONS: &[&str] = &["method_declaration", "constructor_declaration"];

#[derive(Clone)]
pub struct JavaSourceParser {
    pub language: tree_sitter::Language,
}

impl Default for JavaSourceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaSourceParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    /// Parse one Java file and collect every JSNI block attached to a method.
    pub fn parse_unit(
        &self,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<CompilationUnit> {
        let path = path.into();
        let source = source.into();

        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| JsniError::Parsing(e.to_string()))?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| JsniError::Parsing(format!("failed to parse {}", path.display())))?;

        let root = tree.root_node();
        let (package, imports) = extract_package_and_imports(root, &source);

        let mut jsni_methods = Vec::new();
        collect_jsni_blocks(root, &source, package.as_deref(), &mut jsni_methods);
        debug!(
            path = %path.display(),
            blocks = jsni_methods.len(),
            "collected JSNI blocks"
        );

        Ok(CompilationUnit {
            path,
            package,
            imports,
            jsni_methods,
            source,
        })
    }
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn name_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
}

fn extract_package_and_imports(root: Node, source: &str) -> (Option<String>, Vec<String>) {
    let mut package = None;
    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "package_declaration" => {
                package = name_child(child).map(|n| strip_whitespace(node_text(n, source)));
            }
            "import_declaration" => {
                let mut inner = child.walk();
                let kinds: Vec<&str> = child.children(&mut inner).map(|n| n.kind()).collect();
                if kinds.contains(&"static") {
                    continue;
                }
                if let Some(name) = name_child(child) {
                    let mut import = strip_whitespace(node_text(name, source));
                    if kinds.contains(&"asterisk") {
                        import.push_str(".*");
                    }
                    imports.push(import);
                }
            }
            _ => {}
        }
    }
    (package, imports)
}

fn strip_whitespace(text: &str) -> String {
    text.split_whitespace().collect()
}

fn collect_jsni_blocks(node: Node, source: &str, package: Option<&str>, out: &mut Vec<JsniMethod>) {
    if node.kind() == "block_comment" && node_text(node, source).starts_with(JSNI_BLOCK_START) {
        if let Some(method) = owning_method(node) {
            if let Some(jsni) = build_jsni_method(node, method, source, package) {
                out.push(jsni);
            }
        }
        return;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        collect_jsni_blocks(child, source, package, out);
    }
}

/// The method a JSNI comment belongs to: `void m() /*-{ ... }-*/;`
fn owning_method(comment: Node) -> Option<Node> {
    if let Some(parent) = comment.parent() {
        if METHOD_DECLARATIONS.contains(&parent.kind()) {
            return Some(parent);
        }
    }
    comment
        .prev_named_sibling()
        .filter(|n| METHOD_DECLARATIONS.contains(&n.kind()))
}

fn is_native(method: Node, source: &str) -> bool {
    let mut cursor = method.walk();
    let modifiers = method
        .children(&mut cursor)
        .find(|n| n.kind() == "modifiers");
    modifiers.is_some_and(|m| node_text(m, source).split_whitespace().any(|w| w == "native"))
}

/// Enclosing type FQNs of `node`, innermost first.
fn enclosing_types(node: Node, source: &str, package: Option<&str>) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        if TYPE_DECLARATIONS.contains(&n.kind()) {
            if let Some(name) = n.child_by_field_name("name") {
                names.push(node_text(name, source).to_string());
            }
        }
        current = n.parent();
    }

    // names is innermost first; build each FQN from the outermost type inwards.
    let mut fqns = Vec::with_capacity(names.len());
    let mut prefix: Option<String> = package.filter(|p| !p.is_empty()).map(str::to_string);
    for name in names.iter().rev() {
        let fqn = JavaNamingConvention::qualify(prefix.as_deref(), name);
        prefix = Some(fqn.clone());
        fqns.push(fqn);
    }
    fqns.reverse();
    fqns
}

fn build_jsni_method(
    comment: Node,
    method: Node,
    source: &str,
    package: Option<&str>,
) -> Option<JsniMethod> {
    let enclosing = enclosing_types(method, source, package);
    let declaring_type = enclosing.first()?.clone();
    let name = match method.child_by_field_name("name") {
        Some(n) => node_text(n, source).to_string(),
        None => return None,
    };

    let text = node_text(comment, source);
    let block_offset = comment.start_byte();
    let body_offset = block_offset + JSNI_BLOCK_START.len();
    let terminated =
        text.len() >= JSNI_BLOCK_START.len() + JSNI_BLOCK_END.len() && text.ends_with(JSNI_BLOCK_END);
    let body = if terminated {
        &text[JSNI_BLOCK_START.len()..text.len() - JSNI_BLOCK_END.len()]
    } else {
        &text[JSNI_BLOCK_START.len()..]
    };

    Some(JsniMethod {
        declaring_type,
        name,
        is_native: is_native(method, source),
        enclosing_types: enclosing,
        block_offset,
        block_length: text.len(),
        body: body.to_string(),
        body_offset,
        terminated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = r#"package com.example.client;

import java.util.List;
import com.google.gwt.core.client.*;
import static java.lang.Math.max;

public class Widget {
    private int count;

    public native void attach(Object elem) /*-{
        this.@com.example.client.Widget::count = 1;
        elem.onclick = $entry(this.@com.example.client.Widget::fire(I));
    }-*/;

    public void plain() {
        /* not jsni */
    }

    static class Inner {
        native int size() /*-{ return @Widget::SIZE; }-*/;
    }
}
"#;

    #[test]
    fn test_package_and_imports() {
        let unit = JavaSourceParser::new().parse_unit("Widget.java", WIDGET).unwrap();
        assert_eq!(unit.package.as_deref(), Some("com.example.client"));
        assert_eq!(
            unit.imports,
            vec![
                "java.util.List".to_string(),
                "com.google.gwt.core.client.*".to_string()
            ]
        );
    }

    #[test]
    fn test_jsni_blocks_are_collected() {
        let unit = JavaSourceParser::new().parse_unit("Widget.java", WIDGET).unwrap();
        assert_eq!(unit.jsni_methods.len(), 2);

        let attach = &unit.jsni_methods[0];
        assert_eq!(attach.declaring_type, "com.example.client.Widget");
        assert_eq!(attach.name, "attach");
        assert!(attach.is_native);
        assert!(attach.terminated);
        assert_eq!(
            &WIDGET[attach.body_offset..attach.body_offset + attach.body.len()],
            attach.body
        );
        assert!(attach.body.contains("@com.example.client.Widget::count"));

        let size = &unit.jsni_methods[1];
        assert_eq!(size.declaring_type, "com.example.client.Widget.Inner");
        assert_eq!(
            size.enclosing_types,
            vec![
                "com.example.client.Widget.Inner".to_string(),
                "com.example.client.Widget".to_string()
            ]
        );
        assert_eq!(size.owner_key(), "com.example.client.Widget.Inner#size");
    }

    #[test]
    fn test_unterminated_block() {
        let source = "class A { native void f() /*-{ return 1; */; }";
        let unit = JavaSourceParser::new().parse_unit("A.java", source).unwrap();
        assert_eq!(unit.jsni_methods.len(), 1);
        assert!(!unit.jsni_methods[0].terminated);
        assert_eq!(unit.package, None);
    }

    #[test]
    fn test_non_native_jsni_block() {
        let source = "class A { void f() /*-{ return 1; }-*/; }";
        let unit = JavaSourceParser::new().parse_unit("A.java", source).unwrap();
        assert_eq!(unit.jsni_methods.len(), 1);
        assert!(!unit.jsni_methods[0].is_native);
        assert_eq!(unit.jsni_methods[0].declaring_type, "A");
    }
}
