use crate::naming::JavaNamingConvention;
use jsniscope_api::models::ImportContext;
use smol_str::SmolStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a JSNI reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
    Constructor,
    ClassOnly,
}

/// One `@Class::member(sig)` occurrence inside a JSNI body.
///
/// Offsets are byte offsets into the compilation unit's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsniReference {
    offset: usize,
    length: usize,
    class_name: SmolStr,
    member_name: SmolStr,
    kind: MemberKind,
    signature: SmolStr,
    owner: SmolStr,
}

impl JsniReference {
    pub const NULL_CLASS: &'static str = "null";

    pub fn new(
        offset: usize,
        length: usize,
        class_name: &str,
        member_name: &str,
        kind: MemberKind,
        signature: &str,
        owner: SmolStr,
    ) -> Self {
        Self {
            offset,
            length,
            class_name: SmolStr::new(class_name),
            member_name: SmolStr::new(member_name),
            kind,
            signature: SmolStr::new(signature),
            owner,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Empty for class-only references.
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Parameter signature exactly as written between the parentheses.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The Java member whose JSNI body contains this reference (`pkg.Type#method`).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn owner_type(&self) -> &str {
        JavaNamingConvention::extract_type_fqn(&self.owner)
    }

    pub fn is_null_reference(&self) -> bool {
        self.class_name.as_str() == Self::NULL_CLASS
    }

    pub fn has_signature(&self) -> bool {
        matches!(self.kind, MemberKind::Method | MemberKind::Constructor)
    }
}

/// Renders the reference exactly as it appears in the source.
impl fmt::Display for JsniReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.class_name)?;
        if self.kind != MemberKind::ClassOnly {
            write!(f, "::{}", self.member_name)?;
        }
        if self.has_signature() {
            write!(f, "({})", self.signature)?;
        }
        Ok(())
    }
}

/// A `/*-{ ... }-*/` block attached to a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsniMethod {
    /// FQN of the declaring type, e.g. "com.example.Outer.Inner"
    pub declaring_type: String,
    pub name: String,
    pub is_native: bool,
    /// Declaring type first, then its enclosing types outwards
    pub enclosing_types: Vec<String>,
    /// Range of the whole comment, `/*-{` through `}-*/`
    pub block_offset: usize,
    pub block_length: usize,
    /// Text between `/*-{` and `}-*/`
    pub body: String,
    pub body_offset: usize,
    /// False when the comment does not end with `}-*/`
    pub terminated: bool,
}

impl JsniMethod {
    pub fn owner_key(&self) -> String {
        JavaNamingConvention::build_member_fqn(&self.declaring_type, &self.name)
    }
}

/// One Java source file with the JSNI blocks found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub path: PathBuf,
    pub source: String,
    pub package: Option<String>,
    /// Imports as written after `import`; on-demand imports keep their `.*`
    pub imports: Vec<String>,
    pub jsni_methods: Vec<JsniMethod>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            package: None,
            imports: Vec::new(),
            jsni_methods: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_jsni_method(mut self, method: JsniMethod) -> Self {
        self.jsni_methods.push(method);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name-resolution context for references inside `method`.
    pub fn import_context(&self, method: &JsniMethod) -> ImportContext {
        let mut ctx = ImportContext::new(self.package.clone());
        for import in &self.imports {
            ctx = ctx.with_import(import);
        }
        ctx.enclosing_types = method.enclosing_types.clone();
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(class: &str, member: &str, kind: MemberKind, sig: &str) -> JsniReference {
        JsniReference::new(0, 0, class, member, kind, sig, SmolStr::new("a.B#m"))
    }

    #[test]
    fn test_display_reproduces_source_forms() {
        assert_eq!(
            reference("a.B", "m", MemberKind::Method, "ILjava/lang/String;").to_string(),
            "@a.B::m(ILjava/lang/String;)"
        );
        assert_eq!(reference("a.B", "f", MemberKind::Field, "").to_string(), "@a.B::f");
        assert_eq!(reference("a.B", "new", MemberKind::Constructor, "").to_string(), "@a.B::new()");
        assert_eq!(reference("a.B", "", MemberKind::ClassOnly, "").to_string(), "@a.B");
    }

    #[test]
    fn test_owner_type() {
        let r = reference("null", "x", MemberKind::Field, "");
        assert_eq!(r.owner_type(), "a.B");
        assert!(r.is_null_reference());
    }

    #[test]
    fn test_import_context_from_unit() {
        let method = JsniMethod {
            declaring_type: "com.example.Widget".into(),
            name: "attach".into(),
            is_native: true,
            enclosing_types: vec!["com.example.Widget".into()],
            block_offset: 0,
            block_length: 0,
            body: String::new(),
            body_offset: 0,
            terminated: true,
        };
        let unit = CompilationUnit::new("Widget.java", "")
            .with_package("com.example")
            .with_import("java.util.List")
            .with_import("com.google.gwt.dom.client.*");
        let ctx = unit.import_context(&method);
        assert_eq!(ctx.package.as_deref(), Some("com.example"));
        assert_eq!(ctx.imports, vec!["java.util.List".to_string()]);
        assert_eq!(ctx.on_demand, vec!["com.google.gwt.dom.client".to_string()]);
        assert_eq!(ctx.enclosing_types, vec!["com.example.Widget".to_string()]);
        assert_eq!(method.owner_key(), "com.example.Widget#attach");
    }
}
