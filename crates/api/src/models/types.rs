use super::signature::{ErasedType, descriptor_of};
use serde::{Deserialize, Serialize};

/// Kind of type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A type known to the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    /// Fully qualified name with `.` between packages and nested types,
    /// e.g. "java.util.Map.Entry"
    pub fqn: String,
    pub kind: TypeKind,
}

impl TypeHandle {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.fqn.rsplit('.').next().unwrap_or(&self.fqn)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }
}

/// A method or constructor declared by a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Simple name; `new` for constructors
    pub name: String,
    /// The type that declares this member (may differ from lookup type due to inheritance)
    pub declaring_type: String,
    pub parameters: Vec<ErasedType>,
}

impl MethodInfo {
    pub const CONSTRUCTOR_NAME: &'static str = "new";

    pub fn method(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<ErasedType>,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            parameters,
        }
    }

    pub fn constructor(declaring_type: impl Into<String>, parameters: Vec<ErasedType>) -> Self {
        Self::method(declaring_type, Self::CONSTRUCTOR_NAME, parameters)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == Self::CONSTRUCTOR_NAME
    }

    /// Parameter descriptor as written between the parentheses of a JSNI reference.
    pub fn descriptor(&self) -> String {
        descriptor_of(&self.parameters)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub declaring_type: String,
    pub field_type: ErasedType,
}

/// Name-resolution context of a reference site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportContext {
    /// Current package, e.g., "com.example"
    pub package: Option<String>,
    /// Single-type imports, fully qualified
    pub imports: Vec<String>,
    /// On-demand imports without the trailing `.*`
    pub on_demand: Vec<String>,
    /// Types enclosing the reference site, innermost first
    pub enclosing_types: Vec<String>,
}

impl ImportContext {
    pub fn new(package: Option<String>) -> Self {
        Self {
            package,
            ..Self::default()
        }
    }

    /// Add an import as written after `import`, e.g. `java.util.List` or `java.util.*`.
    pub fn with_import(mut self, import: &str) -> Self {
        match import.strip_suffix(".*") {
            Some(pkg) => self.on_demand.push(pkg.to_string()),
            None => self.imports.push(import.to_string()),
        }
        self
    }

    pub fn with_enclosing_type(mut self, fqn: impl Into<String>) -> Self {
        self.enclosing_types.push(fqn.into());
        self
    }
}
