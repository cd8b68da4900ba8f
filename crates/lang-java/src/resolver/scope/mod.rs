use crate::naming::JavaNamingConvention;
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

/// One step of the type-name lookup chain.
///
/// `None` means the scope has nothing to say about the name and the next
/// scope should be tried. `Some(Err(_))` aborts the whole lookup.
pub trait TypeScope {
    fn resolve(&self, name: &TypeName, context: &ImportContext) -> Option<IndexResult<TypeHandle>>;
    fn name(&self) -> &'static str;
}

pub mod builtin;
pub mod import_scope;
pub mod member;
pub mod package_scope;
pub mod qualified;

pub use builtin::BuiltinScope;
pub use import_scope::ImportScope;
pub use member::MemberTypeScope;
pub use package_scope::PackageScope;
pub use qualified::QualifiedScope;

/// A class name as written in a reference, usually with `$` normalized to `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    full: String,
}

impl TypeName {
    pub fn parse(raw: &str) -> Self {
        Self {
            full: JavaNamingConvention::source_name(raw),
        }
    }

    /// Keep `$` as part of the name, for classes like `Gen$$Proxy`.
    pub fn verbatim(raw: &str) -> Self {
        Self {
            full: raw.to_string(),
        }
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    /// First segment, e.g. `Map` for `Map.Entry`.
    pub fn head(&self) -> &str {
        self.full.split('.').next().unwrap_or(&self.full)
    }

    /// Everything after the first segment, including the leading '.'.
    pub fn tail(&self) -> &str {
        self.full.find('.').map_or("", |i| &self.full[i..])
    }

    pub fn is_qualified(&self) -> bool {
        self.full.contains('.')
    }
}

/// Look up `head_fqn` followed by the nested-type path of `name`.
pub(crate) fn lookup_nested<I: TypeIndex + ?Sized>(
    index: &I,
    head_fqn: &str,
    name: &TypeName,
) -> Option<IndexResult<TypeHandle>> {
    index
        .find_type(&format!("{}{}", head_fqn, name.tail()))
        .transpose()
}
