use super::{TypeName, TypeScope, lookup_nested};
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

pub const IMPLICIT_PACKAGE: &str = "java.lang";

/// The implicitly imported `java.lang` package.
pub struct BuiltinScope<'a, I: ?Sized> {
    pub index: &'a I,
}

impl<I: TypeIndex + ?Sized> TypeScope for BuiltinScope<'_, I> {
    fn resolve(&self, name: &TypeName, _context: &ImportContext) -> Option<IndexResult<TypeHandle>> {
        lookup_nested(
            self.index,
            &format!("{}.{}", IMPLICIT_PACKAGE, name.head()),
            name,
        )
    }

    fn name(&self) -> &'static str {
        "Builtin"
    }
}
