use super::{TypeName, TypeScope, lookup_nested};
use crate::naming::JavaNamingConvention;
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

/// Types of the compilation unit's own package (or the default package).
pub struct PackageScope<'a, I: ?Sized> {
    pub index: &'a I,
}

impl<I: TypeIndex + ?Sized> TypeScope for PackageScope<'_, I> {
    fn resolve(&self, name: &TypeName, context: &ImportContext) -> Option<IndexResult<TypeHandle>> {
        let head_fqn = JavaNamingConvention::qualify(context.package.as_deref(), name.head());
        lookup_nested(self.index, &head_fqn, name)
    }

    fn name(&self) -> &'static str {
        "Package"
    }
}
