use super::{TypeName, TypeScope, lookup_nested};
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

/// Member types of the enclosing types, innermost first.
pub struct MemberTypeScope<'a, I: ?Sized> {
    pub index: &'a I,
}

impl<I: TypeIndex + ?Sized> TypeScope for MemberTypeScope<'_, I> {
    fn resolve(&self, name: &TypeName, context: &ImportContext) -> Option<IndexResult<TypeHandle>> {
        context.enclosing_types.iter().find_map(|enclosing| {
            lookup_nested(self.index, &format!("{}.{}", enclosing, name.head()), name)
        })
    }

    fn name(&self) -> &'static str {
        "MemberType"
    }
}
