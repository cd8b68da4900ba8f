use super::{TypeName, TypeScope, lookup_nested};
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

/// Single-type imports, then on-demand (`.*`) imports in declaration order.
pub struct ImportScope<'a, I: ?Sized> {
    pub index: &'a I,
}

impl<I: TypeIndex + ?Sized> TypeScope for ImportScope<'_, I> {
    fn resolve(&self, name: &TypeName, context: &ImportContext) -> Option<IndexResult<TypeHandle>> {
        let head = name.head();
        let suffix = format!(".{}", head);

        context
            .imports
            .iter()
            .filter(|imp| imp.as_str() == head || imp.ends_with(&suffix))
            .find_map(|imp| lookup_nested(self.index, imp, name))
            .or_else(|| {
                context
                    .on_demand
                    .iter()
                    .find_map(|pkg| lookup_nested(self.index, &format!("{}.{}", pkg, head), name))
            })
    }

    fn name(&self) -> &'static str {
        "Import"
    }
}
