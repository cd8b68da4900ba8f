use super::{TypeName, TypeScope};
use jsniscope_api::{ImportContext, IndexResult, TypeHandle, TypeIndex};

/// A dotted name taken as already fully qualified.
pub struct QualifiedScope<'a, I: ?Sized> {
    pub index: &'a I,
}

impl<I: TypeIndex + ?Sized> TypeScope for QualifiedScope<'_, I> {
    fn resolve(&self, name: &TypeName, _context: &ImportContext) -> Option<IndexResult<TypeHandle>> {
        if !name.is_qualified() {
            return None;
        }
        self.index.find_type(name.full()).transpose()
    }

    fn name(&self) -> &'static str {
        "Qualified"
    }
}
