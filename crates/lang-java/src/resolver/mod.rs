//! Resolution of JSNI references against a [`TypeIndex`].

use crate::model::{JsniReference, MemberKind};
use jsniscope_api::{ImportContext, IndexResult, ResolutionOutcome, TypeHandle, TypeIndex, TypeIndexExt};
use std::ops::ControlFlow;
use tracing::{debug, trace};

pub mod scope;

use scope::{
    BuiltinScope, ImportScope, MemberTypeScope, PackageScope, QualifiedScope, TypeName, TypeScope,
};

pub struct JsniResolver<'a, I: ?Sized> {
    index: &'a I,
}

impl<'a, I: TypeIndex + ?Sized> JsniResolver<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a I {
        self.index
    }

    fn get_active_scopes(&self) -> Vec<Box<dyn TypeScope + 'a>> {
        vec![
            Box::new(MemberTypeScope { index: self.index }),
            Box::new(ImportScope { index: self.index }),
            Box::new(QualifiedScope { index: self.index }),
            Box::new(PackageScope { index: self.index }),
            Box::new(BuiltinScope { index: self.index }),
        ]
    }

    /// Resolve a class name as written in a reference (simple, dotted, or
    /// with `$` between nested types) in the given import context.
    ///
    /// A name containing `$` that misses as a nested-type path is retried
    /// with `$` kept, since `$` is also legal inside a class name.
    pub fn resolve_type(
        &self,
        class_name: &str,
        context: &ImportContext,
    ) -> IndexResult<Option<TypeHandle>> {
        let name = TypeName::parse(class_name);
        if name.head().is_empty() {
            return Ok(None);
        }
        match self.resolve_name(&name, class_name, context)? {
            None if class_name.contains('$') => {
                self.resolve_name(&TypeName::verbatim(class_name), class_name, context)
            }
            found => Ok(found),
        }
    }

    fn resolve_name(
        &self,
        name: &TypeName,
        class_name: &str,
        context: &ImportContext,
    ) -> IndexResult<Option<TypeHandle>> {
        match self.get_active_scopes().into_iter().try_fold(
            (),
            |_, scope: Box<dyn TypeScope + 'a>| match scope.resolve(name, context) {
                Some(res) => {
                    trace!(name = class_name, scope = scope.name(), "type name matched");
                    ControlFlow::Break(res)
                }
                None => ControlFlow::Continue(()),
            },
        ) {
            ControlFlow::Break(res) => res.map(Some),
            ControlFlow::Continue(()) => Ok(None),
        }
    }

    pub fn resolve(
        &self,
        reference: &JsniReference,
        context: &ImportContext,
    ) -> IndexResult<ResolutionOutcome> {
        if reference.is_null_reference() {
            return Ok(ResolutionOutcome::IgnoredNullReference);
        }

        let Some(ty) = self.resolve_type(reference.class_name(), context)? else {
            debug!(reference = %reference, "unresolved type");
            return Ok(ResolutionOutcome::UnresolvedType);
        };

        let outcome = match reference.kind() {
            MemberKind::ClassOnly => ResolutionOutcome::ResolvedClassOnly(ty),
            MemberKind::Constructor => self.index.find_constructor(&ty, reference.signature())?,
            MemberKind::Method => {
                self.index
                    .find_method(&ty, reference.member_name(), reference.signature())?
            }
            MemberKind::Field => self.index.find_field(&ty, reference.member_name())?,
        };
        debug!(
            reference = %reference,
            resolved = outcome.is_resolved(),
            "resolved reference"
        );
        Ok(outcome)
    }
}

/// Type-name resolution available directly on every [`TypeIndex`].
pub trait TypeResolution: TypeIndex {
    fn resolve_type(&self, name: &str, context: &ImportContext) -> IndexResult<Option<TypeHandle>> {
        JsniResolver::new(self).resolve_type(name, context)
    }
}

impl<T: TypeIndex + ?Sized> TypeResolution for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::StaticTypeIndex;
    use jsniscope_api::IndexError;
    use jsniscope_api::{FieldInfo, MethodInfo};
    use smol_str::SmolStr;

    fn reference(class: &str, member: &str, kind: MemberKind, sig: &str) -> JsniReference {
        JsniReference::new(0, 0, class, member, kind, sig, SmolStr::new("com.example.Widget#m"))
    }

    fn index() -> StaticTypeIndex {
        StaticTypeIndex::new()
            .add_class("java.lang.Object", None)
            .add_method("java.lang.Object", "toString", &[])
            .add_class("java.lang.String", None)
            .add_class("com.example.Widget", None)
            .add_class("com.example.Widget.Handle", None)
            .add_method("com.example.Widget", "fire", &["int"])
            .add_method("com.example.Widget", "fire", &["java.lang.String"])
            .add_field("com.example.Widget", "count", "int")
            .add_constructor("com.example.Widget", &["int"])
            .add_class("com.other.Widget", None)
    }

    fn ctx() -> ImportContext {
        ImportContext::new(Some("com.example".into())).with_enclosing_type("com.example.Widget")
    }

    #[test]
    fn test_resolve_type_order() {
        let index = index();
        let resolver = JsniResolver::new(&index);

        // Own package.
        let ty = resolver.resolve_type("Widget", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Widget");

        // A single-type import beats the package.
        let imported = ctx().with_import("com.other.Widget");
        let ty = resolver.resolve_type("Widget", &imported).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.other.Widget");

        // Member types of the enclosing type come first.
        let ty = resolver.resolve_type("Handle", &imported).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Widget.Handle");

        // Qualified and binary spellings.
        let ty = resolver.resolve_type("com.example.Widget$Handle", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Widget.Handle");

        // java.lang is implicit.
        let ty = resolver.resolve_type("String", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "java.lang.String");

        assert!(resolver.resolve_type("Missing", &ctx()).unwrap().is_none());
    }

    #[test]
    fn test_dollar_inside_class_name() {
        let index = index()
            .add_class("com.example.Gen$$Proxy", None);
        let resolver = JsniResolver::new(&index);

        let ty = resolver.resolve_type("com.example.Gen$$Proxy", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Gen$$Proxy");
        let ty = resolver.resolve_type("Gen$$Proxy", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Gen$$Proxy");

        // A nested-type path still wins when it exists.
        let ty = resolver.resolve_type("Widget$Handle", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Widget.Handle");
        assert!(resolver.resolve_type("Gen$Missing", &ctx()).unwrap().is_none());
    }

    #[test]
    fn test_resolve_type_via_extension() {
        let index = index();
        let ty = index.resolve_type("Widget", &ctx()).unwrap().unwrap();
        assert_eq!(ty.fqn, "com.example.Widget");
    }

    #[test]
    fn test_resolve_member_outcomes() {
        let index = index();
        let resolver = JsniResolver::new(&index);

        let outcome = resolver
            .resolve(&reference("Widget", "fire", MemberKind::Method, "I"), &ctx())
            .unwrap();
        assert!(matches!(outcome, ResolutionOutcome::ResolvedMethod { .. }));

        let outcome = resolver
            .resolve(&reference("Widget", "fire", MemberKind::Method, "*"), &ctx())
            .unwrap();
        match outcome {
            ResolutionOutcome::AmbiguousOverload { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("Expected ambiguous overload, got {:?}", other),
        }

        let outcome = resolver
            .resolve(&reference("Widget", "toString", MemberKind::Method, ""), &ctx())
            .unwrap();
        match outcome {
            ResolutionOutcome::ResolvedMethod { target, .. } => {
                assert_eq!(target.declaring_type, "java.lang.Object")
            }
            other => panic!("Expected inherited method, got {:?}", other),
        }

        let outcome = resolver
            .resolve(&reference("Widget", "count", MemberKind::Field, ""), &ctx())
            .unwrap();
        assert!(matches!(outcome, ResolutionOutcome::ResolvedField { .. }));

        let outcome = resolver
            .resolve(&reference("Widget", "missing", MemberKind::Field, ""), &ctx())
            .unwrap();
        assert_eq!(outcome.owner().map(|o| o.fqn.as_str()), Some("com.example.Widget"));
        assert!(matches!(outcome, ResolutionOutcome::UnresolvedField { .. }));

        let outcome = resolver
            .resolve(&reference("Widget", "new", MemberKind::Constructor, "I"), &ctx())
            .unwrap();
        assert!(matches!(outcome, ResolutionOutcome::ResolvedConstructor { .. }));

        let outcome = resolver
            .resolve(&reference("Widget", "new", MemberKind::Constructor, ""), &ctx())
            .unwrap();
        assert!(matches!(outcome, ResolutionOutcome::UnresolvedMethod { .. }));

        let outcome = resolver
            .resolve(&reference("Widget", "", MemberKind::ClassOnly, ""), &ctx())
            .unwrap();
        assert!(matches!(outcome, ResolutionOutcome::ResolvedClassOnly(_)));
    }

    #[test]
    fn test_null_and_unresolved_type() {
        let index = index();
        let resolver = JsniResolver::new(&index);

        let outcome = resolver
            .resolve(&reference("null", "anything", MemberKind::Method, "IZ"), &ctx())
            .unwrap();
        assert_eq!(outcome, ResolutionOutcome::IgnoredNullReference);

        let outcome = resolver
            .resolve(&reference("Nope", "f", MemberKind::Field, ""), &ctx())
            .unwrap();
        assert_eq!(outcome, ResolutionOutcome::UnresolvedType);
    }

    struct StaleIndex;

    impl TypeIndex for StaleIndex {
        fn find_type(&self, _fqn: &str) -> IndexResult<Option<TypeHandle>> {
            Err(IndexError::Stale("rebuilding".into()))
        }
        fn superclass(&self, _ty: &TypeHandle) -> IndexResult<Option<TypeHandle>> {
            Ok(None)
        }
        fn interfaces(&self, _ty: &TypeHandle) -> IndexResult<Vec<TypeHandle>> {
            Ok(vec![])
        }
        fn constructors(&self, _ty: &TypeHandle) -> IndexResult<Vec<MethodInfo>> {
            Ok(vec![])
        }
        fn methods(&self, _ty: &TypeHandle, _name: &str) -> IndexResult<Vec<MethodInfo>> {
            Ok(vec![])
        }
        fn fields(&self, _ty: &TypeHandle, _name: &str) -> IndexResult<Vec<FieldInfo>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_index_failure_propagates() {
        let resolver = JsniResolver::new(&StaleIndex);
        let result = resolver.resolve(&reference("Widget", "f", MemberKind::Field, ""), &ctx());
        assert!(matches!(result, Err(IndexError::Stale(_))));

        // Null references never touch the index.
        let result = resolver.resolve(&reference("null", "f", MemberKind::Field, ""), &ctx());
        assert_eq!(result.unwrap(), ResolutionOutcome::IgnoredNullReference);
    }
}
