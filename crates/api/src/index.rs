//! The Java type-model capability the JSNI resolver runs against.
//!
//! A backing implementation (a compiler symbol table, a precomputed index, a
//! test double) only answers per-type questions. Hierarchy walks and member
//! matching are provided on top of it by [`TypeIndexExt`].

use crate::error::IndexResult;
use crate::models::{FieldInfo, MethodInfo, ResolutionOutcome, TypeHandle, TypeKind};
use std::collections::{HashSet, VecDeque};

/// Per-type lookups against the project's Java model.
///
/// Implementations must be safe to query from several validation threads at once.
pub trait TypeIndex: Send + Sync {
    /// Look up a type by fully qualified name (`.` between packages and nested types).
    fn find_type(&self, fqn: &str) -> IndexResult<Option<TypeHandle>>;

    /// Direct superclass. `None` for interfaces and for `java.lang.Object`.
    fn superclass(&self, ty: &TypeHandle) -> IndexResult<Option<TypeHandle>>;

    /// Interfaces directly implemented (or extended, for interfaces) by a type.
    fn interfaces(&self, ty: &TypeHandle) -> IndexResult<Vec<TypeHandle>>;

    /// Constructors explicitly declared by a type.
    fn constructors(&self, ty: &TypeHandle) -> IndexResult<Vec<MethodInfo>>;

    /// Methods directly declared in a type with the given name.
    ///
    /// Does NOT search the inheritance hierarchy.
    fn methods(&self, ty: &TypeHandle, name: &str) -> IndexResult<Vec<MethodInfo>>;

    /// Fields directly declared in a type with the given name.
    fn fields(&self, ty: &TypeHandle, name: &str) -> IndexResult<Vec<FieldInfo>>;
}

/// Signature accepted by a JSNI reference in place of a descriptor to match any overload.
pub const ANY_SIGNATURE: &str = "*";

const JAVA_LANG_OBJECT: &str = "java.lang.Object";

fn signature_matches(method: &MethodInfo, signature: &str) -> bool {
    signature == ANY_SIGNATURE || method.descriptor() == signature
}

/// Outcome of matching the methods declared by `candidate`, or `None` if it declares no match.
fn match_methods<I: TypeIndex + ?Sized>(
    index: &I,
    owner: &TypeHandle,
    candidate: &TypeHandle,
    name: &str,
    signature: &str,
) -> IndexResult<Option<ResolutionOutcome>> {
    let mut hits: Vec<MethodInfo> = index
        .methods(candidate, name)?
        .into_iter()
        .filter(|m| signature_matches(m, signature))
        .collect();
    Ok(match hits.len() {
        0 => None,
        1 => Some(ResolutionOutcome::ResolvedMethod {
            owner: owner.clone(),
            target: hits.remove(0),
        }),
        _ => Some(ResolutionOutcome::AmbiguousOverload {
            owner: owner.clone(),
            candidates: hits,
        }),
    })
}

/// Hierarchy-aware member lookup, available on every [`TypeIndex`].
pub trait TypeIndexExt: TypeIndex {
    /// Walk all supertypes of `ty`: the superclass chain first, then the
    /// implemented interfaces in breadth order.
    fn supertypes(&self, ty: &TypeHandle) -> SupertypeWalk<'_, Self> {
        SupertypeWalk::new(self, ty)
    }

    /// Find a method by name and parameter descriptor in `ty` and its supertypes.
    ///
    /// The first type declaring a match decides; a redeclaration in a subtype
    /// shadows the supertype's member. Interfaces also see the public methods
    /// of `java.lang.Object`.
    fn find_method(
        &self,
        ty: &TypeHandle,
        name: &str,
        signature: &str,
    ) -> IndexResult<ResolutionOutcome> {
        let walk = std::iter::once(Ok(ty.clone())).chain(self.supertypes(ty));
        for candidate in walk {
            if let Some(outcome) = match_methods(self, ty, &candidate?, name, signature)? {
                return Ok(outcome);
            }
        }
        if ty.is_interface() {
            if let Some(object) = self.find_type(JAVA_LANG_OBJECT)? {
                if let Some(outcome) = match_methods(self, ty, &object, name, signature)? {
                    return Ok(outcome);
                }
            }
        }
        Ok(ResolutionOutcome::UnresolvedMethod { owner: ty.clone() })
    }

    /// Find a field in `ty` and its supertypes. The nearest declaration wins.
    fn find_field(&self, ty: &TypeHandle, name: &str) -> IndexResult<ResolutionOutcome> {
        let walk = std::iter::once(Ok(ty.clone())).chain(self.supertypes(ty));
        for candidate in walk {
            let candidate = candidate?;
            if let Some(target) = self.fields(&candidate, name)?.into_iter().next() {
                return Ok(ResolutionOutcome::ResolvedField {
                    owner: ty.clone(),
                    target,
                });
            }
        }
        Ok(ResolutionOutcome::UnresolvedField { owner: ty.clone() })
    }

    /// Find a constructor declared by `ty` itself. Constructors are not inherited.
    ///
    /// A class without declared constructors has the implicit no-arg one.
    fn find_constructor(&self, ty: &TypeHandle, signature: &str) -> IndexResult<ResolutionOutcome> {
        let mut declared = self.constructors(ty)?;
        if declared.is_empty() && ty.kind == TypeKind::Class {
            declared.push(MethodInfo::constructor(ty.fqn.clone(), vec![]));
        }
        let mut hits: Vec<MethodInfo> = declared
            .into_iter()
            .filter(|m| signature_matches(m, signature))
            .collect();
        Ok(match hits.len() {
            0 => ResolutionOutcome::UnresolvedMethod { owner: ty.clone() },
            1 => ResolutionOutcome::ResolvedConstructor {
                owner: ty.clone(),
                target: hits.remove(0),
            },
            _ => ResolutionOutcome::AmbiguousOverload {
                owner: ty.clone(),
                candidates: hits,
            },
        })
    }
}

impl<T: TypeIndex + ?Sized> TypeIndexExt for T {}

/// Lazy supertype iterator returned by [`TypeIndexExt::supertypes`].
///
/// Yields each supertype once. A lookup error is yielded once and ends the walk.
pub struct SupertypeWalk<'a, I: ?Sized> {
    index: &'a I,
    next_class: Option<TypeHandle>,
    classes: Vec<TypeHandle>,
    queue: VecDeque<TypeHandle>,
    visited: HashSet<String>,
    interfaces_seeded: bool,
    done: bool,
}

impl<'a, I: TypeIndex + ?Sized> SupertypeWalk<'a, I> {
    pub fn new(index: &'a I, start: &TypeHandle) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.fqn.clone());
        Self {
            index,
            next_class: Some(start.clone()),
            classes: vec![start.clone()],
            queue: VecDeque::new(),
            visited,
            interfaces_seeded: false,
            done: false,
        }
    }

    fn enqueue_interfaces(&mut self, ty: &TypeHandle) -> IndexResult<()> {
        for iface in self.index.interfaces(ty)? {
            if self.visited.insert(iface.fqn.clone()) {
                self.queue.push_back(iface);
            }
        }
        Ok(())
    }

    fn advance(&mut self) -> IndexResult<Option<TypeHandle>> {
        if let Some(current) = self.next_class.take() {
            if let Some(sup) = self.index.superclass(&current)? {
                if self.visited.insert(sup.fqn.clone()) {
                    self.classes.push(sup.clone());
                    self.next_class = Some(sup.clone());
                    return Ok(Some(sup));
                }
            }
        }

        if !self.interfaces_seeded {
            self.interfaces_seeded = true;
            for class in std::mem::take(&mut self.classes) {
                self.enqueue_interfaces(&class)?;
            }
        }

        match self.queue.pop_front() {
            Some(iface) => {
                self.enqueue_interfaces(&iface)?;
                Ok(Some(iface))
            }
            None => Ok(None),
        }
    }
}

impl<I: TypeIndex + ?Sized> Iterator for SupertypeWalk<'_, I> {
    type Item = IndexResult<TypeHandle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(ty)) => Some(Ok(ty)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
