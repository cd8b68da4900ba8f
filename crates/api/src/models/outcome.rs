use super::types::{FieldInfo, MethodInfo, TypeHandle};

/// Result of resolving one JSNI reference.
///
/// Every variant reached after the class name resolved carries the owning
/// type, so callers can record it as a dependency even when the member lookup
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    ResolvedMethod {
        owner: TypeHandle,
        target: MethodInfo,
    },
    ResolvedField {
        owner: TypeHandle,
        target: FieldInfo,
    },
    ResolvedConstructor {
        owner: TypeHandle,
        target: MethodInfo,
    },
    ResolvedClassOnly(TypeHandle),
    UnresolvedType,
    UnresolvedMethod {
        owner: TypeHandle,
    },
    UnresolvedField {
        owner: TypeHandle,
    },
    AmbiguousOverload {
        owner: TypeHandle,
        candidates: Vec<MethodInfo>,
    },
    /// `@null::...` references are never checked.
    IgnoredNullReference,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            ResolutionOutcome::ResolvedMethod { .. }
                | ResolutionOutcome::ResolvedField { .. }
                | ResolutionOutcome::ResolvedConstructor { .. }
                | ResolutionOutcome::ResolvedClassOnly(_)
        )
    }

    /// The type the class name resolved to, if resolution got that far.
    pub fn owner(&self) -> Option<&TypeHandle> {
        match self {
            ResolutionOutcome::ResolvedMethod { owner, .. }
            | ResolutionOutcome::ResolvedField { owner, .. }
            | ResolutionOutcome::ResolvedConstructor { owner, .. }
            | ResolutionOutcome::ResolvedClassOnly(owner)
            | ResolutionOutcome::UnresolvedMethod { owner }
            | ResolutionOutcome::UnresolvedField { owner }
            | ResolutionOutcome::AmbiguousOverload { owner, .. } => Some(owner),
            ResolutionOutcome::UnresolvedType | ResolutionOutcome::IgnoredNullReference => None,
        }
    }
}
