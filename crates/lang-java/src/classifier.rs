//! Maps resolution outcomes to problems.

use crate::config::ProblemSeverities;
use crate::model::JsniReference;
use crate::parser::MalformedReference;
use crate::problem::{Problem, ProblemType};
use jsniscope_api::ResolutionOutcome;

/// What one reference contributes to a validation result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub problem: Option<Problem>,
    /// FQN of the type the class name resolved to
    pub dependency: Option<String>,
}

pub struct ProblemClassifier<'a> {
    severities: &'a ProblemSeverities,
}

impl<'a> ProblemClassifier<'a> {
    pub fn new(severities: &'a ProblemSeverities) -> Self {
        Self { severities }
    }

    pub fn classify(&self, reference: &JsniReference, outcome: &ResolutionOutcome) -> Classification {
        let dependency = outcome.owner().map(|owner| owner.fqn.clone());

        let problem = match outcome {
            ResolutionOutcome::IgnoredNullReference
            | ResolutionOutcome::ResolvedMethod { .. }
            | ResolutionOutcome::ResolvedField { .. }
            | ResolutionOutcome::ResolvedConstructor { .. }
            | ResolutionOutcome::ResolvedClassOnly(_) => None,
            ResolutionOutcome::UnresolvedType => self.at(
                reference,
                ProblemType::UnresolvedType,
                vec![reference.class_name().to_string()],
            ),
            ResolutionOutcome::UnresolvedMethod { owner } => self.at(
                reference,
                ProblemType::UnresolvedMethod,
                vec![owner.fqn.clone(), reference.member_name().to_string()],
            ),
            ResolutionOutcome::UnresolvedField { owner } => self.at(
                reference,
                ProblemType::UnresolvedField,
                vec![owner.fqn.clone(), reference.member_name().to_string()],
            ),
            ResolutionOutcome::AmbiguousOverload { owner, candidates } => self.at(
                reference,
                ProblemType::Ambiguous,
                vec![
                    owner.fqn.clone(),
                    reference.member_name().to_string(),
                    candidates.len().to_string(),
                ],
            ),
        };

        let problem = match (problem, &dependency) {
            (Some(p), Some(dep)) => Some(p.with_type_dependency(dep.clone())),
            (p, _) => p,
        };
        Classification { problem, dependency }
    }

    pub fn classify_malformed(&self, malformed: &MalformedReference) -> Option<Problem> {
        self.parse_error(
            malformed.offset,
            malformed.length,
            &format!("{} in '{}'", malformed.reason, malformed.text),
        )
    }

    pub fn parse_error(&self, offset: usize, length: usize, detail: &str) -> Option<Problem> {
        self.severities
            .create(ProblemType::ParseError, offset, length, vec![detail.to_string()])
    }

    fn at(
        &self,
        reference: &JsniReference,
        problem_type: ProblemType,
        args: Vec<String>,
    ) -> Option<Problem> {
        self.severities
            .create(problem_type, reference.offset(), reference.length(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberKind;
    use crate::parser::MalformedReason;
    use crate::problem::Severity;
    use jsniscope_api::{MethodInfo, TypeHandle, TypeKind};
    use smol_str::SmolStr;

    fn reference(class: &str, member: &str, kind: MemberKind) -> JsniReference {
        JsniReference::new(40, 12, class, member, kind, "", SmolStr::new("a.B#m"))
    }

    fn owner() -> TypeHandle {
        TypeHandle::new("com.example.Foo", TypeKind::Class)
    }

    #[test]
    fn test_resolved_records_dependency_only() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let outcome = ResolutionOutcome::ResolvedClassOnly(owner());
        let c = classifier.classify(&reference("Foo", "", MemberKind::ClassOnly), &outcome);
        assert!(c.problem.is_none());
        assert_eq!(c.dependency.as_deref(), Some("com.example.Foo"));
    }

    #[test]
    fn test_null_reference_is_silent() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let c = classifier.classify(
            &reference("null", "x", MemberKind::Field),
            &ResolutionOutcome::IgnoredNullReference,
        );
        assert_eq!(c, Classification::default());
    }

    #[test]
    fn test_unresolved_type() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let c = classifier.classify(
            &reference("Foo", "bar", MemberKind::Method),
            &ResolutionOutcome::UnresolvedType,
        );
        let problem = c.problem.unwrap();
        assert_eq!(problem.problem_type, ProblemType::UnresolvedType);
        assert_eq!(problem.severity, Severity::Error);
        assert_eq!((problem.offset, problem.length), (40, 12));
        assert_eq!(problem.message(), "Referencing class 'Foo': unable to resolve class");
        assert!(c.dependency.is_none());
    }

    #[test]
    fn test_unresolved_member_keeps_dependency() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let c = classifier.classify(
            &reference("Foo", "size", MemberKind::Field),
            &ResolutionOutcome::UnresolvedField { owner: owner() },
        );
        let problem = c.problem.unwrap();
        assert_eq!(problem.problem_type, ProblemType::UnresolvedField);
        assert_eq!(
            problem.message(),
            "Referencing field 'com.example.Foo.size': unable to resolve field"
        );
        assert!(problem.type_dependencies.contains("com.example.Foo"));
        assert_eq!(c.dependency.as_deref(), Some("com.example.Foo"));
    }

    #[test]
    fn test_ambiguous_counts_candidates() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let outcome = ResolutionOutcome::AmbiguousOverload {
            owner: owner(),
            candidates: vec![
                MethodInfo::method("com.example.Foo", "run", vec![]),
                MethodInfo::method("com.example.Foo", "run", vec![]),
            ],
        };
        let c = classifier.classify(&reference("Foo", "run", MemberKind::Method), &outcome);
        assert_eq!(c.problem.unwrap().args[2], "2");
    }

    #[test]
    fn test_ignored_severity_still_records_dependency() {
        let severities =
            ProblemSeverities::new().with_override(ProblemType::UnresolvedMethod, Severity::Ignore);
        let classifier = ProblemClassifier::new(&severities);
        let c = classifier.classify(
            &reference("Foo", "run", MemberKind::Method),
            &ResolutionOutcome::UnresolvedMethod { owner: owner() },
        );
        assert!(c.problem.is_none());
        assert_eq!(c.dependency.as_deref(), Some("com.example.Foo"));
    }

    #[test]
    fn test_malformed_reference() {
        let severities = ProblemSeverities::new();
        let classifier = ProblemClassifier::new(&severities);
        let problem = classifier
            .classify_malformed(&MalformedReference {
                offset: 5,
                length: 6,
                text: "@a.B::".into(),
                reason: MalformedReason::MissingMemberName,
            })
            .unwrap();
        assert_eq!(problem.problem_type, ProblemType::ParseError);
        assert_eq!(problem.severity, Severity::Warning);
        assert_eq!(
            problem.message(),
            "JSNI parse error: expected a member name after '::' in '@a.B::'"
        );
    }
}
