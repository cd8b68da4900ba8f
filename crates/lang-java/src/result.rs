use crate::model::JsniReference;
use crate::problem::{Marker, Problem, Severity};
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// Everything JSNI validation produced for one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    path: PathBuf,
    java_refs: Vec<JsniReference>,
    problems: Vec<Problem>,
    type_dependencies: IndexSet<String>,
}

impl ValidationResult {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn add_all_java_refs(&mut self, refs: impl IntoIterator<Item = JsniReference>) {
        self.java_refs.extend(refs);
    }

    pub fn add_all_problems(&mut self, problems: impl IntoIterator<Item = Problem>) {
        self.problems.extend(problems);
    }

    /// Suppressed (`None`) problems are dropped.
    pub fn add_problem(&mut self, problem: impl Into<Option<Problem>>) {
        if let Some(problem) = problem.into() {
            self.problems.push(problem);
        }
    }

    pub fn add_type_dependency(&mut self, fqn: impl Into<String>) {
        self.type_dependencies.insert(fqn.into());
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn java_refs(&self) -> &[JsniReference] {
        &self.java_refs
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Resolved type FQNs in first-seen order, without duplicates.
    pub fn type_dependencies(&self) -> &IndexSet<String> {
        &self.type_dependencies
    }

    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.problems.iter().map(Marker::from)
    }

    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(|p| p.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.java_refs.is_empty() && self.problems.is_empty() && self.type_dependencies.is_empty()
    }
}
