use crate::error::{JsniError, Result};
use crate::problem::{Problem, ProblemType, Severity};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Per-problem-type severity overrides on top of the built-in defaults.
///
/// Loaded from JSON keyed by problem key:
///
/// ```json
/// { "JSNI_JAVA_REF_UNRESOLVED_FIELD": "WARNING", "JSNI_PARSE_ERROR": "IGNORE" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSeverities {
    overrides: HashMap<ProblemType, Severity>,
}

impl ProblemSeverities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, problem_type: ProblemType, severity: Severity) -> Self {
        self.overrides.insert(problem_type, severity);
        self
    }

    pub fn severity_of(&self, problem_type: ProblemType) -> Severity {
        self.overrides
            .get(&problem_type)
            .copied()
            .unwrap_or_else(|| problem_type.default_severity())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Severity> = serde_json::from_str(json)?;
        let mut severities = Self::new();
        for (key, severity) in raw {
            let problem_type = ProblemType::from_key(&key)
                .ok_or_else(|| JsniError::Config(format!("unknown problem type '{}'", key)))?;
            severities.overrides.insert(problem_type, severity);
        }
        Ok(severities)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let severities = Self::from_json_str(&json)?;
        debug!(path = %path.display(), overrides = severities.overrides.len(), "loaded problem severities");
        Ok(severities)
    }

    /// Build a problem with the configured severity. `None` when the type is ignored.
    pub fn create(
        &self,
        problem_type: ProblemType,
        offset: usize,
        length: usize,
        args: Vec<String>,
    ) -> Option<Problem> {
        match self.severity_of(problem_type) {
            Severity::Ignore => None,
            severity => Some(Problem::new(problem_type, severity, offset, length, args)),
        }
    }
}
