//! Problem kinds raised by JSNI validation and the markers they render to.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MARKER_TYPE: &str = "jsniscope.jsniProblemMarker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Ignore,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Ignore => "IGNORE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemType {
    #[serde(rename = "JSNI_PARSE_ERROR")]
    ParseError,
    #[serde(rename = "JSNI_JAVA_REF_UNRESOLVED_TYPE")]
    UnresolvedType,
    #[serde(rename = "JSNI_JAVA_REF_UNRESOLVED_METHOD")]
    UnresolvedMethod,
    #[serde(rename = "JSNI_JAVA_REF_UNRESOLVED_FIELD")]
    UnresolvedField,
    #[serde(rename = "JSNI_JAVA_REF_AMBIGUOUS")]
    Ambiguous,
}

struct ProblemInfo {
    id: u32,
    key: &'static str,
    template: &'static str,
    default_severity: Severity,
}

const fn info(
    id: u32,
    key: &'static str,
    template: &'static str,
    default_severity: Severity,
) -> ProblemInfo {
    ProblemInfo {
        id,
        key,
        template,
        default_severity,
    }
}

static PARSE_ERROR: ProblemInfo = info(201, "JSNI_PARSE_ERROR", "JSNI parse error: {0}", Severity::Warning);
static UNRESOLVED_TYPE: ProblemInfo = info(
    202,
    "JSNI_JAVA_REF_UNRESOLVED_TYPE",
    "Referencing class '{0}': unable to resolve class",
    Severity::Error,
);
static UNRESOLVED_METHOD: ProblemInfo = info(
    203,
    "JSNI_JAVA_REF_UNRESOLVED_METHOD",
    "Referencing method '{0}.{1}': unable to resolve method",
    Severity::Error,
);
static UNRESOLVED_FIELD: ProblemInfo = info(
    204,
    "JSNI_JAVA_REF_UNRESOLVED_FIELD",
    "Referencing field '{0}.{1}': unable to resolve field",
    Severity::Error,
);
static AMBIGUOUS: ProblemInfo = info(
    205,
    "JSNI_JAVA_REF_AMBIGUOUS",
    "Referencing method '{0}.{1}': reference is ambiguous, {2} overloads match",
    Severity::Error,
);

impl ProblemType {
    pub const ALL: [ProblemType; 5] = [
        ProblemType::ParseError,
        ProblemType::UnresolvedType,
        ProblemType::UnresolvedMethod,
        ProblemType::UnresolvedField,
        ProblemType::Ambiguous,
    ];

    fn info(self) -> &'static ProblemInfo {
        match self {
            ProblemType::ParseError => &PARSE_ERROR,
            ProblemType::UnresolvedType => &UNRESOLVED_TYPE,
            ProblemType::UnresolvedMethod => &UNRESOLVED_METHOD,
            ProblemType::UnresolvedField => &UNRESOLVED_FIELD,
            ProblemType::Ambiguous => &AMBIGUOUS,
        }
    }

    /// Stable integer id carried by markers.
    pub fn id(self) -> u32 {
        self.info().id
    }

    /// Preference key, e.g. `JSNI_JAVA_REF_UNRESOLVED_TYPE`.
    pub fn key(self) -> &'static str {
        self.info().key
    }

    pub fn default_severity(self) -> Severity {
        self.info().default_severity
    }

    pub fn marker_type(self) -> &'static str {
        MARKER_TYPE
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Fill the `{n}` placeholders of the message template.
    pub fn render_message<S: AsRef<str>>(self, args: &[S]) -> String {
        let mut message = self.info().template.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg.as_ref());
        }
        message
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A diagnostic at a byte range of a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub problem_type: ProblemType,
    pub severity: Severity,
    pub offset: usize,
    pub length: usize,
    pub args: Vec<String>,
    /// Types whose change should re-trigger validation of this site
    pub type_dependencies: IndexSet<String>,
}

impl Problem {
    pub fn new(
        problem_type: ProblemType,
        severity: Severity,
        offset: usize,
        length: usize,
        args: Vec<String>,
    ) -> Self {
        Self {
            problem_type,
            severity,
            offset,
            length,
            args,
            type_dependencies: IndexSet::new(),
        }
    }

    pub fn with_type_dependency(mut self, fqn: impl Into<String>) -> Self {
        self.type_dependencies.insert(fqn.into());
        self
    }

    pub fn id(&self) -> u32 {
        self.problem_type.id()
    }

    pub fn message(&self) -> String {
        self.problem_type.render_message(&self.args)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.problem_type, self.message())
    }
}

/// Editor-facing rendering of a [`Problem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub marker_type: &'static str,
    pub id: u32,
    pub key: &'static str,
    pub severity: Severity,
    pub message: String,
    pub offset: usize,
    pub length: usize,
}

impl From<&Problem> for Marker {
    fn from(problem: &Problem) -> Self {
        Self {
            marker_type: problem.problem_type.marker_type(),
            id: problem.id(),
            key: problem.problem_type.key(),
            severity: problem.severity,
            message: problem.message(),
            offset: problem.offset,
            length: problem.length,
        }
    }
}
