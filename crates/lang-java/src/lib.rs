//! JSNI reference validation for Java sources.
//!
//! Native methods carry JavaScript bodies in `/*-{ ... }-*/` comments. Those
//! bodies reach back into Java through references such as
//! `@com.example.Widget::fire(I)`. This crate finds the blocks, parses the
//! references, resolves them against a [`jsniscope_api::TypeIndex`], and turns
//! every failure into a [`problem::Problem`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod naming;
pub mod parser;
pub mod problem;
pub mod resolver;
pub mod result;
pub mod validator;

pub use classifier::{Classification, ProblemClassifier};
pub use config::ProblemSeverities;
pub use error::{JsniError, Result};
pub use index::StaticTypeIndex;
pub use model::{CompilationUnit, JsniMethod, JsniReference, MemberKind};
pub use parser::{JavaSourceParser, parse_references};
pub use problem::{MARKER_TYPE, Marker, Problem, ProblemType, Severity};
pub use resolver::{JsniResolver, TypeResolution};
pub use result::ValidationResult;
pub use validator::JsniValidator;
