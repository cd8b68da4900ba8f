use crate::classifier::ProblemClassifier;
use crate::config::ProblemSeverities;
use crate::error::Result;
use crate::model::{CompilationUnit, JsniMethod};
use crate::parser::{JSNI_BLOCK_END, JsniScanner, JsniToken};
use crate::resolver::JsniResolver;
use crate::result::ValidationResult;
use jsniscope_api::{ImportContext, TypeIndex};
use rayon::prelude::*;
use tracing::{info, warn};

/// Validates the JSNI blocks of compilation units against a type index.
///
/// Holds no mutable state; one validator can serve any number of units and threads.
pub struct JsniValidator<'a, I: ?Sized> {
    index: &'a I,
    severities: &'a ProblemSeverities,
}

impl<'a, I: TypeIndex + ?Sized> JsniValidator<'a, I> {
    pub fn new(index: &'a I, severities: &'a ProblemSeverities) -> Self {
        Self { index, severities }
    }

    /// Validate one unit. Index failures abort the unit and are returned.
    pub fn validate_unit(&self, unit: &CompilationUnit) -> Result<ValidationResult> {
        let resolver = JsniResolver::new(self.index);
        let classifier = ProblemClassifier::new(self.severities);
        let mut result = ValidationResult::new(unit.path());

        for method in &unit.jsni_methods {
            let context = unit.import_context(method);
            self.validate_method(method, &context, &resolver, &classifier, &mut result)?;
        }

        info!(
            path = %unit.path().display(),
            refs = result.java_refs().len(),
            problems = result.problems().len(),
            "validated JSNI"
        );
        Ok(result)
    }

    fn validate_method(
        &self,
        method: &JsniMethod,
        context: &ImportContext,
        resolver: &JsniResolver<'a, I>,
        classifier: &ProblemClassifier<'_>,
        result: &mut ValidationResult,
    ) -> Result<()> {
        if !method.is_native {
            result.add_problem(classifier.parse_error(
                method.block_offset,
                method.block_length,
                &format!("JSNI block on non-native method '{}'", method.name),
            ));
        }
        if !method.terminated {
            result.add_problem(classifier.parse_error(
                method.block_offset,
                method.block_length,
                &format!("unterminated JSNI block, expected '{}'", JSNI_BLOCK_END),
            ));
            return Ok(());
        }

        let owner = method.owner_key();
        for token in JsniScanner::new(&method.body, method.body_offset, &owner) {
            match token {
                JsniToken::Malformed(malformed) => {
                    result.add_problem(classifier.classify_malformed(&malformed));
                }
                JsniToken::Reference(reference) => {
                    let outcome = resolver.resolve(&reference, context)?;
                    let classification = classifier.classify(&reference, &outcome);
                    if let Some(dep) = classification.dependency {
                        result.add_type_dependency(dep);
                    }
                    result.add_problem(classification.problem);
                    result.add_all_java_refs([reference]);
                }
            }
        }
        Ok(())
    }

    /// Validate one unit; an index failure is logged and yields an empty result.
    pub fn validate_or_skip(&self, unit: &CompilationUnit) -> ValidationResult {
        match self.validate_unit(unit) {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    path = %unit.path().display(),
                    error = %e,
                    "skipping JSNI validation for unit"
                );
                ValidationResult::new(unit.path())
            }
        }
    }

    /// Validate units in parallel. Results keep the order of `units`.
    pub fn validate_units(&self, units: &[CompilationUnit]) -> Vec<ValidationResult> {
        units.par_iter().map(|unit| self.validate_or_skip(unit)).collect()
    }
}
