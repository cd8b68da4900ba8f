use jsniscope_java::{
    CompilationUnit, JavaSourceParser, JsniValidator, Marker, ProblemSeverities, Result, Severity,
    StaticTypeIndex, ValidationResult,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

/// Parsed units with their validation results, in input order.
pub struct CheckReport {
    pub units: Vec<CompilationUnit>,
    pub results: Vec<ValidationResult>,
}

/// A terminal view of one problem.
#[derive(Tabled)]
pub struct ProblemView {
    pub location: String,
    pub severity: String,
    pub id: u32,
    pub message: String,
}

#[derive(Serialize)]
pub struct FileMarker {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    #[serde(flatten)]
    pub marker: Marker,
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

pub fn check_files(
    files: &[PathBuf],
    index_path: &Path,
    severities_path: Option<&Path>,
) -> Result<CheckReport> {
    let index = StaticTypeIndex::from_json_file(index_path)?;
    let severities = match severities_path {
        Some(path) => ProblemSeverities::from_json_file(path)?,
        None => ProblemSeverities::new(),
    };

    let parser = JavaSourceParser::new();
    let units = files
        .iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)?;
            parser.parse_unit(path.clone(), source)
        })
        .collect::<Result<Vec<_>>>()?;

    let results = JsniValidator::new(&index, &severities).validate_units(&units);
    info!(files = units.len(), "check finished");
    Ok(CheckReport { units, results })
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.results
            .iter()
            .flat_map(|r| r.problems())
            .filter(|p| p.severity == Severity::Error)
            .count()
    }

    pub fn problem_count(&self) -> usize {
        self.results.iter().map(|r| r.problems().len()).sum()
    }

    pub fn markers(&self) -> Vec<FileMarker> {
        self.units
            .iter()
            .zip(&self.results)
            .flat_map(|(unit, result)| {
                result.markers().map(move |marker| {
                    let (line, column) = line_col(&unit.source, marker.offset);
                    FileMarker {
                        path: unit.path.clone(),
                        line,
                        column,
                        marker,
                    }
                })
            })
            .collect()
    }

    pub fn views(&self) -> Vec<ProblemView> {
        self.markers()
            .into_iter()
            .map(|m| ProblemView {
                location: format!("{}:{}:{}", m.path.display(), m.line, m.column),
                severity: m.marker.severity.to_string(),
                id: m.marker.id,
                message: m.marker.message,
            })
            .collect()
    }
}

pub fn run(
    files: &[PathBuf],
    index_path: &Path,
    severities_path: Option<&Path>,
    json: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let report = check_files(files, index_path, severities_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.markers())?);
    } else if report.problem_count() == 0 {
        println!("No JSNI problems in {} file(s).", report.units.len());
    } else {
        println!("{}", Table::new(report.views()).with(Style::psql()));
    }

    match report.error_count() {
        0 => Ok(()),
        n => Err(format!("{} JSNI error(s) found", n).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "ab\ncd\nef";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 4), (2, 2));
        assert_eq!(line_col(source, 6), (3, 1));
        assert_eq!(line_col(source, 100), (3, 3));
    }
}
