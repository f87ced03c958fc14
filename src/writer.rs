//! This module is the output sink: it serializes a completed run (the
//! configuration trace, the terminal result, and the step count) to a
//! destination file.

use crate::machine::Execution;
use crate::types::SimulatorError;
use std::fs;
use std::path::Path;

const SEPARATOR_WIDTH: usize = 50;

/// Writes the report for a completed run to `path`: a header, one
/// configuration per line, and the result block.
pub fn write_report(path: &Path, execution: &Execution) -> Result<(), SimulatorError> {
    fs::write(path, render_report(execution)).map_err(|e| {
        SimulatorError::File(format!("failed to write {}: {}", path.display(), e))
    })
}

/// Renders the report as a string, separated from the file write so tests
/// and other sinks can reuse it.
pub fn render_report(execution: &Execution) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    out.push_str("TURING MACHINE CONFIGURATIONS\n");
    out.push_str(&separator);
    out.push_str("\n\n");

    for configuration in &execution.configurations {
        out.push_str(configuration);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format!("RESULT: {}\n", execution.outcome));
    out.push_str(&format!("Steps: {}\n", execution.steps));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;
    use tempfile::tempdir;

    fn sample_execution() -> Execution {
        Execution {
            configurations: vec!["q0101".to_string(), "1q001".to_string()],
            outcome: Outcome::Accepted,
            steps: 1,
        }
    }

    #[test]
    fn test_render_contains_trace_and_result() {
        let report = render_report(&sample_execution());

        assert!(report.contains("q0101\n1q001\n"));
        assert!(report.contains("RESULT: ACCEPTED"));
        assert!(report.contains("Steps: 1"));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_report(&path, &sample_execution()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_report(&sample_execution()));
    }

    #[test]
    fn test_write_report_to_unwritable_path_fails() {
        let execution = sample_execution();
        let result = write_report(Path::new("/nonexistent/dir/out.txt"), &execution);

        assert!(matches!(result, Err(SimulatorError::File(_))));
    }
}
