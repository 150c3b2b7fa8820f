//! Status folding across suites and packages.
//!
//! Exit code aggregation is "last non-zero wins" at both levels: a later
//! failure overwrites the code recorded for an earlier one.

use super::types::{PackageRunResult, RunResult, Status, SuiteSummary};
use crate::exit_codes;

/// Fold suite results left to right into one summary.
pub fn fold_suites<'a, I>(results: I) -> SuiteSummary
where
    I: IntoIterator<Item = &'a RunResult>,
{
    let mut summary = SuiteSummary {
        status: Status::Success,
        exit_code: exit_codes::OK,
    };
    for result in results {
        if result.exit_code != exit_codes::OK {
            summary.exit_code = result.exit_code;
            summary.status = Status::Failure;
        } else if result.status == Status::Failure {
            summary.status = Status::Failure;
        } else if result.status == Status::Warning && summary.status == Status::Success {
            summary.status = Status::Warning;
        }
    }
    summary
}

/// Package status implied by its suite summary.
pub fn package_status(summary: &SuiteSummary) -> Status {
    match summary.status {
        Status::Failure => Status::Failure,
        _ if summary.exit_code != exit_codes::OK => Status::Failure,
        Status::Warning => Status::Warning,
        _ => Status::Success,
    }
}

/// Process exit code for one package result.
///
/// The tool's own non-zero code propagates; otherwise a failing status maps to
/// [`exit_codes::FAILURE`].
pub fn package_exit_code(result: &PackageRunResult) -> i32 {
    if let Some(summary) = &result.summary
        && summary.exit_code != exit_codes::OK
    {
        return summary.exit_code;
    }
    if result.status.is_failing() {
        exit_codes::FAILURE
    } else {
        exit_codes::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(status: Status, exit_code: i32) -> RunResult {
        RunResult {
            status,
            exit_code,
            resolved_path: None,
        }
    }

    #[test]
    fn warning_without_failure_is_warning() {
        let results = [
            run(Status::Success, 0),
            run(Status::Warning, 0),
            run(Status::Success, 0),
        ];
        let summary = fold_suites(&results);
        assert_eq!(summary.status, Status::Warning);
        assert_eq!(package_status(&summary), Status::Warning);
    }

    #[test]
    fn failing_suite_code_survives_later_success() {
        let results = [
            run(Status::Success, 0),
            run(Status::Failure, 2),
            run(Status::Success, 0),
        ];
        let summary = fold_suites(&results);
        assert_eq!(summary.status, Status::Failure);
        assert_eq!(summary.exit_code, 2);
    }

    #[test]
    fn later_failure_overwrites_earlier_code() {
        let results = [run(Status::Failure, 2), run(Status::Error, 1)];
        assert_eq!(fold_suites(&results).exit_code, 1);
    }

    #[test]
    fn warning_after_failure_stays_failure() {
        let results = [run(Status::Failure, 3), run(Status::Warning, 0)];
        assert_eq!(fold_suites(&results).status, Status::Failure);
    }

    #[test]
    fn exit_code_prefers_tool_code_then_status() {
        let failed = PackageRunResult {
            name: "a".to_string(),
            version: "N/A".to_string(),
            status: Status::Failure,
            suite_results: vec![RunResult {
                status: Status::Failure,
                exit_code: 255,
                resolved_path: None,
            }],
            summary: Some(SuiteSummary {
                status: Status::Failure,
                exit_code: 255,
            }),
        };
        assert_eq!(package_exit_code(&failed), 255);

        let missing = PackageRunResult::short_circuit("a", "N/A", Status::NotInstalled);
        assert_eq!(package_exit_code(&missing), exit_codes::FAILURE);

        let warned = PackageRunResult::short_circuit("a", "N/A", Status::Warning);
        assert_eq!(package_exit_code(&warned), exit_codes::OK);
    }
}
