//! Exit code logic for the oshima process.
//!
//! Single responsibility: map accepted/failed input counts to the process exit outcome.

use crate::ProcessExit;

/// Determines the exit outcome from accepted and failed input counts.
///
/// An input is the pasted text or one `--file` path.
pub(crate) fn determine_exit_outcome(accepted: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if accepted > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::determine_exit_outcome;
    use crate::ProcessExit;

    #[test]
    fn test_exit_outcome_success_when_no_failures() {
        assert_eq!(determine_exit_outcome(2, 0), ProcessExit::Success);
        assert_eq!(determine_exit_outcome(0, 0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_partial_when_some_files_fail() {
        assert_eq!(determine_exit_outcome(1, 1), ProcessExit::Partial);
    }

    #[test]
    fn test_exit_outcome_failure_when_every_input_failed() {
        assert_eq!(determine_exit_outcome(0, 3), ProcessExit::Failure);
    }
}
