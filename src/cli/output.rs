//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Exit status for usage errors (bad input, unknown agent).
pub const EXIT_USAGE: i32 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    if e.is_usage() {
        format!("error: {}\n\nRun `bazaar --help` for usage.", e)
    } else {
        format!("error: {}", e)
    }
}

pub fn exit_code(e: &ApiError) -> i32 {
    if e.is_usage() {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}
