//! Host-side handling of fatal heap conditions.
//!
//! Root-stack overflow and underflow have no recovery path. A host reports
//! which one happened and terminates with a status that tells them apart
//! ([`StackError::exit_code`]). Other heap errors (stale or mistyped
//! handles) are host bugs and terminate with [`HOST_ERROR_EXIT_CODE`].

use midden_core::{HeapError, StackError};

/// Exit status for heap errors that are not stack conditions.
pub const HOST_ERROR_EXIT_CODE: i32 = 1;

/// The one-line diagnostic written before aborting.
pub fn diagnostic(err: &HeapError) -> String {
    match err {
        HeapError::Stack(StackError::Overflow { capacity }) => {
            format!("midden: fatal: root stack overflow (capacity {capacity})")
        }
        HeapError::Stack(StackError::Underflow) => {
            "midden: fatal: root stack underflow".to_string()
        }
        other => format!("midden: fatal: {other}"),
    }
}

/// Exit status for `err`.
pub fn exit_code(err: &HeapError) -> i32 {
    match err {
        HeapError::Stack(e) => e.exit_code(),
        _ => HOST_ERROR_EXIT_CODE,
    }
}

/// Report a stack error and terminate the process.
pub fn abort_on_stack_error(err: StackError) -> ! {
    abort_on_heap_error(err.into())
}

/// Report a heap error and terminate the process.
pub fn abort_on_heap_error(err: HeapError) -> ! {
    log::error!("{err}");
    eprintln!("{}", diagnostic(&err));
    std::process::exit(exit_code(&err))
}

/// Unwrap a heap result or abort the process with a diagnostic.
pub trait OrAbort<T> {
    /// The success value, or process termination.
    fn or_abort(self) -> T;
}

impl<T> OrAbort<T> for Result<T, StackError> {
    fn or_abort(self) -> T {
        self.unwrap_or_else(|e| abort_on_stack_error(e))
    }
}

impl<T> OrAbort<T> for Result<T, HeapError> {
    fn or_abort(self) -> T {
        self.unwrap_or_else(|e| abort_on_heap_error(e))
    }
}
