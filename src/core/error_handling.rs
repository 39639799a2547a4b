//! Error reporting helpers
//!
//! Separates errors a user can fix (bad config, empty queue, timeouts) from
//! system failures (store I/O, corrupt metadata) when reporting them.

/// Errors that know whether they are actionable by the user
///
/// When `is_user_actionable()` is `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True if the error carries a message worth showing verbatim
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Log an error with detail matched to who can act on it
///
/// User-actionable errors log their own message; system errors log the
/// operation context. Full detail always goes to debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(message) => log::error!("{}: {}", operation_context, message),
        None => log::error!("{} failed: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Process exit code for an error
///
/// Mirrors sysexits: 75 (EX_TEMPFAIL) for conditions worth retrying,
/// 78 (EX_CONFIG) for configuration problems, 74 (EX_IOERR) otherwise.
pub fn exit_code_for(error: &crate::queue::QueueError) -> i32 {
    use crate::queue::QueueError;

    match error {
        e if e.is_wait_interrupted() => 75,
        QueueError::Empty | QueueError::Full { .. } => 75,
        QueueError::Config { .. } => 78,
        _ => 74,
    }
}
