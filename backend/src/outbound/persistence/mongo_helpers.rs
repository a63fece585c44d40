//! Shared helpers for the MongoDB repository adapters.

use bson::{Document, doc};
use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code raised when a unique index rejects a write.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether the error is a unique-index violation.
pub(crate) fn is_duplicate_key(error: &Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Whether the error means the store could not be reached at all, as opposed
/// to a reachable store rejecting the operation.
pub(crate) fn is_connection_failure(error: &Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_)
    )
}

/// Build the listing filter: a case-insensitive substring match on `name`
/// when a filter is present, everything otherwise. The input is escaped so
/// filter text never reaches the store as a pattern.
pub(crate) fn name_filter_document(name_filter: Option<String>) -> Document {
    match name_filter {
        Some(name) => doc! { "name": { "$regex": regex::escape(&name), "$options": "i" } },
        None => doc! {},
    }
}
