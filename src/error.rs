//! Error taxonomy for the conversion pipeline.

use crate::executor::ExecutionError;
use dynamodb_types::DocumentError;
use thiserror::Error;

/// Error converting one change record into relational rows.
///
/// Parser-level errors never self-recover; they bubble up to the
/// orchestrator, which aborts the current record's conversion and rolls back
/// its open transaction. The stream processor then reports a per-record
/// failure and moves on to the next record in the batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A required field was absent or mis-typed in the document image.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A structurally valid field carried unparseable timestamp text.
    #[error("field {field}: invalid timestamp '{value}'")]
    InvalidTimestamp { field: String, value: String },

    /// The execution collaborator failed a write for this record.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// A change record without a usable new image, under the `Reject` policy.
    #[error("change type '{kind}' carries no usable document image")]
    UnsupportedChange { kind: String },
}
