use thiserror::Error;

/// Hard failures surfaced by the mutation orchestrator.
///
/// Validation problems are not errors - they come back as
/// `MutationOutcome::Rejected`. This type only covers collaborator
/// failures, which propagate per the collaborator's own contract.
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
