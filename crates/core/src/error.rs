use crate::types::DbId;

/// A recoverable precondition failure in the training lifecycle.
///
/// Every variant has a stable machine-readable [`code`](TrainingError::code)
/// for clients and a human-readable `Display` message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainingError {
    #[error("Already training")]
    AlreadyTraining,

    #[error("No tickets left today")]
    NoTickets,

    #[error("Unknown training {id}")]
    UnknownTraining { id: DbId },

    #[error("Training not finished yet ({remaining_ms} ms remaining)")]
    TrainingNotFinished { remaining_ms: i64 },

    #[error("No active training")]
    NoActiveTraining,

    #[error("Cannot exceed max tickets")]
    MaxTickets,

    #[error("No whistles available")]
    NoWhistles,
}

impl TrainingError {
    /// Stable error code sent to clients alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            TrainingError::AlreadyTraining => "ALREADY_TRAINING",
            TrainingError::NoTickets => "NO_TICKETS",
            TrainingError::UnknownTraining { .. } => "UNKNOWN_TRAINING",
            TrainingError::TrainingNotFinished { .. } => "TRAINING_NOT_FINISHED",
            TrainingError::NoActiveTraining => "NO_ACTIVE_TRAINING",
            TrainingError::MaxTickets => "MAX_TICKETS",
            TrainingError::NoWhistles => "NO_WHISTLES",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Catalog or seed data is inconsistent (e.g. a role has no special
    /// training). Never caused by player input.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error("Internal error: {0}")]
    Internal(String),
}
