use thiserror::Error;

use crate::model::EntityKind;

#[derive(Error, Debug)]
pub enum CatedraError {
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Duplicate id in {kind}: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CatedraError>;
