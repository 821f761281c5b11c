use thiserror::Error;

use crate::types::FirmId;

#[derive(Error, Debug)]
pub enum KdsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Firm {firm_id} not found")]
    FirmNotFound { firm_id: FirmId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type KdsResult<T> = Result<T, KdsError>;
