// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use ultranode_kernel::error::KernelError;

use crate::events::{CommitError, EventLogError, ReplayError};
use crate::persistence::PersistenceError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Kernel(KernelError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Missing or malformed signer header")]
    MissingSigner,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
    #[error("Recovery failed: {0}")]
    Replay(#[from] ReplayError),
    #[error("Snapshot error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Internal server error")]
    Internal,
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Kernel(k) => match k {
                KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
                KernelError::UnknownRoot | KernelError::NodeNotFound => StatusCode::NOT_FOUND,
                KernelError::DuplicateRoot
                | KernelError::AlreadyInitialized
                | KernelError::ReplayedProof => StatusCode::CONFLICT,
                KernelError::InvalidProof | KernelError::ProofTooDeep => StatusCode::UNPROCESSABLE_ENTITY,
                KernelError::InvalidInput => StatusCode::BAD_REQUEST,
                KernelError::NotInitialized => StatusCode::PRECONDITION_FAILED,
                KernelError::Overflow => StatusCode::INTERNAL_SERVER_ERROR,
            },
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EngineError::MissingSigner => StatusCode::UNAUTHORIZED,
            EngineError::Io(_)
            | EngineError::EventLog(_)
            | EngineError::Replay(_)
            | EngineError::Persistence(_)
            | EngineError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<KernelError> for EngineError {
    fn from(e: KernelError) -> Self {
        EngineError::Kernel(e)
    }
}

impl From<CommitError> for EngineError {
    fn from(e: CommitError) -> Self {
        match e {
            CommitError::Rejected(k) => EngineError::Kernel(k),
            CommitError::EventLog(l) => EngineError::EventLog(l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (KernelError::Unauthorized, StatusCode::UNAUTHORIZED),
            (KernelError::UnknownRoot, StatusCode::NOT_FOUND),
            (KernelError::DuplicateRoot, StatusCode::CONFLICT),
            (KernelError::ReplayedProof, StatusCode::CONFLICT),
            (KernelError::InvalidProof, StatusCode::UNPROCESSABLE_ENTITY),
            (KernelError::NotInitialized, StatusCode::PRECONDITION_FAILED),
        ];
        for (k, status) in cases {
            assert_eq!(EngineError::from(k).status(), status);
        }
    }

    #[test]
    fn test_commit_rejection_unwraps_kernel_error() {
        let e = EngineError::from(CommitError::Rejected(KernelError::InvalidProof));
        assert!(matches!(e, EngineError::Kernel(KernelError::InvalidProof)));
    }
}
