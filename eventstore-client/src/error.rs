use thiserror::Error;

use crate::options::{CurrentRevision, ExpectedRevision};
use crate::status::{Code, Status};

/// Errors surfaced by the public operations, in order of specificity.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An append or delete expectation did not hold.
    #[error("wrong expected revision: expected {expected}, current {current}")]
    WrongExpectedRevision {
        expected: ExpectedRevision,
        current: CurrentRevision,
    },
    /// Any non-ok gRPC status received from the server.
    #[error(transparent)]
    Grpc(Status),
    /// Socket or engine failure; terminal for the whole connection.
    #[error("transport failure: {0}")]
    Transport(Status),
    /// The request deadline elapsed before a terminal status.
    #[error("deadline elapsed before the request completed")]
    Timeout,
    /// Cancellation requested by the caller or by a peer RST_STREAM.
    #[error("request cancelled")]
    Cancelled,
    /// Malformed response payload; terminates just the offending request.
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
}

impl From<http::uri::InvalidUri> for ClientError {
    fn from(err: http::uri::InvalidUri) -> ClientError {
        ClientError::Grpc(Status::new(
            Code::InvalidArgument,
            format!("invalid authority: {}", err),
        ))
    }
}

impl From<Status> for ClientError {
    fn from(status: Status) -> ClientError {
        if status.is_transport() {
            return ClientError::Transport(status);
        }
        match status.code() {
            Code::Cancelled => ClientError::Cancelled,
            Code::DeadlineExceeded => ClientError::Timeout,
            _ => ClientError::Grpc(status),
        }
    }
}

impl ClientError {
    pub(crate) fn transport(message: impl Into<String>) -> ClientError {
        ClientError::Transport(Status::transport(message))
    }

    /// The gRPC status code, for errors that carry one.
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Grpc(status) | ClientError::Transport(status) => Some(status.code()),
            ClientError::Cancelled => Some(Code::Cancelled),
            ClientError::Timeout => Some(Code::DeadlineExceeded),
            _ => None,
        }
    }
}
