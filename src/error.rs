//! Error types for the statics solvers

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements::NodeId;

/// Broad failure category, so callers can branch without matching every variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rejected before any numeric work
    InvalidConfiguration,
    /// Zero-length members, duplicate node ids
    DegenerateGeometry,
    /// The assembled system has no unique solution
    SingularSystem,
    /// Division by zero or an empty set where a quotient is requested
    Domain,
    /// Payload could not be read or written
    Serialization,
}

/// Main error type for statics operations
#[derive(Error, Debug)]
pub enum StaticsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Node {0} not found in model")]
    NodeNotFound(NodeId),

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Member {member} has zero length (nodes {start} and {end} coincide)")]
    ZeroLengthMember {
        member: usize,
        start: NodeId,
        end: NodeId,
    },

    #[error("Member {member} has invalid properties: {reason}")]
    InvalidMemberProperties { member: usize, reason: String },

    #[error("Singular system - {0}")]
    SingularSystem(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl StaticsError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_)
            | Self::NodeNotFound(_)
            | Self::InvalidMemberProperties { .. } => ErrorKind::InvalidConfiguration,
            Self::DuplicateNode(_) | Self::ZeroLengthMember { .. } => {
                ErrorKind::DegenerateGeometry
            }
            Self::SingularSystem(_) => ErrorKind::SingularSystem,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Serialization(_) | Self::MalformedRequest(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Result type for statics operations
pub type StaticsResult<T> = Result<T, StaticsError>;
