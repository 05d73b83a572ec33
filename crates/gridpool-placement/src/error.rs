//! Placement error types.

use thiserror::Error;

use crate::types::Role;

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Errors produced while building or validating a placement plan.
///
/// All of these are configuration errors: they are deterministic for a
/// given input and retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("invalid cluster shape: {0}")]
    InvalidClusterShape(String),

    #[error("invalid auxiliary pool: {0}")]
    InvalidAuxiliaryPool(String),

    #[error("role {role} is bound to unknown pool: {pool}")]
    UnknownPool { role: Role, pool: String },

    #[error("duplicate pool name: {0}")]
    DuplicatePoolName(String),

    #[error(
        "over-allocation on node {node}: pools request {requested} devices, node has {available}"
    )]
    OverAllocation {
        node: usize,
        requested: u64,
        available: u32,
    },

    #[error("pool {pool} declares {actual} node rows, expected {expected}")]
    PoolShapeMismatch {
        pool: String,
        expected: usize,
        actual: usize,
    },

    #[error("role not bound in placement plan: {0}")]
    UnknownRole(Role),

    #[error("unrecognized role name: {0}")]
    InvalidRoleName(String),
}
