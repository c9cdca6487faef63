//! Errors raised by shape construction and scene operations.
//!
//! Every variant carries the offending name or parameter verbatim so the
//! caller can report it as is. None of them is transient.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Non-positive dimension, non-finite coordinate or degenerate line.
    #[error("invalid {kind}: {reason}")]
    InvalidGeometry {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("name is blank or already in use: `{0}`")]
    DuplicateName(String),

    #[error("shape not found: `{0}`")]
    NotFound(String),

    #[error("shape is not a group: `{0}`")]
    NotAGroup(String),

    /// The shape is nested in a live group, or was listed twice for one group.
    #[error("shape is already in a group: `{0}`")]
    AlreadyGrouped(String),

    #[error("group `{name}` needs at least {required} member(s), got {given}")]
    TooFewMembers {
        name: String,
        required: usize,
        given: usize,
    },
}

pub type Result<T> = std::result::Result<T, SceneError>;
