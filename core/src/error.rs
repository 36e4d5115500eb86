//! Error taxonomy for virtual tree materialization.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while materializing or reconciling a virtual tree.
///
/// Lifecycle hooks and render functions are infallible by contract; a panic inside one of
/// them propagates to the caller unchanged and may leave the live tree partially patched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The virtual value is neither a recognized primitive nor a well-formed node.
    #[error("invalid virtual tree: {0}")]
    InvalidVirtualTree(String),
}

impl Error {
    /// Builds an [`Error::InvalidVirtualTree`] with the given description.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidVirtualTree(reason.into())
    }
}
