//! Walk error types.

use thiserror::Error;

/// Boxed error raised by an observer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for walk operations.
pub type Result<T> = std::result::Result<T, WalkError>;

/// Errors that end a walk.
///
/// A stop requested by an observer is not an error and never shows up here.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A reference was reached twice while walking in `finiteTree` mode.
    #[error(
        "Structural violation at '{path}': value was reached more than once. \
         Override 'graphMode' to walk shared or cyclic structures."
    )]
    StructuralViolation {
        /// Path of the node holding the repeated reference.
        path: String,
    },

    /// Malformed or contradictory configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An observer failed.
    #[error("Observer failed: {0}")]
    Observer(#[source] BoxError),
}

impl WalkError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a structural violation for the given path.
    pub fn structural(path: impl Into<String>) -> Self {
        Self::StructuralViolation { path: path.into() }
    }
}

/// Signal returned by an observer to interrupt the walk.
#[derive(Debug, Error)]
pub enum Interrupt {
    /// End the walk early. The walk finishes cleanly, just short.
    #[error("walk stopped by observer")]
    Stop,

    /// Abort the walk with an error.
    #[error("{0}")]
    Failed(#[source] BoxError),
}

impl Interrupt {
    /// Wraps an observer failure.
    pub fn fail(error: impl Into<BoxError>) -> Self {
        Self::Failed(error.into())
    }
}

/// Return type of every observer callback.
pub type ObserverResult = std::result::Result<(), Interrupt>;

/// Shorthand for `Err(Interrupt::Stop)`.
#[inline]
pub fn stop() -> ObserverResult {
    Err(Interrupt::Stop)
}
