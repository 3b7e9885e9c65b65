//! Error types.
//!
//! Only catalog construction can fail hard, and only for the visual type being
//! loaded. Everything else (unknown actions, unknown pets) is recoverable by
//! the caller. Unresolved sprites and missing asset packs are not errors at
//! all: they surface as `None` / empty results.

use thiserror::Error;

/// Failure while building an [`AnimationCatalog`](crate::resources::animationcatalog::AnimationCatalog).
///
/// No partial catalog is produced when one of these is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read animation description: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed animation description: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("action '{action}': invalid Duration '{value}' (expected a positive integer of milliseconds)")]
    InvalidDuration { action: String, value: String },

    #[error("action '{action}': invalid {attribute} '{value}' (expected \"x,y\")")]
    InvalidPoint {
        action: String,
        attribute: &'static str,
        value: String,
    },
}

/// Errors reported by [`PetEngine`](crate::engine::PetEngine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] ParseError),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown pet '{0}'")]
    UnknownPet(String),

    #[error("a pet named '{0}' already exists")]
    DuplicatePet(String),
}
