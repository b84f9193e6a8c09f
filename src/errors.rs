//! Unified error type for the blog data layer.
//!
//! Every write operation reports failures synchronously through [`Result`].
//! Storage-layer constraint failures are translated into the domain variants
//! below wherever the caller can act on them.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All errors produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying database failure that has no domain meaning
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A unique column already holds the given value
    #[error("Duplicate {field}: '{value}' is already in use")]
    UniquenessViolation {
        /// Column that collided (e.g. `url`, `reaction_id`)
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Concurrent writers kept taking every slug candidate we probed
    #[error("Could not find a free slug for '{base}' after {attempts} attempts")]
    SlugRetriesExhausted {
        /// Base slug the probe started from
        base: String,
        /// Number of write attempts made
        attempts: u32,
    },

    /// A second blog configuration was about to be created
    #[error("Only one blog configuration is allowed")]
    SingletonViolation,

    /// Referenced blog entry does not exist
    #[error("Blog entry not found: {id}")]
    EntryNotFound {
        /// Entry id that was referenced
        id: i64,
    },

    /// Any other row looked up by identity that does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row (e.g. `"comment"`)
        entity: &'static str,
        /// Identity that was looked up
        id: String,
    },

    /// Caller supplied a malformed field
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Field that failed validation
        field: &'static str,
        /// What was wrong with it
        message: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidField`]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }
}

/// Returns true when the database rejected a write because of a unique index
/// or primary key collision.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true when the database rejected a write because a foreign key
/// points at a missing row.
#[must_use]
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Crate-wide `Result` with [`Error`] as the error type
pub type Result<T> = std::result::Result<T, Error>;
