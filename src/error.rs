//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! metadata repository. It uses the `thiserror` library to create a small
//! `Error` enum covering the few failure modes the merge algebra has,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant corresponds to a specific precondition or contract violation
//!   and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the crate to simplify function signatures.
//!
//! Duplicate properties, duplicate sources, empty repositories and empty
//! includes are *not* errors: they are the normal input of the merge algebra
//! and resolve under first-writer-wins. Every failing operation is atomic
//! and leaves the repository in the state it had before the call.

use thiserror::Error;

/// Main error type for metadata repository operations
#[derive(Error, Debug)]
pub enum Error {
    /// A property was registered against a source whose group has not been
    /// registered.
    ///
    /// The owning source must be registered through `add_sources` before
    /// properties can be attached to it.
    #[error("Unknown group: {group_id} (register the owning source first)")]
    UnknownGroup { group_id: String },

    /// A mutation was attempted through the read-only group view.
    #[error("Read-only group view: {operation} is not supported")]
    ImmutableView { operation: String },

    /// A property carried an empty identifier.
    #[error("Property identifier must not be empty")]
    EmptyPropertyId,

    /// A source carried an empty group identifier.
    #[error("Source group identifier must not be empty")]
    EmptyGroupId,

    /// A source carried an empty type identifier.
    ///
    /// A source may omit its type entirely, but a present type must name the
    /// binding target.
    #[error("Source type in group {group_id} must not be empty")]
    EmptySourceType { group_id: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
