//! Common types and utilities shared across wordhunt crates.
//!
//! This crate defines the shared error taxonomy, the listing tie-break policy
//! and observability helpers used throughout the wordhunt workspace. It is
//! intentionally lightweight so that every crate can depend on it.
//!
//! # Overview
//!
//! - [`WordhuntError`] and [`Result`]: shared error handling
//! - [`TieBreak`]: how equal counts are ordered in a full listing
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use wordhunt_common::{TieBreak, WordhuntError};
//!
//! assert_eq!(TieBreak::default(), TieBreak::Lexical);
//! assert_eq!(WordhuntError::MissingUrl.to_string(), "no web page entered");
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Ordering applied to words that share the same count in a full listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Equal counts are ordered alphabetically (byte order).
    #[default]
    Lexical,
    /// Equal counts keep whatever order an unstable sort leaves them in.
    Unspecified,
}

/// Error types used across the wordhunt system.
#[derive(thiserror::Error, Debug)]
pub enum WordhuntError {
    /// No URL was supplied on the command line.
    #[error("no web page entered")]
    MissingUrl,

    /// The request could not be built or sent.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read to the end.
    #[error("read error: {0}")]
    Read(String),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Console input or output failed.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient alias for results that use [`WordhuntError`].
pub type Result<T> = std::result::Result<T, WordhuntError>;
