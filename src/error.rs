//! Error types for table compilation and name collection.

use thiserror::Error;

/// Errors that terminate compilation of a single type.
///
/// None of these leave a partial descriptor behind. The caller decides whether
/// one failing type aborts the whole generation run.
#[derive(Debug, Error)]
pub enum Error {
    /// No constants were collected for the requested type.
    #[error("no values defined for type {type_name}")]
    EmptyInput {
        /// Display name of the type being compiled.
        type_name: String,
    },

    /// A constant of a non-integer kind reached collection.
    #[error("can't handle non-integer constant {name} of kind {kind}")]
    NonIntegerConstant {
        /// Name of the offending constant.
        name: String,
        /// The kind reported by the scanner (e.g. "float", "string").
        kind: String,
    },

    /// Records of one type disagree on signedness.
    #[error("constant {name} of type {type_name} differs in signedness from the rest of the type")]
    MixedSignedness {
        /// Display name of the type being compiled.
        type_name: String,
        /// First constant whose signedness differs from the first record.
        name: String,
    },

    /// A name blob is too long to be indexed with 32-bit offsets.
    #[error("name blob of {len} bytes exceeds the 32-bit offset range")]
    IndexWidthOverflow {
        /// Total byte length of the blob.
        len: usize,
    },

    /// A naming policy could not be parsed.
    #[error("invalid naming policy: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for compilation operations.
pub type Result<T> = std::result::Result<T, Error>;
