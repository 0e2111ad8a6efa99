/// Crate-level error types for citation parsing and the CLI around it.
use std::path::PathBuf;

/// Every error names the text, file, or reason that caused it, so a
/// diagnostic can be rendered without a debugger. Citation failures come in
/// two kinds that are never coerced into each other: `Parse` (the text is not
/// citation syntax) and the validation variants (the syntax is fine but the
/// canon has no such book, chapter, or verse).
#[allow(clippy::error_impl_error, reason = "crate error type re-exported at the root")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canon dataset is structurally unusable.
    #[error("canon corrupt: {reason}")]
    CanonCorrupt {
        /// Description of the defect.
        reason: String,
    },

    /// A config file names a file that does not exist on disk.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The passage matched the grammar, but one of its ends is not in the canon.
    #[error("invalid passage: {passage}")]
    InvalidPassage {
        /// Unvalidated rendering of the passage that failed.
        passage: String,
        /// The reference-level failure that caused this one.
        #[source]
        source: Box<Error>,
    },

    /// A book, chapter, or verse combination is absent from the canon.
    #[error("invalid reference: {reference}")]
    InvalidReference {
        /// Unvalidated rendering of the reference that failed.
        reference: String,
    },

    /// Underlying I/O error from the filesystem or stdio.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON (de)serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// No citation was found anywhere in the text.
    #[error("no passage found in: {input}")]
    NotFound {
        /// The searched text.
        input: String,
    },

    /// The text does not match citation syntax.
    #[error("could not parse passage: {input}")]
    Parse {
        /// The offending input, verbatim.
        input: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}

impl Error {
    /// True for syntax failures.
    pub const fn is_parse(&self) -> bool {
        return matches!(self, Self::Parse { .. });
    }

    /// True for failures against the canon (the text parsed, the citation does not exist).
    pub const fn is_validation(&self) -> bool {
        return matches!(self, Self::InvalidPassage { .. } | Self::InvalidReference { .. });
    }
}
