/// Plain records for handing citations to serializers and external callers.
use std::path::PathBuf;

/// Structural form of a reference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceValue {
    /// Book name.
    pub book: String,
    /// Chapter, absent for a whole book.
    pub chapter: Option<u32>,
    /// Verse, absent for a whole chapter.
    pub verse: Option<u32>,
}

/// Structural form of a passage.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PassageValue {
    /// Start of the range.
    pub from: ReferenceValue,
    /// End of the range.
    pub to: ReferenceValue,
}

/// A passage found while scanning a file, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Located {
    /// File the citation was found in, relative to the scan root.
    pub file: PathBuf,
    /// One-based line number.
    pub line: u32,
    /// Canonical rendering of the passage.
    pub passage: String,
    /// The citation as written in the file.
    pub text: String,
    /// Structural form of the passage.
    pub value: PassageValue,
}
