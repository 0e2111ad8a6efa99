//! A single validated location: a book, optionally a chapter, optionally a verse.

use std::fmt;
use std::str::FromStr;

use crate::builder;
use crate::canon::Canon;
use crate::error::Error;
use crate::grammar::{self, RawReference};
use crate::types::ReferenceValue;

/// A book, optionally narrowed to a chapter, optionally narrowed to a verse.
///
/// Only obtainable through validation, so a verse is never present without a
/// chapter and the location exists in the canon it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Book name as spelled in the canon.
    book: String,
    /// `None` means the whole book.
    chapter: Option<u32>,
    /// `None` means the whole chapter.
    verse: Option<u32>,
}

impl Reference {
    /// Borrow this reference as an unvalidated triple.
    pub(crate) fn as_raw(&self) -> RawReference<'_> {
        return RawReference {
            book: &self.book,
            chapter: self.chapter,
            verse: self.verse,
        };
    }

    /// Book name.
    pub fn book(&self) -> &str {
        return &self.book;
    }

    /// Chapter number, if the reference is narrower than a book.
    pub const fn chapter(&self) -> Option<u32> {
        return self.chapter;
    }

    /// Validate a triple against `canon`. A zero chapter or verse means
    /// "not specified".
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidReference` if the canon has no such location.
    pub fn new(
        canon: &Canon,
        book: &str,
        chapter: Option<u32>,
        verse: Option<u32>,
    ) -> Result<Self, Error> {
        return builder::reference(canon, RawReference { book, chapter, verse });
    }

    /// Parse a single reference against the standard canon.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for text that is not a reference, or
    /// `Error::InvalidReference` when it names a location outside the canon.
    pub fn parse(text: &str) -> Result<Self, Error> {
        return Self::parse_with(text, Canon::standard());
    }

    /// Parse a single reference against `canon`.
    ///
    /// # Errors
    ///
    /// Same as [`Reference::parse`].
    pub fn parse_with(text: &str, canon: &Canon) -> Result<Self, Error> {
        let raw = grammar::parse_reference(canon, text)?;
        return builder::reference(canon, raw);
    }

    /// Plain record for serialization.
    pub fn to_value(&self) -> ReferenceValue {
        return ReferenceValue {
            book: self.book.clone(),
            chapter: self.chapter,
            verse: self.verse,
        };
    }

    /// Constructor reserved for the builder.
    pub(crate) const fn validated(book: String, chapter: Option<u32>, verse: Option<u32>) -> Self {
        return Self { book, chapter, verse };
    }

    /// Verse number, if the reference is a single verse.
    pub const fn verse(&self) -> Option<u32> {
        return self.verse;
    }
}

impl fmt::Display for Reference {
    /// `Genesis`, `Genesis 1`, or `Genesis 1:12`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write_triple(f, &self.book, self.chapter, self.verse);
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Self::parse(s);
    }
}

/// Shared rendering for validated and raw triples. A verse without a chapter
/// is not rendered.
pub(crate) fn write_triple(
    f: &mut fmt::Formatter<'_>,
    book: &str,
    chapter: Option<u32>,
    verse: Option<u32>,
) -> fmt::Result {
    return match (chapter, verse) {
        (None, _) => write!(f, "{book}"),
        (Some(c), None) => write!(f, "{book} {c}"),
        (Some(c), Some(v)) => write!(f, "{book} {c}:{v}"),
    };
}
