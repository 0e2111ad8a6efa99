//! Expand a raw parse into two complete reference triples.
//!
//! The right-hand side of a passage may omit the book, or the book and the
//! chapter; missing fields come from the left-hand side. A lone number after
//! the dash is a verse when the left side names a verse and a chapter
//! otherwise. No validation happens here.

use crate::builder::specified;
use crate::grammar::{RawPassage, RawReference, To};

/// Split a raw passage into its `(from, to)` triples.
pub(crate) fn resolve(raw: RawPassage<'_>) -> (RawReference<'_>, RawReference<'_>) {
    let RawPassage { from, to } = raw;

    let to = match to {
        To::ChapterAndVerse { chapter, verse } => RawReference {
            book: from.book,
            chapter: Some(chapter),
            verse: Some(verse),
        },
        To::ChapterOrVerse(n) => {
            if specified(from.verse).is_some() {
                RawReference { book: from.book, chapter: from.chapter, verse: Some(n) }
            } else {
                RawReference { book: from.book, chapter: Some(n), verse: None }
            }
        },
        To::Full(reference) => reference,
        To::Same => from,
    };

    return (from, to);
}
