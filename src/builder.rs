//! Validation of raw triples against the canon.
//!
//! This is the only place a [`Reference`] or [`Passage`] is constructed, so
//! holding one means it exists in the canon it was built against.

use crate::canon::Canon;
use crate::error::Error;
use crate::grammar::RawReference;
use crate::passage::Passage;
use crate::reference::Reference;

/// Validate both ends of a passage.
///
/// # Errors
///
/// Returns `Error::InvalidPassage` when either end fails; the failing
/// reference error is kept as its source.
pub(crate) fn passage(
    canon: &Canon,
    from: RawReference<'_>,
    to: RawReference<'_>,
) -> Result<Passage, Error> {
    let built = reference(canon, from).and_then(|f| return Ok((f, reference(canon, to)?)));

    return match built {
        Err(source) => Err(Error::InvalidPassage {
            passage: render_raw_passage(from, to),
            source: Box::new(source),
        }),
        Ok((from, to)) => Ok(Passage::validated(from, to)),
    };
}

/// Validate one triple. Zero chapters and verses count as unspecified, and a
/// missing chapter drops the verse.
///
/// - no chapter: the book must exist
/// - chapter only: the chapter must exist
/// - chapter and verse: the chapter must have at least that many verses
///
/// # Errors
///
/// Returns `Error::InvalidReference` when the canon has no such location.
pub(crate) fn reference(canon: &Canon, raw: RawReference<'_>) -> Result<Reference, Error> {
    let chapter = specified(raw.chapter);
    let verse = match chapter {
        None => None,
        Some(_) => specified(raw.verse),
    };

    let valid = match (chapter, verse) {
        (None, _) => canon.is_book(raw.book),
        (Some(c), None) => canon.has_chapter(raw.book, c),
        (Some(c), Some(v)) => canon.has_verse(raw.book, c, v),
    };

    if !valid {
        return Err(Error::InvalidReference { reference: raw.to_string() });
    }

    return Ok(Reference::validated(raw.book.to_string(), chapter, verse));
}

/// Unvalidated rendering used in error messages.
fn render_raw_passage(from: RawReference<'_>, to: RawReference<'_>) -> String {
    if from == to {
        return from.to_string();
    }
    return format!("{from}-{to}");
}

/// `Some(0)` and `None` both mean "not specified".
pub(crate) const fn specified(n: Option<u32>) -> Option<u32> {
    return match n {
        None | Some(0) => None,
        Some(v) => Some(v),
    };
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn raw(book: &str, chapter: Option<u32>, verse: Option<u32>) -> RawReference<'_> {
        RawReference { book, chapter, verse }
    }

    #[test]
    fn validity_tiers() {
        let canon = Canon::standard();
        assert!(reference(canon, raw("Genesis", None, None)).is_ok());
        assert!(reference(canon, raw("Genesis", Some(50), None)).is_ok());
        assert!(reference(canon, raw("Genesis", Some(1), Some(31))).is_ok());

        assert!(reference(canon, raw("Genesys", None, None)).is_err());
        assert!(reference(canon, raw("Genesis", Some(51), None)).is_err());
        assert!(reference(canon, raw("Genesis", Some(1), Some(32))).is_err());
    }

    #[test]
    fn zero_is_unspecified() {
        let canon = Canon::standard();
        let r = reference(canon, raw("Genesis", Some(1), Some(0))).unwrap();
        assert_eq!((r.chapter(), r.verse()), (Some(1), None));

        let r = reference(canon, raw("Genesis", Some(0), Some(5))).unwrap();
        assert_eq!((r.chapter(), r.verse()), (None, None));
    }

    #[test]
    fn invalid_reference_names_the_input() {
        let err = reference(Canon::standard(), raw("Genesis", Some(100), None)).unwrap_err();
        assert_eq!(err.to_string(), "invalid reference: Genesis 100");
    }

    #[test]
    fn either_side_failing_collapses_to_invalid_passage() {
        let canon = Canon::standard();
        let good = raw("Genesis", Some(1), None);
        let bad = raw("Genesis", Some(100), None);

        for (from, to) in [(bad, good), (good, bad)] {
            let err = passage(canon, from, to).unwrap_err();
            assert!(matches!(err, Error::InvalidPassage { .. }), "got {err:?}");
            assert!(err.source().is_some());
        }
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let canon = Canon::standard();
        let first = passage(canon, raw("John", Some(3), Some(16)), raw("John", Some(3), Some(18)))
            .unwrap();
        let again = passage(canon, first.from().as_raw(), first.to().as_raw()).unwrap();
        assert_eq!(first, again);
    }
}
