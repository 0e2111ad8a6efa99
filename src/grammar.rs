//! Citation grammar.
//!
//! Recognizes one passage at the start of its input. The productions only
//! describe *shape*; they never consult chapter or verse counts, and they do
//! not decide what a lone trailing number means. That is left to the resolver,
//! which receives the ambiguity intact as a [`To`] variant.
//!
//! ```text
//! passage   = reference _ ( "-" _ ( reference | continuation ) | continuation )?
//! reference = book _ number _ ":"? _ number
//!           | book _ number
//!           | book
//! continuation = number _ ":" _ number | number
//! ```
//!
//! `_` is zero or more spaces or tabs. Book names are tried longest first.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, opt, success},
    error::{Error as NomError, ErrorKind},
    sequence::terminated,
};

use crate::canon::Canon;
use crate::error::Error;
use crate::reference::write_triple;

/// An unvalidated `(book, chapter, verse)` triple borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawReference<'i> {
    /// Book name exactly as matched.
    pub book: &'i str,
    /// Chapter digits, if present.
    pub chapter: Option<u32>,
    /// Verse digits, if present.
    pub verse: Option<u32>,
}

impl std::fmt::Display for RawReference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write_triple(f, self.book, self.chapter, self.verse);
    }
}

/// The right-hand side of a passage as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum To<'i> {
    /// `Genesis 1:12-2:16`: chapter and verse in the from book.
    ChapterAndVerse {
        /// Chapter after the dash.
        chapter: u32,
        /// Verse after the colon.
        verse: u32,
    },
    /// `Genesis 1-3` or `Genesis 1:12-16`: meaning depends on the from side.
    ChapterOrVerse(u32),
    /// `Genesis 50:26-Exodus 1:1`: a complete second reference.
    Full(RawReference<'i>),
    /// No right-hand side; the passage is the single from reference.
    Same,
}

/// Raw result of the passage production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawPassage<'i> {
    /// Left-hand reference, always complete.
    pub from: RawReference<'i>,
    /// Right-hand side, possibly partial.
    pub to: To<'i>,
}

/// Parse `input` as exactly one passage. Trailing spaces are allowed.
///
/// # Errors
///
/// Returns `Error::Parse` carrying `input` if the grammar does not match all of it.
pub(crate) fn parse_passage<'i>(canon: &Canon, input: &'i str) -> Result<RawPassage<'i>, Error> {
    return all_consuming(terminated(|i: &'i str| return passage(canon, i), space0))(input)
        .map(|(_, raw)| return raw)
        .map_err(|_err| return Error::Parse { input: input.to_string() });
}

/// Parse `input` as exactly one reference. Trailing spaces are allowed.
///
/// # Errors
///
/// Returns `Error::Parse` carrying `input` if the grammar does not match all of it.
pub(crate) fn parse_reference<'i>(
    canon: &Canon,
    input: &'i str,
) -> Result<RawReference<'i>, Error> {
    return all_consuming(terminated(|i: &'i str| return reference(canon, i), space0))(input)
        .map(|(_, raw)| return raw)
        .map_err(|_err| return Error::Parse { input: input.to_string() });
}

/// Match a passage at the start of `input`, returning the unconsumed rest.
pub(crate) fn passage<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, RawPassage<'i>> {
    let (input, from) = reference(canon, input)?;
    let (input, _) = space0(input)?;
    let (input, dash) = opt(terminated(char('-'), space0))(input)?;

    // Only a dash can introduce a second full reference.
    let (input, to) = if dash.is_some() {
        alt((
            map(|i: &'i str| return reference(canon, i), To::Full),
            continuation,
            success(To::Same),
        ))(input)?
    } else {
        alt((continuation, success(To::Same)))(input)?
    };

    return Ok((input, RawPassage { from, to }));
}

/// `reference`: first alternative that matches wins.
fn reference<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, RawReference<'i>> {
    return alt((
        |i: &'i str| return book_chapter_verse(canon, i),
        |i: &'i str| return book_chapter(canon, i),
        |i: &'i str| return book_only(canon, i),
    ))(input);
}

/// `Genesis 1:12`, also `Genesis 1 12`.
fn book_chapter_verse<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, RawReference<'i>> {
    let (input, book) = book(canon, input)?;
    let (input, _) = space0(input)?;
    let (input, chapter) = number(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = opt(char(':'))(input)?;
    let (input, _) = space0(input)?;
    let (input, verse) = number(input)?;

    return Ok((
        input,
        RawReference { book, chapter: Some(chapter), verse: Some(verse) },
    ));
}

/// `Genesis 1`.
fn book_chapter<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, RawReference<'i>> {
    let (input, book) = book(canon, input)?;
    let (input, _) = space0(input)?;
    let (input, chapter) = number(input)?;

    return Ok((input, RawReference { book, chapter: Some(chapter), verse: None }));
}

/// `Genesis`.
fn book_only<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, RawReference<'i>> {
    let (input, book) = book(canon, input)?;
    return Ok((input, RawReference { book, chapter: None, verse: None }));
}

/// A right-hand side that inherits the book from the left.
fn continuation(input: &str) -> IResult<&str, To<'_>> {
    return alt((chapter_and_verse, map(number, To::ChapterOrVerse)))(input);
}

/// `2:16` after a dash.
fn chapter_and_verse(input: &str) -> IResult<&str, To<'_>> {
    let (input, chapter) = number(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = space0(input)?;
    let (input, verse) = number(input)?;

    return Ok((input, To::ChapterAndVerse { chapter, verse }));
}

/// One of the canon's book names, matched literally.
fn book<'i>(canon: &Canon, input: &'i str) -> IResult<&'i str, &'i str> {
    for name in canon.book_names_by_match_priority() {
        if let Ok(found) = tag::<_, _, NomError<&'i str>>(name)(input) {
            return Ok(found);
        }
    }
    return Err(nom::Err::Error(NomError::new(input, ErrorKind::Tag)));
}

/// A run of ASCII digits. Leading zeros are fine; the value saturates rather
/// than failing, and the canon rejects it later.
fn number(input: &str) -> IResult<&str, u32> {
    return map(digit1, saturating_decimal)(input);
}

/// Decimal value of an all-digit string, clamped to `u32::MAX`.
fn saturating_decimal(digits: &str) -> u32 {
    return digits
        .chars()
        .filter_map(|c| return c.to_digit(10))
        .fold(0_u32, |acc, d| return acc.saturating_mul(10).saturating_add(d));
}
