//! An inclusive range between two references, and the public entry points
//! for parsing and extracting one.

use std::fmt;
use std::str::FromStr;

use crate::builder;
use crate::canon::Canon;
use crate::error::Error;
use crate::grammar;
use crate::reference::Reference;
use crate::resolver;
use crate::scanner;
use crate::types::PassageValue;

/// An inclusive range `from..=to`. Both ends are validated independently;
/// their relative order is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Passage {
    /// Start of the range.
    from: Reference,
    /// End of the range.
    to: Reference,
}

impl Passage {
    /// First passage anywhere in `text`, against the standard canon.
    /// Matches that fail validation are skipped.
    pub fn extract(text: &str) -> Option<Self> {
        return Self::extract_with(text, Canon::standard());
    }

    /// Every passage in `text`, left to right, against the standard canon.
    /// Matches that fail validation are skipped.
    pub fn extract_all(text: &str) -> Vec<Self> {
        return Self::extract_all_with(text, Canon::standard());
    }

    /// Every passage in `text` against `canon`, skipping invalid matches.
    pub fn extract_all_with(text: &str, canon: &Canon) -> Vec<Self> {
        return scanner::scan(canon, text)
            .filter_map(Result::ok)
            .map(|found| return found.passage)
            .collect();
    }

    /// First passage in `text` against `canon`, skipping invalid matches.
    pub fn extract_with(text: &str, canon: &Canon) -> Option<Self> {
        return scanner::scan(canon, text)
            .find_map(Result::ok)
            .map(|found| return found.passage);
    }

    /// Start of the range.
    pub const fn from(&self) -> &Reference {
        return &self.from;
    }

    /// Revalidate two references as a passage against `canon`. For references
    /// that came from the same canon this always succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPassage` if either end is not in `canon`.
    pub fn new(canon: &Canon, from: &Reference, to: &Reference) -> Result<Self, Error> {
        return builder::passage(canon, from.as_raw(), to.as_raw());
    }

    /// Parse `text` as exactly one passage against the standard canon.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the text is not citation syntax, or
    /// `Error::InvalidPassage` if either end is outside the canon.
    pub fn parse(text: &str) -> Result<Self, Error> {
        return Self::parse_with(text, Canon::standard());
    }

    /// Parse `text` as exactly one passage against `canon`.
    ///
    /// # Errors
    ///
    /// Same as [`Passage::parse`].
    pub fn parse_with(text: &str, canon: &Canon) -> Result<Self, Error> {
        let raw = grammar::parse_passage(canon, text)?;
        let (from, to) = resolver::resolve(raw);
        return builder::passage(canon, from, to);
    }

    /// End of the range.
    pub const fn to(&self) -> &Reference {
        return &self.to;
    }

    /// Plain record for serialization.
    pub fn to_value(&self) -> PassageValue {
        return PassageValue {
            from: self.from.to_value(),
            to: self.to.to_value(),
        };
    }

    /// Every passage in `text` against the standard canon, stopping at the
    /// first match that fails validation.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::InvalidPassage` encountered.
    pub fn try_extract_all(text: &str) -> Result<Vec<Self>, Error> {
        return Self::try_extract_all_with(text, Canon::standard());
    }

    /// Every passage in `text` against `canon`, stopping at the first invalid match.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::InvalidPassage` encountered.
    pub fn try_extract_all_with(text: &str, canon: &Canon) -> Result<Vec<Self>, Error> {
        return scanner::scan(canon, text)
            .map(|found| return found.map(|f| return f.passage))
            .collect();
    }

    /// Constructor reserved for the builder.
    pub(crate) const fn validated(from: Reference, to: Reference) -> Self {
        return Self { from, to };
    }
}

impl fmt::Display for Passage {
    /// Shortest form that parses back to the same passage:
    /// `Genesis 1:12`, `Genesis 1:12-16`, `Genesis 1:12-2:16`, `Genesis 1-3`,
    /// `Genesis 1-3:2`, otherwise `<from>-<to>` in full.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = (&self.from, &self.to);

        if from == to {
            return write!(f, "{from}");
        }
        if from.book() != to.book() {
            return write!(f, "{from}-{to}");
        }

        return match (from.chapter(), from.verse(), to.chapter(), to.verse()) {
            (Some(fc), Some(_), Some(tc), Some(tv)) if fc == tc => write!(f, "{from}-{tv}"),
            (Some(_), _, Some(tc), Some(tv)) => write!(f, "{from}-{tc}:{tv}"),
            (Some(_), None, Some(tc), None) => write!(f, "{from}-{tc}"),
            // A bare number here would reparse as a verse, or there is no chapter to shorten.
            _ => write!(f, "{from}-{to}"),
        };
    }
}

impl FromStr for Passage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Self::parse(s);
    }
}
