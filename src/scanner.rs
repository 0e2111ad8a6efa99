use std::ops::Range;

use crate::builder;
use crate::canon::Canon;
use crate::error::Error;
use crate::grammar;
use crate::passage::Passage;
use crate::resolver;

/// A validated passage and the byte range it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The citation, validated.
    pub passage: Passage,
    /// Byte range in the scanned text, trailing whitespace excluded.
    pub span: Range<usize>,
}

/// Lazy left-to-right scan for citations. See [`scan`].
#[derive(Debug, Clone)]
pub struct Passages<'c, 't> {
    /// Canon the matches are validated against.
    canon: &'c Canon,
    /// Byte offset where the next candidate search starts.
    pos: usize,
    /// Text being scanned.
    text: &'t str,
}

impl Iterator for Passages<'_, '_> {
    type Item = Result<Extracted, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = self.canon.finder().find_at(self.text, self.pos)?;
            let start = candidate.start();
            let rest = self.text.get(start..)?;

            let Ok((remaining, raw)) = grammar::passage(self.canon, rest) else {
                // Cannot happen for a finder hit, but never stall on one.
                self.pos = next_char_boundary(self.text, start);
                tracing::trace!(start, "candidate did not parse");
                continue;
            };

            let consumed = rest.len().saturating_sub(remaining.len());
            let written = rest.get(..consumed).unwrap_or_default().trim_end();
            let end = start.saturating_add(written.len());
            self.pos = end;

            let (from, to) = resolver::resolve(raw);
            let found = builder::passage(self.canon, from, to)
                .map(|passage| return Extracted { passage, span: start..end });
            if let Err(e) = &found {
                tracing::debug!(start, end, error = %e, "citation failed validation");
            }
            return Some(found);
        }
    }
}

/// Step past the character at `idx`.
fn next_char_boundary(text: &str, idx: usize) -> usize {
    let width = text
        .get(idx..)
        .and_then(|s| return s.chars().next())
        .map_or(1, char::len_utf8);
    return idx.saturating_add(width).min(text.len());
}

/// Scan `text` for citations, leftmost first, without overlap.
///
/// Each syntactic match yields one item: `Ok` when it validates against
/// `canon`, `Err(Error::InvalidPassage)` otherwise. An invalid match is still
/// consumed, so scanning resumes after it rather than inside it. Callers pick
/// the policy: `filter_map(Result::ok)` skips, `collect::<Result<_, _>>()`
/// aborts.
///
/// Book names are not required to start or end on a word boundary, so
/// `Markdown` yields `Mark` and `Jobs 3` yields `Job`.
pub fn scan<'c, 't>(canon: &'c Canon, text: &'t str) -> Passages<'c, 't> {
    return Passages { canon, pos: 0, text };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<(String, &str)> {
        scan(Canon::standard(), text)
            .filter_map(Result::ok)
            .map(|e| (e.passage.to_string(), &text[e.span]))
            .collect()
    }

    #[test]
    fn spans_cover_the_citation_only() {
        let found = spans("Read Genesis 1:1-2:3 tonight.");
        assert_eq!(found, [("Genesis 1:1-2:3".to_string(), "Genesis 1:1-2:3")]);
    }

    #[test]
    fn matches_do_not_overlap() {
        let found = spans("1 John 1:3 and John 3:16");
        assert_eq!(
            found,
            [
                ("1 John 1:3".to_string(), "1 John 1:3"),
                ("John 3:16".to_string(), "John 3:16"),
            ]
        );
    }

    #[test]
    fn invalid_match_is_consumed_whole() {
        let items: Vec<_> = scan(Canon::standard(), "see 1 John 9 now").collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].as_ref().is_err_and(Error::is_validation));
    }

    #[test]
    fn multibyte_text_is_safe() {
        let found = spans("« Psaume » — Psalms 23 — ✝ Revelation 22:21 ✝");
        let shown: Vec<&str> = found.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(shown, ["Psalms 23", "Revelation 22:21"]);
    }

    #[test]
    fn citations_do_not_span_lines() {
        let found = spans("Genesis 1\n-3");
        assert_eq!(found, [("Genesis 1".to_string(), "Genesis 1")]);
    }

    #[test]
    fn book_names_inside_words_match() {
        let found = spans("Write it in Markdown. Steve Jobs 3 times.");
        assert_eq!(
            found,
            [("Mark".to_string(), "Mark"), ("Job".to_string(), "Job")]
        );
    }

    #[test]
    fn empty_and_plain_text() {
        assert!(scan(Canon::standard(), "").next().is_none());
        assert!(scan(Canon::standard(), "no citations in here").next().is_none());
    }
}
