//! The canon: which books exist, how many chapters each has, and how many
//! verses each chapter has. Read-only once built.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::kjv;

/// Built on first use from the compiled-in table; never rebuilt or mutated.
static STANDARD: LazyLock<Canon> = LazyLock::new(|| {
    let books = kjv::BOOKS
        .iter()
        .map(|&(name, chapters)| {
            return Book {
                chapters: chapters.to_vec(),
                name: name.to_string(),
            };
        })
        .collect();
    return Canon::new(books).expect("compiled-in canon is well-formed");
});

/// One book of the canon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Verse count per chapter; entry `n - 1` belongs to chapter `n`.
    pub chapters: Vec<u32>,
    /// Exact spelling used for matching; no case folding.
    #[serde(rename = "book")]
    pub name: String,
}

impl Book {
    /// Number of chapters in this book.
    pub fn chapter_count(&self) -> u32 {
        return u32::try_from(self.chapters.len()).unwrap_or(u32::MAX);
    }

    /// Verse count of `chapter`, or `None` when the book has no such chapter.
    pub fn verse_count(&self, chapter: u32) -> Option<u32> {
        let idx = usize::try_from(chapter.checked_sub(1)?).ok()?;
        return self.chapters.get(idx).copied();
    }
}

/// Lookup table from book name to chapter to verse count.
///
/// Book names are opaque exact strings. Besides the three validity queries
/// the canon carries the longest-first book order the grammar needs and a
/// prefilter regex that finds where a citation could start.
#[derive(Debug, Clone)]
pub struct Canon {
    /// Books in canonical order.
    books: Vec<Book>,
    /// Matches any book name; leftmost start wins.
    finder: Regex,
    /// Book name to position in `books`.
    index: HashMap<String, usize>,
    /// Positions in `books`, longest name first.
    match_order: Vec<usize>,
}

impl Canon {
    /// Books in canonical order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        return self.books.iter();
    }

    /// Book names in the order the grammar must try them: longest first, so a
    /// name that is a prefix of another (`Jude`, `Judges`) never shadows it.
    pub(crate) fn book_names_by_match_priority(&self) -> impl Iterator<Item = &str> {
        return self
            .match_order
            .iter()
            .filter_map(|&idx| return self.books.get(idx))
            .map(|book| return book.name.as_str());
    }

    /// The book named exactly `name`.
    pub fn book(&self, name: &str) -> Option<&Book> {
        let idx = *self.index.get(name)?;
        return self.books.get(idx);
    }

    /// Number of chapters in `book`, or `None` for an unknown book.
    pub fn chapter_count(&self, book: &str) -> Option<u32> {
        return self.book(book).map(Book::chapter_count);
    }

    /// Prefilter matching any book name.
    pub(crate) const fn finder(&self) -> &Regex {
        return &self.finder;
    }

    /// Parse a canon from its JSON form: `[{"book": "...", "chapters": [..]}, ...]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed JSON, or `Error::CanonCorrupt` if the
    /// dataset is empty or has empty or duplicate book names.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let books: Vec<Book> = serde_json::from_str(text)?;
        return Self::new(books);
    }

    /// True iff `book` has a chapter numbered `chapter`. False for unknown books.
    pub fn has_chapter(&self, book: &str, chapter: u32) -> bool {
        return self.book(book).and_then(|b| return b.verse_count(chapter)).is_some();
    }

    /// True iff the chapter exists with a non-zero verse count of at least `verse`.
    pub fn has_verse(&self, book: &str, chapter: u32, verse: u32) -> bool {
        return self
            .verse_count(book, chapter)
            .is_some_and(|count| return count > 0 && verse <= count);
    }

    /// True iff `name` is exactly the name of a book.
    pub fn is_book(&self, name: &str) -> bool {
        return self.index.contains_key(name);
    }

    /// True when the canon has no books. Never the case for a constructed canon.
    pub fn is_empty(&self) -> bool {
        return self.books.is_empty();
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        return self.books.len();
    }

    /// Read a JSON canon from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file does not exist, `Error::Io`
    /// for other read failures, or any error from [`Canon::from_json`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(t) => t,
        };
        let canon = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), books = canon.len(), "loaded canon");
        return Ok(canon);
    }

    /// Build a canon from books in canonical order.
    ///
    /// # Errors
    ///
    /// Returns `Error::CanonCorrupt` if `books` is empty, a name is empty or
    /// duplicated, or the names cannot be compiled into the prefilter.
    pub fn new(books: Vec<Book>) -> Result<Self, Error> {
        if books.is_empty() {
            return Err(Error::CanonCorrupt { reason: "no books".to_string() });
        }

        let mut index = HashMap::with_capacity(books.len());
        for (idx, book) in books.iter().enumerate() {
            if book.name.is_empty() {
                return Err(Error::CanonCorrupt {
                    reason: format!("book #{} has an empty name", idx.saturating_add(1)),
                });
            }
            if index.insert(book.name.clone(), idx).is_some() {
                return Err(Error::CanonCorrupt {
                    reason: format!("duplicate book `{}`", book.name),
                });
            }
        }

        let mut match_order: Vec<usize> = (0..books.len()).collect();
        match_order.sort_by_key(|&idx| {
            return std::cmp::Reverse(books.get(idx).map_or(0, |b| return b.name.len()));
        });

        let finder = build_finder(&books, &match_order)?;

        return Ok(Self { books, finder, index, match_order });
    }

    /// The 66-book Protestant canon with King James versification.
    ///
    /// # Panics
    ///
    /// Never in practice: the compiled-in table is covered by the canon tests.
    pub fn standard() -> &'static Self {
        return &STANDARD;
    }

    /// Verse count of `chapter` in `book`, or `None` when either is unknown.
    pub fn verse_count(&self, book: &str, chapter: u32) -> Option<u32> {
        return self.book(book)?.verse_count(chapter);
    }
}

/// Compile an alternation of every book name, longest first.
///
/// # Errors
///
/// Returns `Error::CanonCorrupt` if the pattern exceeds the regex size limit.
fn build_finder(books: &[Book], match_order: &[usize]) -> Result<Regex, Error> {
    let pattern = match_order
        .iter()
        .filter_map(|&idx| return books.get(idx))
        .map(|book| return regex::escape(&book.name))
        .collect::<Vec<_>>()
        .join("|");

    return Regex::new(&pattern).map_err(|e| {
        return Error::CanonCorrupt { reason: format!("book names do not compile: {e}") };
    });
}
