//! CLI commands for bibleref: parse, extract, scan, books, info.

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bibleref::{Canon, Error, Located, Passage};
use walkdir::WalkDir;

use crate::config::{Config, OnInvalid};

/// List the books of the active canon with their chapter counts.
///
/// # Errors
///
/// Returns errors from config or canon loading.
pub fn books(json: bool) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let canon = config.load_canon(&root)?;

    if json {
        let listing: Vec<BookJson<'_>> = canon
            .books()
            .map(|b| return BookJson { chapters: b.chapter_count(), name: &b.name })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(ExitCode::SUCCESS);
    }

    for book in canon.books() {
        println!("{:<16} {}", book.name, book.chapter_count());
    }
    return Ok(ExitCode::SUCCESS);
}

/// One line of `books --json`.
#[derive(serde::Serialize)]
struct BookJson<'a> {
    /// Number of chapters.
    chapters: u32,
    /// Book name.
    name: &'a str,
}

/// Print every passage found in `text` (or stdin), one per line.
/// Invalid citations follow the configured policy.
///
/// # Errors
///
/// Returns `Error::NotFound` when nothing was found, the first validation
/// error under the `abort` policy, or errors from config, canon, or stdin.
pub fn extract(text: Option<&str>, first: bool, json: bool) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let canon = config.load_canon(&root)?;

    let input = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        },
    };

    let mut count = 0_usize;
    for found in bibleref::scan(&canon, &input) {
        let Some(extracted) = apply_policy(found, config.on_invalid)? else {
            continue;
        };
        print_passage(&extracted.passage, json)?;
        count = count.saturating_add(1);
        if first {
            break;
        }
    }

    if count == 0 {
        return Err(Error::NotFound { input: input.trim().to_string() });
    }
    return Ok(ExitCode::SUCCESS);
}

/// Keep, skip, or fail on one scan result.
///
/// # Errors
///
/// Returns the scan error under `OnInvalid::Abort`.
fn apply_policy(
    found: Result<bibleref::Extracted, Error>,
    policy: OnInvalid,
) -> Result<Option<bibleref::Extracted>, Error> {
    return match (found, policy) {
        (Err(e), OnInvalid::Abort) => Err(e),
        (Err(e), OnInvalid::Skip) => {
            tracing::debug!(error = %e, "skipping invalid citation");
            Ok(None)
        },
        (Ok(extracted), _) => Ok(Some(extracted)),
    };
}

/// Output the reference document.
pub fn info(json: bool) {
    return crate::info::run(json);
}

/// Parse each argument as one passage and print its canonical form.
///
/// # Errors
///
/// Returns the first parse or validation error, or errors from config or canon loading.
pub fn parse(texts: &[String], json: bool) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let canon = config.load_canon(&root)?;

    for text in texts {
        let passage = Passage::parse_with(text, &canon)?;
        print_passage(&passage, json)?;
    }
    return Ok(ExitCode::SUCCESS);
}

/// Print a passage as its canonical string or a single JSON line.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
fn print_passage(passage: &Passage, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string(&passage.to_value())?);
    } else {
        println!("{passage}");
    }
    return Ok(());
}

/// Walk files under `root` and report every citation with its location.
/// Book names match inside words too (`Markdown` reports `Mark`).
///
/// # Errors
///
/// Returns errors from config or canon loading, file reading, or the first
/// validation error under the `abort` policy.
pub fn scan(root: &Path, json: bool) -> Result<ExitCode, Error> {
    let config = Config::load(root)?;
    let canon = config.load_canon(root)?;

    let mut located = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file() && config.scans_extension(e.path()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        if !config.should_scan(&relative.to_string_lossy()) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(path = %path.display(), "skipping file that is not UTF-8");
                continue;
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        scan_file_content(&canon, &content, &relative, config.on_invalid, &mut located)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&located)?);
    } else {
        for loc in &located {
            println!("{}:{}  {}", loc.file.display(), loc.line, loc.passage);
        }
    }
    eprintln!("Found {} citations", located.len());

    return Ok(ExitCode::SUCCESS);
}

/// Collect the citations in one file, line by line.
///
/// # Errors
///
/// Returns the first validation error under `OnInvalid::Abort`.
fn scan_file_content(
    canon: &Canon,
    content: &str,
    file: &Path,
    policy: OnInvalid,
    located: &mut Vec<Located>,
) -> Result<(), Error> {
    for (idx, line) in content.lines().enumerate() {
        let line_number = u32::try_from(idx.saturating_add(1)).unwrap_or(u32::MAX);
        for found in bibleref::scan(canon, line) {
            let Some(extracted) = apply_policy(found, policy)? else {
                continue;
            };
            located.push(Located {
                file: file.to_path_buf(),
                line: line_number,
                passage: extracted.passage.to_string(),
                text: line.get(extracted.span).unwrap_or_default().to_string(),
                value: extracted.passage.to_value(),
            });
        }
    }
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_content_reports_lines_and_written_text() {
        let content = "Intro\nRead Genesis 1:1-2:3 today.\nThen 1 John 1 and Jude 1:3.\n";
        let mut located = Vec::new();
        scan_file_content(
            Canon::standard(),
            content,
            Path::new("notes.md"),
            OnInvalid::Skip,
            &mut located,
        )
        .unwrap();

        let rows: Vec<(u32, &str, &str)> = located
            .iter()
            .map(|l| (l.line, l.passage.as_str(), l.text.as_str()))
            .collect();
        assert_eq!(
            rows,
            [
                (2, "Genesis 1:1-2:3", "Genesis 1:1-2:3"),
                (3, "1 John 1", "1 John 1"),
                (3, "Jude 1:3", "Jude 1:3"),
            ]
        );
    }

    #[test]
    fn policy_decides_on_invalid_citations() {
        let content = "Genesis 1\nGenesis 99\nExodus 1\n";
        let mut located = Vec::new();
        scan_file_content(Canon::standard(), content, Path::new("a.txt"), OnInvalid::Skip, &mut located)
            .unwrap();
        assert_eq!(located.len(), 2);

        let mut located = Vec::new();
        let err = scan_file_content(
            Canon::standard(),
            content,
            Path::new("a.txt"),
            OnInvalid::Abort,
            &mut located,
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(located.len(), 1, "prefix before the failure is kept");
    }
}
