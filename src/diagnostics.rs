use std::error::Error as _;
use std::fmt::Write as _;
use std::io::IsTerminal as _;

use bibleref::Error;

/// ANSI bold, used for headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown and print to stderr, headings in bold when
/// stderr is a terminal.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    let bold = std::io::stderr().is_terminal();
    for line in md.lines() {
        if bold && line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened,
/// and how to fix it where there is a fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::CanonCorrupt { reason } => render_canon_corrupt(reason),
        Error::InvalidPassage { passage, .. } => render_invalid_passage(passage, e.source()),
        Error::InvalidReference { reference } => render_invalid_passage(reference, None),
        Error::NotFound { input } => render_not_found(input),
        Error::Parse { input } => render_parse(input),
        _ => render_generic(e),
    };
}

/// Variants without a dedicated template.
fn render_generic(e: &Error) -> String {
    return match e {
        Error::ConfigNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.

## Fix

Check the `canon` path in your `.bibleref.toml`.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: Invalid JSON

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Valid keys in `.bibleref.toml` are `canon`, `on_invalid`, `include`,
`exclude` and `extensions`.
"),
        _ => format!("\
# Error

{e}
"),
    };
}

fn render_canon_corrupt(reason: &str) -> String {
    return format!("\
# Error: Canon Corrupt

{reason}

## Expected shape

    [{{\"book\": \"Genesis\", \"chapters\": [31, 25, 24]}}]
");
}

fn render_invalid_passage(passage: &str, cause: Option<&(dyn std::error::Error + 'static)>) -> String {
    let mut out = format!("\
# Error: Not In Canon

`{passage}` is well-formed, but the canon has no such book, chapter, or verse.
");

    if let Some(cause) = cause {
        let _ = write!(out, "\n## Cause\n\n{cause}\n");
    }

    out.push_str("\
\n## Fix

List books and chapter counts with:

    bibleref books
");
    return out;
}

fn render_not_found(input: &str) -> String {
    let shown = if input.is_empty() { "(empty input)" } else { input };
    return format!("\
# Error: No Passage Found

Nothing in the input looks like a citation:

    {shown}
");
}

fn render_parse(input: &str) -> String {
    return format!("\
# Error: Not A Citation

`{input}` is not citation syntax.

## Accepted forms

    Genesis                     whole book
    Genesis 1                   whole chapter
    Genesis 1:12                single verse
    Genesis 1:12-16             verses in one chapter
    Genesis 1-3                 chapters
    Genesis 1:12-2:16           across chapters
    Genesis 1-3:2               chapter to verse
    Genesis 50:26-Exodus 1:1    across books

Book names must match the canon exactly, including case.
");
}
