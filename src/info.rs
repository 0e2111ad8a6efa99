use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{CONFIG_FILE, Config, OnInvalid};

/// Output the bibleref reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

/// What `info` reports about the working directory.
struct CurrentState {
    /// Number of books in the active canon, if it loads.
    books: Option<usize>,
    /// Configured canon path, `None` for the standard canon.
    canon: Option<PathBuf>,
    /// Why the canon failed to load.
    canon_error: Option<String>,
    /// Why `.bibleref.toml` failed to load; nothing below it is known then.
    config_error: Option<String>,
    /// Whether `.bibleref.toml` exists.
    config_found: bool,
    /// Active extraction policy, if the config loaded.
    on_invalid: Option<OnInvalid>,
}

fn gather_state(root: &Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();
    let config = match Config::load(root) {
        Err(e) => {
            return CurrentState {
                books: None,
                canon: None,
                canon_error: None,
                config_error: Some(e.to_string()),
                config_found,
                on_invalid: None,
            };
        },
        Ok(c) => c,
    };

    let (books, canon_error) = match config.load_canon(root) {
        Err(e) => (None, Some(e.to_string())),
        Ok(c) => (Some(c.len()), None),
    };
    return CurrentState {
        books,
        canon: config.canon_path().map(Path::to_path_buf),
        canon_error,
        config_error: None,
        config_found,
        on_invalid: Some(config.on_invalid),
    };
}

/// Policy name as written in the config file.
const fn policy_name(policy: OnInvalid) -> &'static str {
    return match policy {
        OnInvalid::Abort => "abort",
        OnInvalid::Skip => "skip",
    };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# bibleref {version}

Parse, validate and extract Bible citations.

## Citation Syntax

    Genesis                     whole book
    Genesis 1                   whole chapter
    Genesis 1:12                single verse
    Genesis 1:12-16             verses in one chapter
    Genesis 1-3                 chapters
    Genesis 1:12-2:16           across chapters
    Genesis 1-3:2               chapter to verse
    Genesis 50:26-Exodus 1:1    across books

Book names are matched exactly, longest first. A chapter or verse of 0
means unspecified.

## Commands

    bibleref parse <TEXT>...          Parse and print each passage
    bibleref extract [TEXT]           Print every passage found in text or stdin
    bibleref extract --first [TEXT]   Print only the first passage
    bibleref scan [ROOT]              Report passages in files as path:line
    bibleref books                    List the canon's books and chapter counts
    bibleref info                     This document

Add --json to any command for machine-readable output.

## Configuration (.bibleref.toml)

    canon = \"canon.json\"               # alternate canon, relative to the root
    on_invalid = \"skip\"                # skip | abort
    include = [\"sermons/\"]             # only scan these paths
    exclude = [\"sermons/drafts/\"]      # skip these paths
    extensions = [\"md\", \"txt\"]         # file types scan reads

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    if let Some(err) = &state.config_error {
        println!("Config:     {CONFIG_FILE} (malformed)");
        for line in err.lines() {
            println!("            {line}");
        }
        println!("Canon:      (unknown)");
        println!("On invalid: (unknown)");
        return;
    }

    if state.config_found {
        println!("Config:     {CONFIG_FILE} (found)");
    } else {
        println!("Config:     {CONFIG_FILE} (not found)");
    }

    let source = state
        .canon
        .as_ref()
        .map_or_else(|| return "standard".to_string(), |p| return p.display().to_string());
    match (state.books, &state.canon_error) {
        (Some(n), _) => println!("Canon:      {source} ({n} books)"),
        (None, Some(err)) => println!("Canon:      {source} (failed to load: {err})"),
        (None, None) => println!("Canon:      {source} (failed to load)"),
    }

    if let Some(policy) = state.on_invalid {
        println!("On invalid: {}", policy_name(policy));
    }
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Error, or no passage found |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    current_state: StateJson,
    exit_codes: Vec<ExitCodeInfo>,
    forms: Vec<FormInfo>,
    version: String,
}

#[derive(Serialize)]
struct FormInfo {
    example: String,
    meaning: String,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    books: Option<usize>,
    canon: Option<String>,
    canon_error: Option<String>,
    config_error: Option<String>,
    config_found: bool,
    on_invalid: Option<OnInvalid>,
}

fn print_json(state: &CurrentState) {
    let forms = [
        ("Genesis", "whole book"),
        ("Genesis 1", "whole chapter"),
        ("Genesis 1:12", "single verse"),
        ("Genesis 1:12-16", "verses in one chapter"),
        ("Genesis 1-3", "chapters"),
        ("Genesis 1:12-2:16", "across chapters"),
        ("Genesis 1-3:2", "chapter to verse"),
        ("Genesis 50:26-Exodus 1:1", "across books"),
    ];

    let info = InfoJson {
        current_state: StateJson {
            books: state.books,
            canon: state.canon.as_ref().map(|p| return p.display().to_string()),
            canon_error: state.canon_error.clone(),
            config_error: state.config_error.clone(),
            config_found: state.config_found,
            on_invalid: state.on_invalid,
        },
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Error, or no passage found".to_string() },
        ],
        forms: forms
            .iter()
            .map(|(example, meaning)| {
                return FormInfo { example: (*example).to_string(), meaning: (*meaning).to_string() };
            })
            .collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_config_uses_standard_canon() {
        let dir = tempfile::tempdir().unwrap();
        let state = gather_state(dir.path());
        assert!(!state.config_found);
        assert!(state.config_error.is_none());
        assert!(state.canon.is_none());
        assert_eq!(state.books, Some(66));
        assert_eq!(state.on_invalid, Some(OnInvalid::Skip));
    }

    #[test]
    fn state_reports_broken_canon() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "canon = \"missing.json\"\non_invalid = \"abort\"\n")
            .unwrap();
        let state = gather_state(dir.path());
        assert!(state.config_found);
        assert_eq!(state.books, None);
        assert!(state.canon_error.as_deref().is_some_and(|e| e.contains("missing.json")));
        assert_eq!(state.canon.as_deref(), Some(Path::new("missing.json")));
        assert_eq!(state.on_invalid.map(policy_name), Some("abort"));
    }

    #[test]
    fn malformed_config_is_reported_not_defaulted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "on_invalid = \"sometimes\"\n").unwrap();
        let state = gather_state(dir.path());
        assert!(state.config_found);
        assert!(state.config_error.is_some());
        assert_eq!(state.books, None);
        assert_eq!(state.on_invalid, None);
    }
}
