use std::path::{Path, PathBuf};

use bibleref::{Canon, Error};

/// Config file looked up in the working directory or scan root.
pub const CONFIG_FILE: &str = ".bibleref.toml";

/// What to do with a citation that parses but is not in the canon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnInvalid {
    /// Stop and report the error; passages already printed stay printed.
    Abort,
    /// Drop the match and keep scanning.
    #[default]
    Skip,
}

/// Project configuration loaded from `.bibleref.toml`.
/// Include/exclude patterns are path prefixes applied to scanned files.
pub struct Config {
    /// Alternate canon, relative to the root.
    canon: Option<PathBuf>,
    /// Skip path prefixes.
    exclude: Vec<String>,
    /// File extensions `scan` reads, without the dot.
    extensions: Vec<String>,
    /// Only-scan path prefixes; empty means everything.
    include: Vec<String>,
    /// Extraction policy.
    pub on_invalid: OnInvalid,
}

/// Raw TOML structure for `.bibleref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BiblerefTomlConfig {
    /// See [`Config::canon`].
    canon: Option<PathBuf>,
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::extensions`].
    extensions: Option<Vec<String>>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::on_invalid`].
    #[serde(default)]
    on_invalid: OnInvalid,
}

impl Config {
    /// Path of the alternate canon, if one is configured.
    pub fn canon_path(&self) -> Option<&Path> {
        return self.canon.as_deref();
    }

    /// Load config from `.bibleref.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config, using defaults");
                return Ok(Self::defaults());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: BiblerefTomlConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        return Ok(Self {
            canon: raw.canon,
            exclude: raw.exclude,
            extensions: raw.extensions.unwrap_or_else(default_extensions),
            include: raw.include,
            on_invalid: raw.on_invalid,
        });
    }

    /// The configured canon, or the standard one.
    ///
    /// # Errors
    ///
    /// Returns errors from [`Canon::load`] for a configured path.
    pub fn load_canon(&self, root: &Path) -> Result<Canon, Error> {
        return match &self.canon {
            None => Ok(Canon::standard().clone()),
            Some(path) => Canon::load(&root.join(path)),
        };
    }

    /// Scan everything with the standard canon, skipping invalid citations.
    fn defaults() -> Self {
        return Self {
            canon: None,
            exclude: Vec::new(),
            extensions: default_extensions(),
            include: Vec::new(),
            on_invalid: OnInvalid::Skip,
        };
    }

    /// Check whether a file's extension is one `scan` reads.
    pub fn scans_extension(&self, path: &Path) -> bool {
        return path
            .extension()
            .and_then(|ext| return ext.to_str())
            .is_some_and(|ext| return self.extensions.iter().any(|e| return e == ext));
    }

    /// Check whether a file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

/// Markdown and plain text.
fn default_extensions() -> Vec<String> {
    return vec!["md".to_string(), "txt".to_string()];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) {
        std::fs::write(dir.join(CONFIG_FILE), body).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.on_invalid, OnInvalid::Skip);
        assert!(config.canon_path().is_none());
        assert!(config.should_scan("anything/at/all.md"));
        assert!(config.scans_extension(Path::new("notes.md")));
        assert!(config.scans_extension(Path::new("notes.txt")));
        assert!(!config.scans_extension(Path::new("main.rs")));
    }

    #[test]
    fn reads_policy_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
on_invalid = "abort"
include = ["sermons/"]
exclude = ["sermons/drafts/"]
extensions = ["org"]
"#,
        );
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.on_invalid, OnInvalid::Abort);
        assert!(config.should_scan("sermons/advent.org"));
        assert!(!config.should_scan("sermons/drafts/lent.org"));
        assert!(!config.should_scan("notes/misc.org"));
        assert!(config.scans_extension(Path::new("a.org")));
        assert!(!config.scans_extension(Path::new("a.md")));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "on_invalid = \"sometimes\"\n");
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));

        write_config(dir.path(), "colour = \"blue\"\n");
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn loads_custom_canon_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("canon.json"),
            r#"[{"book": "Letter", "chapters": [3]}]"#,
        )
        .unwrap();
        write_config(dir.path(), "canon = \"canon.json\"\n");

        let config = Config::load(dir.path()).unwrap();
        let canon = config.load_canon(dir.path()).unwrap();
        assert!(canon.is_book("Letter"));
        assert!(!canon.is_book("Genesis"));
    }

    #[test]
    fn missing_custom_canon_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "canon = \"nowhere.json\"\n");
        let config = Config::load(dir.path()).unwrap();
        assert!(matches!(config.load_canon(dir.path()), Err(Error::ConfigNotFound { .. })));
    }
}
