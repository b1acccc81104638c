//! Content document loading and structural validation.
//!
//! Validation is split in two passes. [`check`] is pure and collects every
//! structural [`Issue`] plus the feed URLs that are shaped correctly.
//! [`probe_feeds`] then asks a [`FeedProbe`] about those URLs and only ever
//! produces warnings.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ValidateError;
use crate::ports::{FeedProbe, FeedWarning};

/// Top-level keys whose values are paths that must exist on disk.
pub const FILE_KEYS: &[&str] = &["profileImage", "resume"];

/// A parsed content document.
#[derive(Debug)]
pub struct ContentDocument {
    path: PathBuf,
    value: Value,
}

impl ContentDocument {
    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::MissingFile`] if the file does not exist,
    /// [`ValidateError::Read`] if it cannot be read and
    /// [`ValidateError::Parse`] if it is not well-formed JSON.
    pub fn load(path: &Path) -> Result<Self, ValidateError> {
        if !path.exists() {
            return Err(ValidateError::MissingFile { path: path.to_path_buf() });
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| ValidateError::Read { path: path.to_path_buf(), source })?;
        Self::parse(path, &text)
    }

    /// Parse document text that was read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Parse`] if `text` is not well-formed JSON.
    pub fn parse(path: &Path, text: &str) -> Result<Self, ValidateError> {
        let value = serde_json::from_str(text)
            .map_err(|source| ValidateError::Parse { path: path.to_path_buf(), source })?;
        Ok(Self { path: path.to_path_buf(), value })
    }

    /// Where the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw JSON value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A structural problem in the content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The document root is not a JSON object.
    NotAnObject,
    /// A file key points at a path that does not exist.
    MissingReferencedFile {
        /// The top-level key.
        key: String,
        /// The referenced path, as written.
        path: String,
    },
    /// A file key holds something other than a string.
    NotAPath {
        /// The top-level key.
        key: String,
    },
    /// `passions` is not an array.
    WrongType,
    /// A passion entry is not an object.
    ElementWrongType {
        /// Index in `passions`.
        index: usize,
    },
    /// A passion entry has no string `label`.
    MissingLabel {
        /// Index in `passions`.
        index: usize,
    },
    /// A passion `feed` is not a string.
    FeedWrongType {
        /// Index in `passions`.
        index: usize,
    },
    /// A passion `feed` is not an http(s) URL.
    FeedWrongUrl {
        /// Index in `passions`.
        index: usize,
        /// The offending value.
        feed: String,
    },
    /// A passion `album` is not an object.
    AlbumWrongType {
        /// Index in `passions`.
        index: usize,
    },
    /// A passion `album.images` is not an array of strings.
    AlbumImagesWrongType {
        /// Index in `passions`.
        index: usize,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("content document should be an object"),
            Self::MissingReferencedFile { key, path } => {
                write!(f, "{key} references missing file: {path}")
            }
            Self::NotAPath { key } => write!(f, "{key} should be a string path"),
            Self::WrongType => f.write_str("passions should be an array"),
            Self::ElementWrongType { index } => write!(f, "passions[{index}] should be an object"),
            Self::MissingLabel { index } => {
                write!(f, "passions[{index}].label missing or not a string")
            }
            Self::FeedWrongType { index } => write!(f, "passions[{index}].feed must be a string URL"),
            Self::FeedWrongUrl { index, feed } => {
                write!(f, "passions[{index}].feed does not look like a valid URL: {feed}")
            }
            Self::AlbumWrongType { index } => write!(f, "passions[{index}].album should be an object"),
            Self::AlbumImagesWrongType { index } => {
                write!(f, "passions[{index}].album.images should be an array of strings")
            }
        }
    }
}

/// Result of the structural pass.
#[derive(Debug, Default)]
pub struct Report {
    /// Structural issues in check order.
    pub issues: Vec<Issue>,
    /// Feed URLs that passed the shape check, in document order.
    pub feeds: Vec<String>,
}

impl Report {
    /// True when no structural issue was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run every structural check against `doc`. Relative file references are
/// resolved against `root`.
#[must_use]
pub fn check(doc: &Value, root: &Path) -> Report {
    let mut report = Report::default();

    if !doc.is_object() {
        report.issues.push(Issue::NotAnObject);
        return report;
    }

    for key in FILE_KEYS {
        check_file(doc, key, root, &mut report);
    }

    if let Some(passions) = doc.get("passions") {
        check_passions(passions, &mut report);
    }

    report
}

fn check_file(doc: &Value, key: &str, root: &Path, report: &mut Report) {
    let Some(value) = doc.get(key).filter(|v| is_truthy(v)) else {
        return;
    };
    match value.as_str() {
        Some(path) => {
            if !root.join(path).exists() {
                report
                    .issues
                    .push(Issue::MissingReferencedFile { key: key.to_string(), path: path.to_string() });
            }
        }
        None => report.issues.push(Issue::NotAPath { key: key.to_string() }),
    }
}

fn check_passions(passions: &Value, report: &mut Report) {
    let Some(entries) = passions.as_array() else {
        report.issues.push(Issue::WrongType);
        return;
    };

    for (index, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            report.issues.push(Issue::ElementWrongType { index });
            continue;
        };
        check_passion(index, entry, report);
    }
}

fn check_passion(index: usize, entry: &Map<String, Value>, report: &mut Report) {
    if !entry.get("label").is_some_and(Value::is_string) {
        report.issues.push(Issue::MissingLabel { index });
    }

    if let Some(feed) = entry.get("feed") {
        match feed.as_str() {
            None => report.issues.push(Issue::FeedWrongType { index }),
            Some(url) if is_http_url(url) => report.feeds.push(url.to_string()),
            Some(url) => report.issues.push(Issue::FeedWrongUrl { index, feed: url.to_string() }),
        }
    }

    if let Some(album) = entry.get("album") {
        match album.as_object() {
            None => report.issues.push(Issue::AlbumWrongType { index }),
            Some(album) => {
                let images_ok = album.get("images").map_or(true, |images| {
                    images.as_array().is_some_and(|list| list.iter().all(Value::is_string))
                });
                if !images_ok {
                    report.issues.push(Issue::AlbumImagesWrongType { index });
                }
            }
        }
    }
}

/// Whether `url` starts with an http or https scheme.
#[must_use]
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are
/// treated as "not set".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Probe each feed once, in order, and collect the warnings.
pub async fn probe_feeds(probe: &dyn FeedProbe, feeds: &[String]) -> Vec<FeedWarning> {
    let mut warnings = Vec::new();
    for url in feeds {
        let status = probe.probe(url).await;
        tracing::debug!(%url, ?status, "probed feed");
        if let Some(warning) = status.warning(url) {
            warnings.push(warning);
        }
    }
    warnings
}
