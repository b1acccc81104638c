//! Error types for both tools, each with a stable process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that stop the content validator before any issue is reported.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The content document does not exist.
    #[error("{} not found", path.display())]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The content document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The content document is not well-formed JSON.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The HTTP client for feed probes could not be built, usually because the
    /// configured user agent is not a valid header value.
    #[error("Failed to build HTTP client (check user_agent): {0}")]
    Client(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl ValidateError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Client(_) => 2,
            _ => 1,
        }
    }
}

/// Errors that stop the banner annotator.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The `image` crate was built without PNG support.
    #[error("PNG support is not available in this build (image crate needs the `png` feature)")]
    DependencyMissing,

    /// Neither the source PNG nor the source SVG exists.
    #[error(
        "Source SVG {} is missing. Place a banner SVG there or create {} manually.",
        svg.display(),
        png.display()
    )]
    SourceMissing {
        /// Expected SVG path.
        svg: PathBuf,
        /// Expected PNG path.
        png: PathBuf,
    },

    /// No ImageMagick executable was found on `PATH`.
    #[error(
        "ImageMagick not found on PATH (looked for {}). Install ImageMagick and ensure `magick` is on your PATH.",
        searched.join(", ")
    )]
    ToolMissing {
        /// Executable names that were searched for.
        searched: Vec<String>,
    },

    /// The rasterization command failed to run or exited unsuccessfully.
    #[error("ImageMagick rasterize failed: {0}")]
    RasterizeFailed(String),

    /// The source PNG could not be opened or decoded.
    #[error("{} could not be opened; cannot annotate: {reason}", path.display())]
    SourceUnreadable {
        /// PNG path.
        path: PathBuf,
        /// Decoder or I/O message.
        reason: String,
    },

    /// The annotated PNG could not be written.
    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed {
        /// Output path.
        path: PathBuf,
        /// Encoder or I/O message.
        reason: String,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl AnnotateError {
    /// Process exit code for this error. Each cause has its own code so
    /// callers can script around them.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::SourceUnreadable { .. } => 3,
            Self::WriteFailed { .. } => 4,
            Self::DependencyMissing => 10,
            Self::SourceMissing { .. } => 11,
            Self::ToolMissing { .. } => 12,
            Self::RasterizeFailed(_) => 13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_exit_codes_are_distinct() {
        let errors = [
            AnnotateError::Config("x".into()),
            AnnotateError::SourceUnreadable { path: "a.png".into(), reason: "x".into() },
            AnnotateError::WriteFailed { path: "b.png".into(), reason: "x".into() },
            AnnotateError::DependencyMissing,
            AnnotateError::SourceMissing { svg: "a.svg".into(), png: "a.png".into() },
            AnnotateError::ToolMissing { searched: vec!["magick".into()] },
            AnnotateError::RasterizeFailed("x".into()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(AnnotateError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn missing_file_message_names_path() {
        let err = ValidateError::MissingFile { path: "content.json".into() };
        assert_eq!(err.to_string(), "content.json not found");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn bad_user_agent_is_a_config_exit() {
        let source = reqwest::Client::builder().user_agent("bad\u{7f}agent").build().unwrap_err();
        let err = ValidateError::from(source);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Failed to build HTTP client"));
    }

    #[test]
    fn tool_missing_lists_candidates() {
        let err = AnnotateError::ToolMissing { searched: vec!["magick".into(), "convert".into()] };
        assert!(err.to_string().contains("magick, convert"));
    }
}
