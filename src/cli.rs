//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BannerConfig, ValidatorConfig};

/// Validate content.json and the files and feeds it references.
#[derive(Parser, Debug)]
#[command(name = "validate-content", version, about)]
pub struct ValidateCli {
    /// Content document to validate [default: content.json].
    pub content: Option<PathBuf>,

    /// Directory that relative file references resolve against.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Do not probe passion feed URLs over the network.
    #[arg(long)]
    pub skip_feeds: bool,

    /// Feed probe timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User agent sent with feed probes.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ValidateCli {
    /// Layer the flags that were given over `base`.
    #[must_use]
    pub fn apply(&self, mut base: ValidatorConfig) -> ValidatorConfig {
        if let Some(ref path) = self.content {
            base.content_path.clone_from(path);
        }
        if let Some(secs) = self.timeout {
            base.timeout_secs = secs;
        }
        if let Some(ref agent) = self.user_agent {
            base.user_agent.clone_from(agent);
        }
        base.skip_feeds |= self.skip_feeds;
        base
    }
}

/// Rasterize the banner SVG if needed and overlay the caption.
#[derive(Parser, Debug)]
#[command(name = "annotate-banner", version, about)]
pub struct AnnotateCli {
    /// Vector source used when the PNG is missing.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Raster source to annotate.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Output file path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Caption text.
    #[arg(short, long)]
    pub caption: Option<String>,

    /// TrueType font for the caption.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Rasterize the SVG even if the PNG already exists.
    #[arg(long)]
    pub force_rasterize: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl AnnotateCli {
    /// Layer the flags that were given over `base`.
    #[must_use]
    pub fn apply(&self, mut base: BannerConfig) -> BannerConfig {
        if let Some(ref p) = self.svg {
            base.svg.clone_from(p);
        }
        if let Some(ref p) = self.png {
            base.png.clone_from(p);
        }
        if let Some(ref p) = self.output {
            base.output.clone_from(p);
        }
        if let Some(ref text) = self.caption {
            base.caption.clone_from(text);
        }
        if let Some(ref p) = self.font {
            base.font.clone_from(p);
        }
        if let Some(size) = self.font_size {
            base.font_size = size;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_defaults() {
        let cli = ValidateCli::parse_from(["validate-content"]);
        assert!(cli.content.is_none());
        assert!(!cli.skip_feeds);
        assert!(!cli.verbose);

        let config = cli.apply(ValidatorConfig::default());
        assert_eq!(config.content_path, PathBuf::from("content.json"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn validate_flags_override_config() {
        let cli = ValidateCli::parse_from([
            "validate-content",
            "--skip-feeds",
            "--timeout",
            "2",
            "--user-agent",
            "ci/1.0",
            "site/content.json",
        ]);
        let config = cli.apply(ValidatorConfig::default());
        assert_eq!(config.content_path, PathBuf::from("site/content.json"));
        assert_eq!(config.timeout_secs, 2);
        assert_eq!(config.user_agent, "ci/1.0");
        assert!(config.skip_feeds);
    }

    #[test]
    fn skip_feeds_from_config_survives_absent_flag() {
        let cli = ValidateCli::parse_from(["validate-content"]);
        let config = cli.apply(ValidatorConfig { skip_feeds: true, ..ValidatorConfig::default() });
        assert!(config.skip_feeds);
    }

    #[test]
    fn annotate_defaults_come_from_config() {
        let cli = AnnotateCli::parse_from(["annotate-banner"]);
        let config = cli.apply(BannerConfig::default());
        assert_eq!(config.png, PathBuf::from("img/banner-final.png"));
        assert!(!cli.force_rasterize);
    }

    #[test]
    fn annotate_all_options() {
        let cli = AnnotateCli::parse_from([
            "annotate-banner",
            "--svg",
            "a.svg",
            "--png",
            "a.png",
            "-o",
            "b.png",
            "-c",
            "Hello",
            "--font",
            "f.ttf",
            "--font-size",
            "30",
            "--force-rasterize",
            "-v",
        ]);
        let config = cli.apply(BannerConfig::default());
        assert_eq!(config.svg, PathBuf::from("a.svg"));
        assert_eq!(config.png, PathBuf::from("a.png"));
        assert_eq!(config.output, PathBuf::from("b.png"));
        assert_eq!(config.caption, "Hello");
        assert_eq!(config.font, PathBuf::from("f.ttf"));
        assert!((config.font_size - 30.0).abs() < f32::EPSILON);
        assert!(cli.force_rasterize);
        assert!(cli.verbose);
    }
}
