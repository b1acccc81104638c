//! validate-content - check content.json before publishing.

use std::path::Path;
use std::process;

use clap::Parser;

use profile_kit::adapters::live::HttpFeedProbe;
use profile_kit::cli::ValidateCli;
use profile_kit::config::{self, Config};
use profile_kit::content::{self, ContentDocument};
use profile_kit::error::ValidateError;
use profile_kit::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = ValidateCli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}

/// Returns whether the document is valid.
async fn run(cli: &ValidateCli) -> Result<bool, ValidateError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ValidateError::Config)?;
    let settings = cli.apply(config.validator);

    let document = ContentDocument::load(&settings.content_path)?;
    let root = cli.root.as_deref().unwrap_or(Path::new("."));
    let report = content::check(document.value(), root);
    tracing::debug!(issues = report.issues.len(), feeds = report.feeds.len(), "structural pass done");

    if settings.skip_feeds {
        tracing::debug!("feed probes skipped");
    } else if !report.feeds.is_empty() {
        let probe = HttpFeedProbe::new(settings.timeout(), &settings.user_agent)?;
        for warning in content::probe_feeds(&probe, &report.feeds).await {
            println!("{warning}");
        }
    }

    if report.is_valid() {
        println!(
            "{} looks valid and referenced files exist (if any).",
            document.path().display()
        );
        Ok(true)
    } else {
        for issue in &report.issues {
            println!("{issue}");
        }
        Ok(false)
    }
}
