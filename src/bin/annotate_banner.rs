//! annotate-banner - caption the profile banner.

use std::process;

use clap::Parser;

use profile_kit::adapters::live::ImageMagick;
use profile_kit::banner::{self, BannerJob};
use profile_kit::cli::AnnotateCli;
use profile_kit::config::{self, Config};
use profile_kit::error::AnnotateError;
use profile_kit::logging;

fn main() {
    let cli = AnnotateCli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(output) => println!("Wrote: {}", output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &AnnotateCli) -> Result<std::path::PathBuf, AnnotateError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AnnotateError::Config)?;

    let job = BannerJob { settings: cli.apply(config.banner), force_rasterize: cli.force_rasterize };
    if cli.verbose {
        eprintln!("Source: {}", job.settings.png.display());
        eprintln!("Output: {}", job.settings.output.display());
    }

    banner::run(&job, ImageMagick::discover)
}
