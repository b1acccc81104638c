//! Banner annotation: rasterize if needed, overlay the caption, write a PNG.

pub mod font;
pub mod layout;

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::config::BannerConfig;
use crate::error::AnnotateError;
use crate::ports::{RasterRequest, Rasterizer};

pub use font::{CaptionFont, TextSize};
pub use layout::{draw_caption, place, CaptionLayout};

/// Everything one annotation run needs.
#[derive(Debug, Clone)]
pub struct BannerJob {
    /// Paths, caption and font settings.
    pub settings: BannerConfig,
    /// Rasterize even when the source PNG already exists.
    pub force_rasterize: bool,
}

/// Fail early if the `image` crate cannot both read and write PNG.
///
/// # Errors
///
/// Returns [`AnnotateError::DependencyMissing`] when PNG support was compiled out.
pub fn ensure_png_support() -> Result<(), AnnotateError> {
    if ImageFormat::Png.reading_enabled() && ImageFormat::Png.writing_enabled() {
        Ok(())
    } else {
        Err(AnnotateError::DependencyMissing)
    }
}

/// Make sure the source PNG exists, rasterizing the SVG when it does not.
///
/// `locate` is only called when rasterization is actually needed, so a missing
/// tool is not an error while the PNG is present.
///
/// # Errors
///
/// Returns [`AnnotateError::SourceMissing`] if the SVG is needed but absent,
/// or whatever `locate` and the rasterizer return.
pub fn prepare_source<R, F>(job: &BannerJob, locate: F) -> Result<(), AnnotateError>
where
    R: Rasterizer,
    F: FnOnce() -> Result<R, AnnotateError>,
{
    let settings = &job.settings;
    if settings.png.exists() && !job.force_rasterize {
        return Ok(());
    }
    if !settings.svg.exists() {
        return Err(AnnotateError::SourceMissing {
            svg: settings.svg.clone(),
            png: settings.png.clone(),
        });
    }

    let rasterizer = locate()?;
    rasterizer.rasterize(&RasterRequest {
        svg: &settings.svg,
        png: &settings.png,
        width: settings.width,
        height: settings.height,
        density: settings.density,
    })
}

/// Annotate the PNG at `source` and write the result to `output`.
///
/// # Errors
///
/// Returns [`AnnotateError::SourceUnreadable`] if the PNG cannot be decoded and
/// [`AnnotateError::WriteFailed`] if the result cannot be written.
pub fn annotate_file(
    source: &Path,
    output: &Path,
    font: &CaptionFont,
    caption: &str,
) -> Result<(), AnnotateError> {
    let image = image::open(source)
        .map_err(|e| AnnotateError::SourceUnreadable {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?
        .into_rgba8();
    tracing::debug!(width = image.width(), height = image.height(), "loaded source");

    let annotated = draw_caption(image, font, caption);

    annotated.save_with_format(output, ImageFormat::Png).map_err(|e| AnnotateError::WriteFailed {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Run the full pipeline and return the output path.
///
/// # Errors
///
/// Returns the first [`AnnotateError`] hit by any step.
pub fn run<R, F>(job: &BannerJob, locate: F) -> Result<PathBuf, AnnotateError>
where
    R: Rasterizer,
    F: FnOnce() -> Result<R, AnnotateError>,
{
    ensure_png_support()?;
    prepare_source(job, locate)?;

    let settings = &job.settings;
    let font = CaptionFont::load_or_builtin(&settings.font, settings.font_size);
    tracing::debug!(?font, "caption font");

    annotate_file(&settings.png, &settings.output, &font, &settings.caption)?;
    Ok(settings.output.clone())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use image::{Rgba, RgbaImage};

    use super::*;

    /// Writes a solid PNG of the requested size instead of running a tool.
    struct SolidRasterizer<'a> {
        calls: &'a Cell<u32>,
    }

    impl Rasterizer for SolidRasterizer<'_> {
        fn rasterize(&self, request: &RasterRequest<'_>) -> Result<(), AnnotateError> {
            self.calls.set(self.calls.get() + 1);
            RgbaImage::from_pixel(request.width, request.height, Rgba([30, 60, 90, 255]))
                .save_with_format(request.png, ImageFormat::Png)
                .map_err(|e| AnnotateError::RasterizeFailed(e.to_string()))
        }
    }

    struct NeverRasterizer;

    impl Rasterizer for NeverRasterizer {
        fn rasterize(&self, _request: &RasterRequest<'_>) -> Result<(), AnnotateError> {
            panic!("rasterizer must not be used");
        }
    }

    fn job_in(dir: &Path) -> BannerJob {
        BannerJob {
            settings: BannerConfig {
                svg: dir.join("banner.svg"),
                png: dir.join("banner.png"),
                output: dir.join("banner-text.png"),
                font: dir.join("missing.ttf"),
                width: 320,
                height: 80,
                ..BannerConfig::default()
            },
            force_rasterize: false,
        }
    }

    fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn png_support_is_compiled_in() {
        assert!(ensure_png_support().is_ok());
    }

    #[test]
    fn missing_png_and_svg_is_source_missing() {
        let dir = fresh_dir("profile_kit_banner_no_sources");
        let job = job_in(&dir);

        let err = run(&job, || -> Result<NeverRasterizer, AnnotateError> {
            panic!("tool lookup must not happen")
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 11);
        assert!(!job.settings.output.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_tool_surfaces_from_locate() {
        let dir = fresh_dir("profile_kit_banner_no_tool");
        let job = job_in(&dir);
        std::fs::write(&job.settings.svg, "<svg/>").unwrap();

        let err = run(&job, || -> Result<NeverRasterizer, AnnotateError> {
            Err(AnnotateError::ToolMissing { searched: vec!["magick".into()] })
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 12);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rasterizes_then_annotates() {
        let dir = fresh_dir("profile_kit_banner_rasterize");
        let job = job_in(&dir);
        std::fs::write(&job.settings.svg, "<svg/>").unwrap();
        let calls = Cell::new(0);

        let out = run(&job, || Ok(SolidRasterizer { calls: &calls })).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(image::image_dimensions(&out).unwrap(), (320, 80));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn existing_png_skips_rasterizer_unless_forced() {
        let dir = fresh_dir("profile_kit_banner_existing");
        let mut job = job_in(&dir);
        RgbaImage::from_pixel(200, 50, Rgba([0, 0, 0, 255])).save(&job.settings.png).unwrap();

        run(&job, || Ok(NeverRasterizer)).unwrap();
        assert_eq!(image::image_dimensions(&job.settings.output).unwrap(), (200, 50));

        job.force_rasterize = true;
        std::fs::write(&job.settings.svg, "<svg/>").unwrap();
        let calls = Cell::new(0);
        run(&job, || Ok(SolidRasterizer { calls: &calls })).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(image::image_dimensions(&job.settings.output).unwrap(), (320, 80));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_png_is_source_unreadable() {
        let dir = fresh_dir("profile_kit_banner_corrupt");
        let job = job_in(&dir);
        std::fs::write(&job.settings.png, b"not a png").unwrap();

        let err = run(&job, || Ok(NeverRasterizer)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!job.settings.output.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
