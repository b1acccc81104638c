//! Live rasterizer that shells out to ImageMagick.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::AnnotateError;
use crate::ports::rasterizer::{RasterRequest, Rasterizer};

/// Executable names tried in order. `magick` is the ImageMagick 7 entry point,
/// `convert` the legacy one.
pub const TOOL_NAMES: &[&str] = &["magick", "convert"];

/// Rasterizer that runs `<tool> -density D <svg> -resize WxH! <png>`.
#[derive(Debug)]
pub struct ImageMagick {
    program: PathBuf,
}

impl ImageMagick {
    /// Locate ImageMagick on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::ToolMissing`] if none of [`TOOL_NAMES`] is found.
    pub fn discover() -> Result<Self, AnnotateError> {
        Self::discover_in(std::env::var_os("PATH"))
    }

    /// Locate ImageMagick in an explicit search path.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::ToolMissing`] if none of [`TOOL_NAMES`] is found.
    pub fn discover_in(search_path: Option<OsString>) -> Result<Self, AnnotateError> {
        let dirs: Vec<PathBuf> =
            search_path.map(|p| std::env::split_paths(&p).collect()).unwrap_or_default();
        TOOL_NAMES
            .iter()
            .find_map(|name| find_executable(&dirs, name))
            .map(|program| {
                tracing::debug!(program = %program.display(), "found ImageMagick");
                Self { program }
            })
            .ok_or_else(|| AnnotateError::ToolMissing {
                searched: TOOL_NAMES.iter().map(ToString::to_string).collect(),
            })
    }

    /// Path of the executable that will be run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, request: &RasterRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-density")
            .arg(request.density.to_string())
            .arg(request.svg)
            .arg("-resize")
            .arg(format!("{}x{}!", request.width, request.height))
            .arg(request.png);
        cmd
    }
}

impl Rasterizer for ImageMagick {
    fn rasterize(&self, request: &RasterRequest<'_>) -> Result<(), AnnotateError> {
        let mut cmd = self.command(request);
        println!("Rasterizing SVG into PNG with command: {}", render_command(&cmd));

        let status = cmd.status().map_err(|e| {
            AnnotateError::RasterizeFailed(format!("could not run {}: {e}", self.program.display()))
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(AnnotateError::RasterizeFailed(format!(
                "{} exited with {status}",
                self.program.display()
            )))
        }
    }
}

fn render_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_executable(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().find_map(|dir| {
        candidates(dir, name).into_iter().find(|candidate| is_executable(candidate))
    })
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(format!("{name}.exe")), dir.join(name)]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
