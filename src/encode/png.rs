use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::canvas::surface::Canvas;
use crate::foundation::error::{PolyfitError, PolyfitResult};

/// File path of the snapshot for evaluation `index` inside `dir`.
pub fn snapshot_path(dir: impl AsRef<Path>, index: u64) -> PathBuf {
    dir.as_ref().join(format!("render{index}.png"))
}

/// Write `canvas` as an 8-bit RGB PNG, creating parent directories as needed.
///
/// Every failure is reported as [`PolyfitError::Draw`].
pub fn write_canvas_png(canvas: &Canvas, path: impl AsRef<Path>) -> PolyfitResult<()> {
    let path = path.as_ref();
    save_rgb_png(canvas, path)
        .map_err(|e| PolyfitError::draw(format!("'{}': {e:#}", path.display())))?;
    tracing::trace!(path = %path.display(), "canvas written");
    Ok(())
}

fn save_rgb_png(canvas: &Canvas, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &canvas.to_rgb8(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .context("encode png")
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
