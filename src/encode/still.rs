use std::path::Path;

use crate::encode::sink::ensure_parent_dir;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::backend::FrameRGBA;

/// Write one frame as an opaque PNG, flattened over white.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> TernvidResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(TernvidError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    let rgba = frame.flatten_onto([255, 255, 255]);
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TernvidError::encode(format!("failed to write '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
