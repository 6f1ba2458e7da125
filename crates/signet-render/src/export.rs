//! PNG export of signature images.

use crate::error::{RenderError, RenderResult};
use std::fs;
use std::path::Path;
use tiny_skia::Pixmap;

/// Encode a pixmap as an 8-bit RGBA PNG.
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    // tiny-skia stores premultiplied alpha; PNG expects straight alpha.
    let rgba_data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&rgba_data)
            .map_err(|e| RenderError::Encode(format!("Failed to write PNG data: {}", e)))?;
    }

    Ok(png_data)
}

/// Encode a pixmap and write it to `path`.
pub fn write_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let png_data = encode_png(pixmap)?;
    fs::write(path, png_data)?;
    log::debug!("Wrote {}x{} PNG to {}", pixmap.width(), pixmap.height(), path.display());
    Ok(())
}
