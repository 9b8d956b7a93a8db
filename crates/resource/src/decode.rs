use concentra_traits::MediaError;
use concentra_types::RasterImage;
use image::{DynamicImage, GenericImageView};

/// Longest edge kept for embedded rasters. Thumbnails are printed at a few
/// centimeters, so anything larger only inflates the document.
pub const DEFAULT_MAX_EDGE_PX: u32 = 512;

/// Decodes PNG, JPEG or GIF bytes into an RGB raster no larger than `max_edge_px`.
pub fn decode_raster(uri: &str, bytes: &[u8], max_edge_px: u32) -> Result<RasterImage, MediaError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| MediaError::Undecodable {
        uri: uri.to_string(),
        message: e.to_string(),
    })?;

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(MediaError::Undecodable {
            uri: uri.to_string(),
            message: "image has no pixels".to_string(),
        });
    }
    let natural_ratio = width as f32 / height as f32;

    let scaled = if width.max(height) > max_edge_px.max(1) {
        log::debug!("Downscaling '{uri}' from {width}x{height}");
        decoded.thumbnail(max_edge_px.max(1), max_edge_px.max(1))
    } else {
        decoded
    };

    Ok(RasterImage {
        width_px: scaled.width(),
        height_px: scaled.height(),
        natural_ratio,
        rgb: flatten_on_white(&scaled),
    })
}

fn flatten_on_white(image: &DynamicImage) -> Vec<u8> {
    let rgba = image.to_rgba8();
    let mut rgb = Vec::with_capacity(rgba.as_raw().len() / 4 * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
