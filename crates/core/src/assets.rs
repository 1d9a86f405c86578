//! Logo and font loading. Every failure here degrades: a logo that cannot be
//! loaded becomes the text fallback, fonts that cannot be parsed become the
//! built-in Helvetica pair.

use ledgerprint_layout::{FontLibrary, ImageResource};
use ledgerprint_traits::{ResourceError, ResourceProvider};
use log::{debug, warn};
use std::sync::Arc;

/// Decodes PNG or JPEG bytes to RGB, compositing any alpha over white.
pub fn decode_image(bytes: &[u8]) -> Result<ImageResource, ResourceError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ResourceError::InvalidFormat(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceError::InvalidFormat("image has no pixels".to_string()));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }
    Ok(ImageResource {
        width,
        height,
        rgb: Arc::new(rgb),
    })
}

/// Loads and decodes the logo at `path`, or `None` with a warning.
pub fn load_logo(provider: &dyn ResourceProvider, path: &str) -> Option<ImageResource> {
    if !provider.exists(path) {
        warn!("Logo '{}' not found via {}; using company name instead", path, provider.name());
        return None;
    }
    let result = provider.load(path).and_then(|bytes| decode_image(&bytes));
    match result {
        Ok(image) => {
            debug!(
                "Loaded logo '{}' via {} ({}x{})",
                path,
                provider.name(),
                image.width,
                image.height
            );
            Some(image)
        }
        Err(e) => {
            warn!("Logo '{}' unavailable, using company name instead: {}", path, e);
            None
        }
    }
}

/// Loads the regular/bold TrueType pair. Both paths are required; anything
/// short of two parsable faces yields the standard library.
pub fn load_fonts(
    provider: &dyn ResourceProvider,
    regular: Option<&str>,
    bold: Option<&str>,
) -> FontLibrary {
    let (regular, bold) = match (regular, bold) {
        (None, None) => return FontLibrary::standard(),
        (Some(regular), Some(bold)) => (regular, bold),
        (Some(path), None) | (None, Some(path)) => {
            warn!(
                "Font '{}' configured without its counterpart; using standard fonts",
                path
            );
            return FontLibrary::standard();
        }
    };

    if let Some(missing) = [regular, bold].into_iter().find(|path| !provider.exists(path)) {
        warn!("Font '{}' not found via {}; using standard fonts", missing, provider.name());
        return FontLibrary::standard();
    }

    let loaded = provider
        .load(regular)
        .and_then(|r| provider.load(bold).map(|b| (r, b)))
        .map_err(|e| e.to_string())
        .and_then(|(r, b)| FontLibrary::from_truetype(r, b).map_err(|e| e.to_string()));

    match loaded {
        Ok(fonts) => {
            debug!("Loaded fonts '{}' and '{}' via {}", regular, bold, provider.name());
            fonts
        }
        Err(e) => {
            warn!("Fonts '{}'/'{}' unavailable, using standard fonts: {}", regular, bold, e);
            FontLibrary::standard()
        }
    }
}
