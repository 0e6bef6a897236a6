//! Part artwork sources and rasterization.
//!
//! Part drawables can be authored as vector art (SVG markup, rasterized with
//! resvg at the canvas size) or supplied as pre-decoded RGBA pixels. Either
//! way the result is an [`RgbaImage`] that an
//! [`AvatarSet`](crate::part::AvatarSet) then fits to its canvas.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{AvatarError, Result};
use crate::part::Part;

// ============================================================================
// ArtSource
// ============================================================================

/// Where a part's drawable comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtSource {
    /// Raw SVG markup, rasterized at the requested size.
    Svg(String),

    /// Pre-decoded RGBA pixels, used as-is.
    Pixels(RgbaImage),
}

impl ArtSource {
    /// Creates a source from raw SVG markup.
    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self::Svg(svg.into())
    }

    /// Creates a source from pre-decoded pixels.
    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self::Pixels(pixels)
    }

    /// Returns `true` if this is a vector source.
    pub fn is_svg(&self) -> bool {
        matches!(self, Self::Svg(_))
    }

    /// Rasterizes this source for `part` at the given canvas size.
    ///
    /// Vector sources are scaled to fit within `size x size` pixels while
    /// preserving aspect ratio (the larger dimension will be `size`). Pixel
    /// sources are returned unchanged; fitting to the canvas happens when
    /// the artwork is installed into a set.
    pub fn rasterize(&self, part: Part, size: u32) -> Result<RgbaImage> {
        match self {
            Self::Svg(markup) => render_svg(part, markup, size),
            Self::Pixels(pixels) => Ok(pixels.clone()),
        }
    }
}

// ============================================================================
// SVG Rendering
// ============================================================================

/// Renders SVG markup to an RGBA image fitting within `size x size` pixels.
fn render_svg(part: Part, markup: &str, size: u32) -> Result<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(markup, &opts)
        .map_err(|source| AvatarError::InvalidArtwork { part, source })?;

    // Scale to fit within size x size
    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(AvatarError::EmptyArtwork { part, size });
    };
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia uses premultiplied alpha, we need to unpremultiply
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#ff0000"/></svg>"##;

    #[test]
    fn rasterize_simple_svg() {
        let source = ArtSource::from_svg(SIMPLE_SVG);
        assert!(source.is_svg());

        let img = source.rasterize(Part::Face, 50).unwrap();
        assert!(img.width() <= 50);
        assert!(img.height() <= 50);

        // The circle covers the image center.
        let center = img.get_pixel(img.width() / 2, img.height() / 2);
        assert_eq!(center.0[0], 255);
        assert_eq!(center.0[3], 255);
    }

    #[test]
    fn rasterize_pixels_passes_through() {
        let pixels = RgbaImage::from_pixel(8, 4, Rgba([0, 255, 0, 255]));
        let source = ArtSource::from_pixels(pixels.clone());
        assert!(!source.is_svg());

        let img = source.rasterize(Part::Eyes, 64).unwrap();
        assert_eq!(img, pixels);
    }

    #[test]
    fn rasterize_rejects_invalid_svg() {
        let source = ArtSource::from_svg("not svg at all");
        let err = source.rasterize(Part::Nose, 50).unwrap_err();
        assert!(matches!(err, AvatarError::InvalidArtwork { part: Part::Nose, .. }));
    }

    #[test]
    fn rasterize_rejects_zero_size() {
        let source = ArtSource::from_svg(SIMPLE_SVG);
        let err = source.rasterize(Part::Mouth, 0).unwrap_err();
        assert!(matches!(err, AvatarError::EmptyArtwork { part: Part::Mouth, size: 0 }));
    }
}
