//! Compositing the avatar from its transformed parts.
//!
//! Every part's artwork is first fitted to the shared square canvas, then
//! drawn with its own transform applied: uniform scale about the drawing's
//! center followed by a pixel translation. Parts stack in draw order with
//! source-over alpha blending, later parts on top.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::part::AvatarSet;
use crate::store::TransformStore;
use crate::transform::PartTransform;

// ============================================================================
// Canvas Fitting
// ============================================================================

/// Scales `art` to fit within a `size`x`size` canvas, preserving aspect
/// ratio, centered.
///
/// This is how every part's base image fills the canvas before its own
/// transform applies.
pub fn fit_to_canvas(art: &RgbaImage, size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    if size == 0 || art.width() == 0 || art.height() == 0 {
        return canvas;
    }

    let scale = size as f32 / art.width().max(art.height()) as f32;
    let width = ((art.width() as f32 * scale).round() as u32).clamp(1, size);
    let height = ((art.height() as f32 * scale).round() as u32).clamp(1, size);

    let fitted = if (width, height) == art.dimensions() {
        art.clone()
    } else {
        imageops::resize(art, width, height, FilterType::Triangle)
    };

    let x = ((size - width) / 2) as i32;
    let y = ((size - height) / 2) as i32;
    composite_over(&mut canvas, &fitted, x, y);
    canvas
}

// ============================================================================
// Transform Application
// ============================================================================

/// Draws `base` with `transform` applied into a transparent canvas of the
/// same size.
///
/// The base is scaled uniformly about its own center, then translated by
/// the transform's offsets. Content pushed outside the canvas is cropped.
/// The identity transform is a no-op.
pub fn apply_transform(base: &RgbaImage, transform: &PartTransform) -> RgbaImage {
    if transform.is_identity() {
        return base.clone();
    }

    let (width, height) = base.dimensions();
    let mut canvas = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return canvas;
    }

    let scaled_w = ((width as f32 * transform.scale).round() as u32).max(1);
    let scaled_h = ((height as f32 * transform.scale).round() as u32).max(1);
    let scaled = if (scaled_w, scaled_h) == (width, height) {
        base.clone()
    } else {
        imageops::resize(base, scaled_w, scaled_h, FilterType::Triangle)
    };

    // Center-anchored: scale about the middle of the drawing, then offset.
    let x = ((width as f32 - scaled_w as f32) / 2.0 + transform.offset_x).round() as i32;
    let y = ((height as f32 - scaled_h as f32) / 2.0 + transform.offset_y).round() as i32;

    composite_over(&mut canvas, &scaled, x, y);
    canvas
}

/// Composites the five parts onto a shared canvas, each transformed by its
/// current table entry, in draw order (face first, mouth on top).
pub fn render_avatar(set: &AvatarSet, store: &TransformStore) -> RgbaImage {
    let mut canvas = RgbaImage::new(set.size(), set.size());
    for (part, transform) in store.entries() {
        let layer = apply_transform(set.art(part), &transform);
        composite_over(&mut canvas, &layer, 0, 0);
    }
    canvas
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;

            // Skip if outside destination bounds
            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = src.get_pixel(sx, sy);
            let dst_pixel = dest.get_pixel(dx as u32, dy as u32);

            let blended = alpha_blend(*src_pixel, *dst_pixel);
            dest.put_pixel(dx as u32, dy as u32, blended);
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Part;

    #[test]
    fn identity_transform_is_a_noop() {
        let mut base = RgbaImage::new(9, 9);
        base.put_pixel(2, 3, Rgba([255, 0, 0, 255]));

        let result = apply_transform(&base, &PartTransform::default());
        assert_eq!(result, base);
    }

    #[test]
    fn translation_moves_content() {
        let mut base = RgbaImage::new(9, 9);
        base.put_pixel(4, 4, Rgba([0, 0, 255, 255]));

        let transform = PartTransform::new(2.0, 1.0, 1.0);
        let result = apply_transform(&base, &transform);

        assert_eq!(result.get_pixel(6, 5).0, [0, 0, 255, 255]);
        assert_eq!(result.get_pixel(4, 4).0[3], 0);
    }

    #[test]
    fn content_pushed_off_canvas_is_cropped() {
        let base = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));

        let transform = PartTransform::new(150.0, 0.0, 1.0);
        let result = apply_transform(&base, &transform);

        assert_eq!(result.dimensions(), (10, 10));
        for (_, _, pixel) in result.enumerate_pixels() {
            assert_eq!(pixel.0[3], 0);
        }
    }

    #[test]
    fn upscale_covers_whole_canvas() {
        let base = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));

        let transform = PartTransform::new(0.0, 0.0, 2.0);
        let result = apply_transform(&base, &transform);

        assert_eq!(result.dimensions(), (8, 8));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(result.get_pixel(7, 7).0, [255, 0, 0, 255]);
    }

    #[test]
    fn downscale_shrinks_toward_center() {
        let base = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));

        let transform = PartTransform::new(0.0, 0.0, 0.5);
        let result = apply_transform(&base, &transform);

        // Corners are empty, the center still shows the drawing.
        assert_eq!(result.get_pixel(0, 0).0[3], 0);
        assert_eq!(result.get_pixel(7, 7).0[3], 0);
        assert_eq!(result.get_pixel(4, 4).0[3], 255);
    }

    #[test]
    fn composite_draws_source_over_destination() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_blends_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src, 0, 0);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
    }

    #[test]
    fn fit_centers_non_square_art() {
        let wide = RgbaImage::from_pixel(200, 100, Rgba([0, 255, 0, 255]));
        let fitted = fit_to_canvas(&wide, 100);

        assert_eq!(fitted.dimensions(), (100, 100));
        assert_eq!(fitted.get_pixel(50, 50).0, [0, 255, 0, 255]);
        assert_eq!(fitted.get_pixel(50, 10).0[3], 0);
    }

    #[test]
    fn parts_stack_in_draw_order() {
        let mut set = AvatarSet::new(12);
        set.set_art(Part::Face, RgbaImage::from_pixel(12, 12, Rgba([255, 0, 0, 255])));
        set.set_art(Part::Mouth, RgbaImage::from_pixel(12, 12, Rgba([0, 0, 255, 255])));

        let store = TransformStore::new();
        let result = render_avatar(&set, &store);

        // Mouth is drawn after face, so it wins everywhere it is opaque.
        assert_eq!(result.get_pixel(6, 6).0, [0, 0, 255, 255]);
    }

    #[test]
    fn render_reflects_part_transforms() {
        let mut set = AvatarSet::new(9);
        let mut face = RgbaImage::new(9, 9);
        face.put_pixel(4, 4, Rgba([255, 0, 0, 255]));
        set.set_art(Part::Face, face);

        let mut store = TransformStore::new();
        store.set_offset_x(Part::Face, 3.0);

        let result = render_avatar(&set, &store);
        assert_eq!(result.get_pixel(7, 4).0, [255, 0, 0, 255]);
        assert_eq!(result.get_pixel(4, 4).0[3], 0);
    }
}
