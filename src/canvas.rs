//! HTML Canvas rendering for WASM environments.
//!
//! This module provides [`CanvasRenderer`], a wrapper around
//! [`AvatarCustomizer`] that can render directly to an HTML canvas element.
//! It's designed for live preview in a web frontend: sliders and buttons
//! call the setters here, then repaint the canvas.
//!
//! # Feature Flag
//!
//! This module is only available with the `canvas` feature enabled:
//!
//! ```toml
//! [dependencies]
//! avatar-renderer = { version = "0.1", features = ["canvas"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { CanvasRenderer } from 'avatar-renderer';
//!
//! await init();
//!
//! const canvas = document.getElementById('preview-canvas');
//!
//! // Create renderer from the five part PNGs (draw order)
//! const renderer = CanvasRenderer.fromPngParts(face, eyes, eyebrows, nose, mouth, 300);
//!
//! // Wire a slider to the selected part
//! renderer.selectPart('eyes');
//! renderer.setOffsetX(renderer.selectedPart(), 50.0);
//! renderer.renderToCanvas(canvas);
//!
//! // Export the values when done
//! const profileJson = renderer.exportProfileJson();
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::customizer::{AvatarCustomizer, Configurable};
use crate::error::AvatarError;
use crate::part::{AvatarSet, Part};
use crate::profile::AvatarProfile;

// ============================================================================
// CanvasRenderer
// ============================================================================

/// A wrapper around [`AvatarCustomizer`] for rendering to HTML canvas elements.
///
/// This type is exposed to JavaScript via wasm-bindgen and provides a simple
/// API for live preview in web UIs. Parts are addressed by their lowercase
/// names (`"face"`, `"eyes"`, `"eyebrows"`, `"nose"`, `"mouth"`); any other
/// name is rejected with an error.
#[wasm_bindgen]
pub struct CanvasRenderer {
    customizer: AvatarCustomizer,
}

#[wasm_bindgen]
impl CanvasRenderer {
    /// Creates a new renderer from the five part PNGs, given in draw order.
    ///
    /// # Arguments
    ///
    /// * `face`..`mouth` - Raw PNG bytes for each part's artwork
    /// * `size` - The square canvas size in pixels
    #[wasm_bindgen(js_name = "fromPngParts")]
    pub fn from_png_parts(
        face: &[u8],
        eyes: &[u8],
        eyebrows: &[u8],
        nose: &[u8],
        mouth: &[u8],
        size: u32,
    ) -> Result<CanvasRenderer, JsError> {
        let mut set = AvatarSet::new(size);
        let buffers = [face, eyes, eyebrows, nose, mouth];

        for (part, bytes) in Part::ALL.into_iter().zip(buffers) {
            let img = image::load_from_memory(bytes)
                .map_err(|e| JsError::new(&format!("Failed to decode {} PNG: {}", part, e)))?
                .to_rgba8();
            set.set_art(part, img);
        }

        Ok(Self {
            customizer: AvatarCustomizer::new(set),
        })
    }

    // ---- Editing Commands ----

    /// Moves the editing cursor to the named part.
    #[wasm_bindgen(js_name = "selectPart")]
    pub fn select_part(&mut self, part: &str) -> Result<(), JsError> {
        let part = parse_part(part)?;
        self.customizer.store.select(part);
        Ok(())
    }

    /// Returns the name of the part the editing controls currently target.
    #[wasm_bindgen(js_name = "selectedPart")]
    pub fn selected_part(&self) -> String {
        self.customizer.store.selected().to_string()
    }

    /// Sets the named part's horizontal offset (clamped to [-150, 150]).
    #[wasm_bindgen(js_name = "setOffsetX")]
    pub fn set_offset_x(&mut self, part: &str, value: f32) -> Result<(), JsError> {
        let part = parse_part(part)?;
        self.customizer.store.set_offset_x(part, value);
        Ok(())
    }

    /// Sets the named part's vertical offset (clamped to [-150, 150]).
    #[wasm_bindgen(js_name = "setOffsetY")]
    pub fn set_offset_y(&mut self, part: &str, value: f32) -> Result<(), JsError> {
        let part = parse_part(part)?;
        self.customizer.store.set_offset_y(part, value);
        Ok(())
    }

    /// Sets the named part's scale (clamped to [0.5, 2.0]).
    #[wasm_bindgen(js_name = "setScale")]
    pub fn set_scale(&mut self, part: &str, value: f32) -> Result<(), JsError> {
        let part = parse_part(part)?;
        self.customizer.store.set_scale(part, value);
        Ok(())
    }

    /// Returns the named part's current transform as `[offsetX, offsetY, scale]`.
    #[wasm_bindgen(js_name = "getTransform")]
    pub fn get_transform(&self, part: &str) -> Result<js_sys::Array, JsError> {
        let part = parse_part(part)?;
        let transform = self.customizer.store.get(part);

        let arr = js_sys::Array::new();
        arr.push(&JsValue::from(transform.offset_x));
        arr.push(&JsValue::from(transform.offset_y));
        arr.push(&JsValue::from(transform.scale));
        Ok(arr)
    }

    /// Puts the named part back to the default transform.
    #[wasm_bindgen(js_name = "resetPart")]
    pub fn reset_part(&mut self, part: &str) -> Result<(), JsError> {
        let part = parse_part(part)?;
        self.customizer.store.reset_part(part);
        Ok(())
    }

    /// Puts every part back to the default transform.
    #[wasm_bindgen(js_name = "resetAll")]
    pub fn reset_all(&mut self) {
        self.customizer.store.reset_all();
    }

    // ---- Rendering ----

    /// Renders the composited avatar to an HTML canvas element.
    ///
    /// The canvas is resized to match the renderer's canvas size.
    #[wasm_bindgen(js_name = "renderToCanvas")]
    pub fn render_to_canvas(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsError> {
        let rendered = self.customizer.render();

        let width = rendered.width();
        let height = rendered.height();

        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| JsError::new("Failed to get 2d context"))?
            .ok_or_else(|| JsError::new("Canvas 2d context is null"))?
            .dyn_into()
            .map_err(|_| JsError::new("Failed to cast to CanvasRenderingContext2d"))?;

        let raw_pixels: Vec<u8> = rendered.into_raw();
        let image_data =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(&raw_pixels), width, height)
                .map_err(|_| JsError::new("Failed to create ImageData"))?;

        ctx.put_image_data(&image_data, 0.0, 0.0)
            .map_err(|_| JsError::new("Failed to put image data"))?;

        Ok(())
    }

    /// Renders the composited avatar and returns raw RGBA pixel data.
    ///
    /// Useful if you need to manipulate the pixels in JavaScript before drawing.
    #[wasm_bindgen(js_name = "renderToPixels")]
    pub fn render_to_pixels(&mut self) -> js_sys::Uint8Array {
        let raw_pixels = self.customizer.render().into_raw();
        let array = js_sys::Uint8Array::new_with_length(raw_pixels.len() as u32);
        array.copy_from(&raw_pixels);
        array
    }

    // ---- Profile Import/Export ----

    /// Exports the current transform table as a JSON string.
    #[wasm_bindgen(js_name = "exportProfileJson")]
    pub fn export_profile_json(&self) -> Result<String, JsError> {
        let profile = self.customizer.export_profile();
        profile
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize profile: {}", e)))
    }

    /// Imports a transform table from a JSON string.
    ///
    /// Parts absent from the profile are reset to the default transform.
    #[wasm_bindgen(js_name = "importProfileJson")]
    pub fn import_profile_json(&mut self, json: &str) -> Result<(), JsError> {
        let profile = AvatarProfile::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse profile: {}", e)))?;
        self.customizer.apply_profile(&profile);
        Ok(())
    }

    /// Clears the render cache to free memory.
    #[wasm_bindgen(js_name = "clearCache")]
    pub fn clear_cache(&mut self) {
        self.customizer.clear_cache();
    }
}

fn parse_part(name: &str) -> Result<Part, JsError> {
    name.parse()
        .map_err(|e: AvatarError| JsError::new(&e.to_string()))
}
