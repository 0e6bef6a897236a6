//! Part identifiers and base artwork for the avatar.
//!
//! The avatar is composed of exactly five drawables stacked on a shared
//! square canvas. [`Part`] is the closed set of their identifiers, in draw
//! order; [`AvatarSet`] holds the artwork for all five at one canvas size.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::art::ArtSource;
use crate::compose::fit_to_canvas;
use crate::error::{AvatarError, Result};

// ============================================================================
// Part
// ============================================================================

/// One of the five fixed avatar drawables.
///
/// Declaration order is draw order: `Face` is drawn first (bottom),
/// `Mouth` last (top). There is no way to add a sixth part; identifiers
/// arriving as strings from outside the crate go through [`FromStr`] and
/// are rejected when they name none of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Face,
    Eyes,
    Eyebrows,
    Nose,
    Mouth,
}

impl Part {
    /// All parts, in draw order.
    pub const ALL: [Part; 5] = [
        Part::Face,
        Part::Eyes,
        Part::Eyebrows,
        Part::Nose,
        Part::Mouth,
    ];

    /// Number of parts. The transform table always has exactly this many entries.
    pub const COUNT: usize = 5;

    /// The canonical lowercase name, as used in profiles and frontend commands.
    pub fn name(self) -> &'static str {
        match self {
            Part::Face => "face",
            Part::Eyes => "eyes",
            Part::Eyebrows => "eyebrows",
            Part::Nose => "nose",
            Part::Mouth => "mouth",
        }
    }

    /// Index into per-part arrays, following draw order.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Part {
    type Err = AvatarError;

    /// Parses a part name, case-insensitively.
    ///
    /// Anything other than the five fixed names is rejected rather than
    /// silently growing the table.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "face" => Ok(Part::Face),
            "eyes" => Ok(Part::Eyes),
            "eyebrows" => Ok(Part::Eyebrows),
            "nose" => Ok(Part::Nose),
            "mouth" => Ok(Part::Mouth),
            _ => Err(AvatarError::UnknownPart { name: s.to_string() }),
        }
    }
}

// ============================================================================
// AvatarSet
// ============================================================================

/// The five base drawables, fitted to one square canvas size.
///
/// Each part's artwork is scaled to fit the canvas preserving aspect ratio
/// and centered, so every base image fills the canvas the same way before
/// its own transform applies.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarSet {
    size: u32,
    images: [RgbaImage; Part::COUNT],
}

impl AvatarSet {
    /// Creates a set with transparent artwork at the given canvas size.
    pub fn new(size: u32) -> Self {
        let blank = RgbaImage::new(size, size);
        Self {
            size,
            images: std::array::from_fn(|_| blank.clone()),
        }
    }

    /// Rasterizes one [`ArtSource`] per part, given in draw order.
    pub fn from_sources(size: u32, sources: [ArtSource; Part::COUNT]) -> Result<Self> {
        let mut set = Self::new(size);
        for (part, source) in Part::ALL.into_iter().zip(sources) {
            let art = source.rasterize(part, size)?;
            set.set_art(part, art);
        }
        Ok(set)
    }

    /// Installs artwork for one part, fitted to the canvas.
    pub fn set_art(&mut self, part: Part, art: RgbaImage) {
        self.images[part.index()] = fit_to_canvas(&art, self.size);
    }

    /// Returns the fitted base image for one part.
    pub fn art(&self, part: Part) -> &RgbaImage {
        &self.images[part.index()]
    }

    /// The canvas size in pixels (the canvas is square).
    pub fn size(&self) -> u32 {
        self.size
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn draw_order_is_fixed() {
        assert_eq!(
            Part::ALL,
            [Part::Face, Part::Eyes, Part::Eyebrows, Part::Nose, Part::Mouth]
        );
        assert_eq!(Part::ALL.len(), Part::COUNT);
    }

    #[test]
    fn name_parse_roundtrip() {
        for part in Part::ALL {
            assert_eq!(part.name().parse::<Part>().unwrap(), part);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Face".parse::<Part>().unwrap(), Part::Face);
        assert_eq!("EYES".parse::<Part>().unwrap(), Part::Eyes);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "hair".parse::<Part>().unwrap_err();
        assert!(matches!(err, AvatarError::UnknownPart { ref name } if name == "hair"));

        assert!("".parse::<Part>().is_err());
    }

    #[test]
    fn new_set_is_transparent() {
        let set = AvatarSet::new(16);
        assert_eq!(set.size(), 16);
        for part in Part::ALL {
            let art = set.art(part);
            assert_eq!(art.dimensions(), (16, 16));
            assert_eq!(art.get_pixel(8, 8).0, [0, 0, 0, 0]);
        }
    }

    #[test]
    fn from_sources_builds_a_full_set() {
        let colors = [
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 255, 255]),
            Rgba([255, 255, 0, 255]),
            Rgba([0, 255, 255, 255]),
        ];
        let sources = colors.map(|color| ArtSource::from_pixels(RgbaImage::from_pixel(10, 10, color)));

        let set = AvatarSet::from_sources(20, sources).unwrap();
        for (part, color) in Part::ALL.into_iter().zip(colors) {
            let art = set.art(part);
            assert_eq!(art.dimensions(), (20, 20));
            assert_eq!(art.get_pixel(10, 10).0, color.0);
        }
    }

    #[test]
    fn set_art_fits_to_canvas() {
        let mut set = AvatarSet::new(100);
        let wide = RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 255]));
        set.set_art(Part::Face, wide);

        let art = set.art(Part::Face);
        assert_eq!(art.dimensions(), (100, 100));
        // Content occupies a centered 100x50 band.
        assert_eq!(art.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(art.get_pixel(50, 10).0[3], 0);
        assert_eq!(art.get_pixel(50, 90).0[3], 0);
    }
}
