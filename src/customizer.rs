//! Avatar customization engine: the transform store plus cached rendering.

use image::RgbaImage;
use log::debug;

use crate::compose::{apply_transform, composite_over};
use crate::part::{AvatarSet, Part};
use crate::profile::{AvatarProfile, TransformSettings};
use crate::store::TransformStore;
use crate::transform::PartTransform;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`AvatarProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &AvatarProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> AvatarProfile;
}

// ============================================================================
// AvatarCustomizer
// ============================================================================

/// Main avatar customization engine.
///
/// `AvatarCustomizer` holds the five base drawables and the
/// [`TransformStore`] that is the single source of truth for their
/// transforms. Mutate transforms through the [`store`](Self::store) field;
/// everything else holds the table read-only.
///
/// Rendering is cached: each transformed part is kept until its store
/// version moves on, and the finished composite is kept until the store
/// revision moves on. Repeated renders at an unchanged revision cost one
/// image clone.
///
/// # Example
///
/// ```
/// use avatar_renderer::{AvatarCustomizer, AvatarSet, Part};
///
/// let mut customizer = AvatarCustomizer::new(AvatarSet::new(64));
///
/// customizer.store.set_offset_x(Part::Eyes, 12.0);
/// customizer.store.set_scale(Part::Mouth, 1.25);
///
/// let preview = customizer.render();
/// assert_eq!(preview.dimensions(), (64, 64));
/// ```
pub struct AvatarCustomizer {
    /// The five base drawables (never modified by rendering).
    parts: AvatarSet,

    /// The transform table and session cursor. The store's setters are the
    /// only mutation surface.
    pub store: TransformStore,

    part_cache: [Option<CachedPart>; Part::COUNT],
    composite: Option<CachedComposite>,
}

struct CachedPart {
    version: u64,
    image: RgbaImage,
}

struct CachedComposite {
    revision: u64,
    image: RgbaImage,
}

impl AvatarCustomizer {
    /// Creates a customizer over the given part artwork, with every
    /// transform at its default.
    pub fn new(parts: AvatarSet) -> Self {
        Self {
            parts,
            store: TransformStore::new(),
            part_cache: Default::default(),
            composite: None,
        }
    }

    /// Returns a reference to the base artwork.
    pub fn parts(&self) -> &AvatarSet {
        &self.parts
    }

    /// Replaces the artwork for one part, fitted to the canvas.
    ///
    /// The part's transform is kept; only its drawable changes.
    pub fn set_art(&mut self, part: Part, art: RgbaImage) {
        self.parts.set_art(part, art);
        self.part_cache[part.index()] = None;
        self.composite = None;
    }

    /// Renders the avatar with every part's current transform applied.
    ///
    /// Parts are stacked in draw order (face first, mouth on top) with
    /// source-over blending.
    pub fn render(&mut self) -> RgbaImage {
        let revision = self.store.revision();
        if let Some(composite) = &self.composite {
            if composite.revision == revision {
                return composite.image.clone();
            }
        }
        debug!("rebuilding composite at revision {revision}");

        let mut canvas = RgbaImage::new(self.parts.size(), self.parts.size());
        for part in Part::ALL {
            let version = self.store.part_version(part);
            let slot = &mut self.part_cache[part.index()];
            let stale = !matches!(slot, Some(cached) if cached.version == version);
            if stale {
                let image = apply_transform(self.parts.art(part), &self.store.get(part));
                *slot = Some(CachedPart { version, image });
            }
            if let Some(cached) = slot {
                composite_over(&mut canvas, &cached.image, 0, 0);
            }
        }

        self.composite = Some(CachedComposite {
            revision,
            image: canvas.clone(),
        });
        canvas
    }

    /// Clears all render caches. Useful for freeing memory.
    pub fn clear_cache(&mut self) {
        self.part_cache = Default::default();
        self.composite = None;
    }
}

impl Configurable for AvatarCustomizer {
    /// Applies a profile to the store.
    ///
    /// A part present in the profile takes its settings (clamped to the
    /// transform domains); a part absent from the profile is reset to the
    /// default transform.
    fn apply_profile(&mut self, profile: &AvatarProfile) {
        for part in Part::ALL {
            match profile.part(part) {
                Some(settings) => {
                    self.store.set_transform(part, PartTransform::from(*settings));
                }
                None => {
                    self.store.reset_part(part);
                }
            }
        }
    }

    /// Exports the current transform table as a profile.
    ///
    /// Only parts with a non-default transform appear; an absent part means
    /// the default.
    fn export_profile(&self) -> AvatarProfile {
        let mut profile = AvatarProfile::new();
        for (part, transform) in self.store.entries() {
            if !transform.is_identity() {
                profile.set(part, Some(TransformSettings::from(transform)));
            }
        }
        profile
    }
}

// ============================================================================
// Tests
// ============================================================================
