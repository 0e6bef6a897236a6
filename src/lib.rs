//! avatar-renderer: Layered avatar compositing library
//!
//! This crate composites a 2D avatar from five fixed drawable parts (face,
//! eyes, eyebrows, nose, mouth), each carrying an adjustable offset/scale
//! transform. A host UI binds its sliders and buttons to the
//! [`TransformStore`] and repaints from [`AvatarCustomizer::render`].
//!
//! # Example
//!
//! ```
//! use avatar_renderer::{AvatarCustomizer, AvatarSet, Part};
//!
//! let mut customizer = AvatarCustomizer::new(AvatarSet::new(300));
//!
//! // Adjust parts through the store
//! customizer.store.select(Part::Eyes);
//! customizer.store.set_offset_x(Part::Eyes, 50.0);
//! customizer.store.set_scale(Part::Eyes, 1.5);
//!
//! // Live preview
//! let preview = customizer.render();
//! assert_eq!(preview.dimensions(), (300, 300));
//!
//! // Reset controls
//! customizer.store.reset_part(Part::Eyes);
//! customizer.store.reset_all();
//! ```
//!
//! # Serializable Profiles
//!
//! For frontend/backend communication (or showing the user copyable
//! values), use [`AvatarProfile`] with the [`Configurable`] trait:
//!
//! ```
//! use avatar_renderer::{
//!     AvatarCustomizer, AvatarSet, Configurable, AvatarProfile, Part, TransformSettings,
//! };
//!
//! let mut customizer = AvatarCustomizer::new(AvatarSet::new(300));
//!
//! // Apply a profile
//! let profile = AvatarProfile::new()
//!     .with(Part::Nose, TransformSettings { offset_x: 10.0, offset_y: -4.0, scale: 1.1 });
//! customizer.apply_profile(&profile);
//!
//! // Export current values
//! let exported = customizer.export_profile();
//! let json = exported.to_json().unwrap();
//! assert!(json.contains("nose"));
//! ```

mod art;
mod compose;
mod customizer;
mod error;
mod part;
mod profile;
mod store;
mod transform;

#[cfg(feature = "canvas")]
mod canvas;

pub use art::ArtSource;
#[cfg(feature = "canvas")]
pub use canvas::CanvasRenderer;
pub use compose::{apply_transform, composite_over, fit_to_canvas, render_avatar};
pub use customizer::{AvatarCustomizer, Configurable};
pub use error::{AvatarError, Result};
pub use part::{AvatarSet, Part};
pub use profile::{AvatarProfile, TransformSettings};
pub use store::TransformStore;
pub use transform::{OFFSET_RANGE, PartTransform, SCALE_RANGE};
