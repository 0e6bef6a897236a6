//! Serializable transform profile for cross-process communication.
//!
//! An [`AvatarProfile`] captures the whole transform table in a format that
//! can be serialized to JSON and sent between frontend and backend
//! processes, or shown to the user as copyable values.
//!
//! # Example
//!
//! ```
//! use avatar_renderer::{AvatarProfile, Part, TransformSettings};
//!
//! // Build a profile
//! let profile = AvatarProfile::new()
//!     .with(Part::Eyes, TransformSettings { offset_x: 30.0, offset_y: -10.0, scale: 1.2 })
//!     .with(Part::Mouth, TransformSettings { offset_x: 0.0, offset_y: 25.0, scale: 0.8 });
//!
//! // Serialize to JSON for sending to a frontend
//! let json = profile.to_json().unwrap();
//!
//! // Deserialize on the other side
//! let restored = AvatarProfile::from_json(&json).unwrap();
//! assert!(restored.part(Part::Eyes).is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::part::Part;
use crate::transform::PartTransform;

// ============================================================================
// TransformSettings
// ============================================================================

/// Serializable transform values for one part.
///
/// Values are not validated here; they are clamped to the transform domains
/// when applied to a store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TransformSettings {
    /// Horizontal offset in canvas pixels.
    #[serde(default)]
    pub offset_x: f32,

    /// Vertical offset in canvas pixels.
    #[serde(default)]
    pub offset_y: f32,

    /// Uniform scale factor.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for TransformSettings {
    fn default() -> Self {
        PartTransform::default().into()
    }
}

impl From<PartTransform> for TransformSettings {
    fn from(transform: PartTransform) -> Self {
        Self {
            offset_x: transform.offset_x,
            offset_y: transform.offset_y,
            scale: transform.scale,
        }
    }
}

impl From<TransformSettings> for PartTransform {
    /// Converts to a domain transform, clamping out-of-range values.
    fn from(settings: TransformSettings) -> Self {
        PartTransform::new(settings.offset_x, settings.offset_y, settings.scale)
    }
}

fn default_scale() -> f32 {
    1.0
}

// ============================================================================
// AvatarProfile
// ============================================================================

/// A serializable profile holding per-part transform settings.
///
/// A part absent from the profile means the default transform. This is the
/// primary type for communicating transform state between frontend and
/// backend processes.
///
/// # JSON Format
///
/// ```json
/// {
///   "eyes": { "offsetX": 30.0, "offsetY": -10.0, "scale": 1.2 },
///   "mouth": { "offsetX": 0.0, "offsetY": 25.0, "scale": 0.8 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvatarProfile {
    /// Face transform. `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<TransformSettings>,

    /// Eyes transform. `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<TransformSettings>,

    /// Eyebrows transform. `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrows: Option<TransformSettings>,

    /// Nose transform. `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nose: Option<TransformSettings>,

    /// Mouth transform. `None` means the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouth: Option<TransformSettings>,
}

impl AvatarProfile {
    /// Creates an empty profile: every part at the default transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one part's settings, builder style.
    pub fn with(mut self, part: Part, settings: TransformSettings) -> Self {
        self.set(part, Some(settings));
        self
    }

    /// Sets or clears one part's settings.
    pub fn set(&mut self, part: Part, settings: Option<TransformSettings>) {
        *self.slot_mut(part) = settings;
    }

    /// Returns one part's settings, if present.
    pub fn part(&self, part: Part) -> Option<&TransformSettings> {
        match part {
            Part::Face => self.face.as_ref(),
            Part::Eyes => self.eyes.as_ref(),
            Part::Eyebrows => self.eyebrows.as_ref(),
            Part::Nose => self.nose.as_ref(),
            Part::Mouth => self.mouth.as_ref(),
        }
    }

    fn slot_mut(&mut self, part: Part) -> &mut Option<TransformSettings> {
        match part {
            Part::Face => &mut self.face,
            Part::Eyes => &mut self.eyes,
            Part::Eyebrows => &mut self.eyebrows,
            Part::Nose => &mut self.nose,
            Part::Mouth => &mut self.mouth,
        }
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = AvatarProfile::new()
            .with(
                Part::Eyes,
                TransformSettings {
                    offset_x: 50.0,
                    offset_y: 0.0,
                    scale: 1.5,
                },
            )
            .with(
                Part::Mouth,
                TransformSettings {
                    offset_x: -12.0,
                    offset_y: 25.0,
                    scale: 0.8,
                },
            );

        let json = profile.to_json().unwrap();
        let restored = AvatarProfile::from_json(&json).unwrap();

        assert_eq!(restored, profile);
        assert_eq!(restored.part(Part::Eyes).unwrap().offset_x, 50.0);
        assert_eq!(restored.part(Part::Mouth).unwrap().scale, 0.8);
        assert!(restored.part(Part::Face).is_none());
    }

    #[test]
    fn profile_json_format() {
        let profile = AvatarProfile::new().with(
            Part::Eyebrows,
            TransformSettings {
                offset_x: 5.0,
                offset_y: -3.0,
                scale: 1.0,
            },
        );

        let json = profile.to_json_pretty().unwrap();

        // Verify camelCase serialization and part key names
        assert!(json.contains("\"eyebrows\""));
        assert!(json.contains("\"offsetX\""));
        assert!(json.contains("\"offsetY\""));
        assert!(json.contains("\"scale\""));

        // Default parts are left out entirely
        assert!(!json.contains("\"face\""));
    }

    #[test]
    fn empty_profile_deserializes() {
        let profile = AvatarProfile::from_json("{}").unwrap();
        for part in Part::ALL {
            assert!(profile.part(part).is_none());
        }
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let profile = AvatarProfile::from_json(r#"{"eyes": {"offsetX": 30.0}}"#).unwrap();

        let eyes = profile.part(Part::Eyes).unwrap();
        assert_eq!(eyes.offset_x, 30.0);
        assert_eq!(eyes.offset_y, 0.0);
        assert_eq!(eyes.scale, 1.0);
    }

    #[test]
    fn settings_clamp_when_converted() {
        let settings = TransformSettings {
            offset_x: 999.0,
            offset_y: -999.0,
            scale: 9.0,
        };

        let transform = PartTransform::from(settings);
        assert_eq!(transform.offset_x, 150.0);
        assert_eq!(transform.offset_y, -150.0);
        assert_eq!(transform.scale, 2.0);
    }

    #[test]
    fn set_none_clears_a_part() {
        let mut profile = AvatarProfile::new().with(Part::Nose, TransformSettings::default());
        assert!(profile.part(Part::Nose).is_some());

        profile.set(Part::Nose, None);
        assert!(profile.part(Part::Nose).is_none());
    }
}
