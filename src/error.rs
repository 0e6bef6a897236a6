//! Error types for avatar rendering.

use thiserror::Error;

use crate::part::Part;

/// Result type alias using [`AvatarError`].
pub type Result<T> = std::result::Result<T, AvatarError>;

/// All possible errors in this crate.
///
/// The part identifiers themselves form a closed enum, so most operations
/// cannot fail; errors only arise at the boundaries where identifiers or
/// artwork come from outside the crate.
#[derive(Error, Debug)]
pub enum AvatarError {
    /// An externally supplied identifier named none of the five parts.
    #[error("unknown avatar part: {name:?}")]
    UnknownPart { name: String },

    /// SVG artwork for a part could not be parsed.
    #[error("failed to parse {part} artwork SVG")]
    InvalidArtwork {
        part: Part,
        #[source]
        source: resvg::usvg::Error,
    },

    /// Artwork rasterized to a zero-sized image.
    #[error("{part} artwork rendered to an empty image at size {size}")]
    EmptyArtwork { part: Part, size: u32 },
}
