//! Single source of truth for per-part transforms.

use log::debug;

use crate::part::Part;
use crate::transform::{PartTransform, clamp_offset, clamp_scale};

// ============================================================================
// TransformStore
// ============================================================================

/// Owns the transform table: exactly one [`PartTransform`] per [`Part`],
/// plus the session cursor naming the part the editing controls target.
///
/// All mutation goes through the setters here; callers hold the table
/// read-only otherwise. Every change to a stored value bumps that part's
/// version counter and the store revision, which is how renderers decide
/// what to rebuild — a repeated write of the current value bumps nothing.
///
/// [`reset_all`](Self::reset_all) is a single revision step: an observer
/// comparing revisions sees either the old table or the fully reset one,
/// never a mix.
#[derive(Debug, Clone)]
pub struct TransformStore {
    transforms: [PartTransform; Part::COUNT],
    versions: [u64; Part::COUNT],
    revision: u64,
    selected: Part,
}

impl Default for TransformStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStore {
    /// Creates a store with every part at the default transform and the
    /// cursor on [`Part::Eyes`].
    pub fn new() -> Self {
        Self {
            transforms: [PartTransform::default(); Part::COUNT],
            versions: [0; Part::COUNT],
            revision: 0,
            selected: Part::Eyes,
        }
    }

    /// Returns the current transform for one part.
    pub fn get(&self, part: Part) -> PartTransform {
        self.transforms[part.index()]
    }

    /// Sets one part's horizontal offset, clamped to
    /// [`OFFSET_RANGE`](crate::transform::OFFSET_RANGE).
    ///
    /// Returns `true` if the stored value changed. The other two fields and
    /// every other part are untouched.
    pub fn set_offset_x(&mut self, part: Part, value: f32) -> bool {
        let mut next = self.get(part);
        next.offset_x = clamp_offset(value);
        self.commit(part, next)
    }

    /// Sets one part's vertical offset, clamped to
    /// [`OFFSET_RANGE`](crate::transform::OFFSET_RANGE).
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_offset_y(&mut self, part: Part, value: f32) -> bool {
        let mut next = self.get(part);
        next.offset_y = clamp_offset(value);
        self.commit(part, next)
    }

    /// Sets one part's scale, clamped to
    /// [`SCALE_RANGE`](crate::transform::SCALE_RANGE).
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_scale(&mut self, part: Part, value: f32) -> bool {
        let mut next = self.get(part);
        next.scale = clamp_scale(value);
        self.commit(part, next)
    }

    /// Replaces one part's whole transform. Values are clamped.
    ///
    /// Returns `true` if the stored transform changed.
    pub fn set_transform(&mut self, part: Part, transform: PartTransform) -> bool {
        self.commit(
            part,
            PartTransform::new(transform.offset_x, transform.offset_y, transform.scale),
        )
    }

    /// Puts one part back to the default transform. Idempotent.
    ///
    /// Returns `true` if the stored transform changed.
    pub fn reset_part(&mut self, part: Part) -> bool {
        let changed = self.commit(part, PartTransform::default());
        if changed {
            debug!("reset {part}");
        }
        changed
    }

    /// Puts every part back to the default transform.
    ///
    /// The whole reset is one revision step, so no observer comparing
    /// revisions can see a partially reset table.
    pub fn reset_all(&mut self) -> bool {
        let mut any = false;
        for part in Part::ALL {
            let slot = &mut self.transforms[part.index()];
            if slot.differs_from(&PartTransform::default()) {
                *slot = PartTransform::default();
                self.versions[part.index()] = self.versions[part.index()].wrapping_add(1);
                any = true;
            }
        }
        if any {
            self.revision = self.revision.wrapping_add(1);
            debug!("reset all parts");
        }
        any
    }

    /// Moves the editing cursor.
    ///
    /// Pure session state: no transform changes, no revision bump.
    pub fn select(&mut self, part: Part) {
        self.selected = part;
    }

    /// The part the editing controls currently target.
    pub fn selected(&self) -> Part {
        self.selected
    }

    /// Monotonic counter bumped once per table-changing operation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Version counter for one part, bumped whenever its transform changes.
    pub fn part_version(&self, part: Part) -> u64 {
        self.versions[part.index()]
    }

    /// Iterates the full table in draw order.
    pub fn entries(&self) -> impl Iterator<Item = (Part, PartTransform)> + '_ {
        Part::ALL.into_iter().map(|part| (part, self.get(part)))
    }

    /// Writes `next` for `part` if it differs from the stored transform.
    fn commit(&mut self, part: Part, next: PartTransform) -> bool {
        let slot = &mut self.transforms[part.index()];
        if !slot.differs_from(&next) {
            return false;
        }
        *slot = next;
        self.versions[part.index()] = self.versions[part.index()].wrapping_add(1);
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
