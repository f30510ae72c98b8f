use crate::document::RawDocument;
use crate::store::StoreError;
use crate::types::{BlockKey, Selection, StyleId};

/// The document engine surface the trigger engine and codec depend on.
///
/// Hosts own the actual rich-text model; this trait is the narrow window
/// through which the engine reads it and requests mutations. Implementors
/// count offsets in grapheme clusters.
pub trait DocumentOps {
    /// Current caret or highlighted range.
    fn selection(&self) -> Selection;

    /// Plain text of the block identified by `key`, or `None` if no such
    /// block exists.
    fn block_text(&self, key: &BlockKey) -> Option<String>;

    /// Remove the half-open grapheme range `[start, end)` within `block`.
    ///
    /// The removal is backward-anchored: the caret ends at `start`.
    fn remove_range(&mut self, block: &BlockKey, start: u32, end: u32);

    /// Toggle `style` on the current typing state. Subsequent insertions
    /// inherit the style until it is toggled off.
    fn toggle_typing_style(&mut self, style: StyleId);

    /// Structured representation of the document for the codec to encode.
    fn to_raw(&self) -> RawDocument;

    /// Replace the document's content from a restored representation.
    fn apply_raw(&mut self, raw: RawDocument);
}

/// A single-key persistent string slot.
///
/// One snapshot exists per key at a time; writes overwrite. `read` reports
/// absence explicitly rather than erroring, so a never-written slot is
/// distinguishable from a failing one.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
