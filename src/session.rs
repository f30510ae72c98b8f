//! Explicitly owned editing session state.
//!
//! A [`Session`] ties one document handle to one engine and gives hosts the
//! per-keystroke and save/restore entry points, so document state is passed
//! around rather than living in ambient host globals.

use crate::codec::{CodecError, SnapshotCodec};
use crate::engine::Engine;
use crate::traits::{DocumentOps, SnapshotStore};
use crate::types::{Decision, EditOp};

pub struct Session<D: DocumentOps> {
    document: D,
    engine: Engine,
}

impl<D: DocumentOps> Session<D> {
    pub fn new(document: D, engine: Engine) -> Self {
        Self { document, engine }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Offer an about-to-be-inserted character to the trigger engine.
    ///
    /// On a match the emitted edits are applied to the document in order
    /// (token removal, then style toggle) and `Handled` is returned; the
    /// host must not insert the character. `NotHandled` means default
    /// insertion proceeds.
    pub fn handle_before_input(&mut self, pending: char) -> Decision {
        let (decision, ops) = self.engine.handle_char(&self.document, pending);
        for op in ops {
            match op {
                EditOp::RemoveRange { block, start, end } => {
                    self.document.remove_range(&block, start, end);
                }
                EditOp::ToggleStyle { style } => {
                    self.document.toggle_typing_style(style);
                }
            }
        }
        decision
    }

    /// Persist the current document into the codec's slot.
    pub fn save<S: SnapshotStore>(
        &self,
        codec: &SnapshotCodec,
        store: &mut S,
    ) -> Result<(), CodecError> {
        codec.save(store, &self.document.to_raw())
    }

    /// Restore the document from the codec's slot, if one was ever saved.
    ///
    /// Returns `false` and leaves the document untouched when the slot is
    /// empty. Corrupt or mismatched snapshots propagate as errors.
    pub fn restore<S: SnapshotStore>(
        &mut self,
        codec: &SnapshotCodec,
        store: &S,
    ) -> Result<bool, CodecError> {
        match codec.load(store)? {
            Some(raw) => {
                self.document.apply_raw(raw);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
