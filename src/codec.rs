//! Document snapshot codec.
//!
//! Converts the structural document form to a flat storage string and back,
//! and manages the single named persistence slot. Decoding is two-stage so
//! unparseable data and parseable-but-wrong data stay distinguishable; a
//! malformed snapshot is reported, never repaired or silently discarded.

use thiserror::Error;

use crate::document::RawDocument;
use crate::store::StoreError;
use crate::traits::SnapshotStore;

/// Key under which the snapshot is stored unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "autofmt.document";

#[derive(Debug, Error)]
pub enum CodecError {
    /// Persisted data is not parseable as structured data at all.
    #[error("snapshot is not well-formed: {0}")]
    CorruptSnapshot(#[source] serde_json::Error),
    /// Parseable, but required document fields are absent or mistyped.
    #[error("snapshot does not match the document schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
    /// Encoding a document failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializes documents and reads/writes the persistence slot.
///
/// The slot key is explicit configuration rather than a hidden constant, so
/// tests and multi-profile hosts can point the codec elsewhere.
#[derive(Debug, Clone)]
pub struct SnapshotCodec {
    slot_key: String,
}

impl Default for SnapshotCodec {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl SnapshotCodec {
    /// Codec writing to [`DEFAULT_SLOT_KEY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec writing to a caller-chosen slot key.
    pub fn with_slot_key(key: impl Into<String>) -> Self {
        Self {
            slot_key: key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Encode `doc` to its storage form.
    pub fn serialize(&self, doc: &RawDocument) -> Result<String, CodecError> {
        serde_json::to_string_pretty(doc).map_err(CodecError::Encode)
    }

    /// Decode a storage string back into a document.
    pub fn deserialize(&self, snapshot: &str) -> Result<RawDocument, CodecError> {
        let value: serde_json::Value =
            serde_json::from_str(snapshot).map_err(CodecError::CorruptSnapshot)?;
        serde_json::from_value(value).map_err(CodecError::SchemaMismatch)
    }

    /// Serialize `doc` and overwrite the slot with it.
    pub fn save<S: SnapshotStore>(
        &self,
        store: &mut S,
        doc: &RawDocument,
    ) -> Result<(), CodecError> {
        let snapshot = self.serialize(doc)?;
        log::debug!("saving {} bytes to slot {:?}", snapshot.len(), self.slot_key);
        store.write(&self.slot_key, &snapshot)?;
        Ok(())
    }

    /// Read the slot. `Ok(None)` means it was never written; the caller
    /// decides what an empty slot means.
    pub fn load<S: SnapshotStore>(&self, store: &S) -> Result<Option<RawDocument>, CodecError> {
        let Some(snapshot) = store.read(&self.slot_key)? else {
            return Ok(None);
        };
        match self.deserialize(&snapshot) {
            Ok(doc) => {
                log::debug!("restored {} block(s) from slot {:?}", doc.blocks.len(), self.slot_key);
                Ok(Some(doc))
            }
            Err(err) => {
                log::warn!("stored snapshot failed to decode: {err}");
                Err(err)
            }
        }
    }
}
