pub mod codec;
pub mod document;
pub mod engine;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

pub use crate::codec::{CodecError, DEFAULT_SLOT_KEY, SnapshotCodec};
pub use crate::document::{RawBlock, RawDocument, RawEntity, StyleRange};
pub use crate::engine::{Engine, EngineBuilder, token_range};
pub use crate::session::Session;
pub use crate::store::{FileStore, MemoryStore, StoreError};
pub use crate::traits::{DocumentOps, SnapshotStore};
pub use crate::types::{
    BlockKey, Decision, EditOp, Selection, StyleAttrs, StyleId, TriggerRule, style_attrs,
};
