//! Serializable structural form of a document.
//!
//! This is the shape the codec encodes: an ordered block list plus an
//! entity map. Hosts convert their in-memory model to and from this form
//! through [`DocumentOps::to_raw`](crate::traits::DocumentOps::to_raw) and
//! [`DocumentOps::apply_raw`](crate::traits::DocumentOps::apply_raw).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{BlockKey, StyleId};

/// Structured snapshot of a full document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Blocks in document order.
    pub blocks: Vec<RawBlock>,
    /// Entities referenced by the blocks, keyed by entity id. Payloads are
    /// round-tripped opaquely; the codec never interprets them.
    #[serde(default)]
    pub entity_map: BTreeMap<String, RawEntity>,
}

impl RawDocument {
    /// Document with a single empty block, the shape hosts start from.
    pub fn with_empty_block(key: impl Into<BlockKey>) -> Self {
        Self {
            blocks: vec![RawBlock::new(key, "")],
            entity_map: BTreeMap::new(),
        }
    }

    /// Block identified by `key`, if present.
    pub fn block(&self, key: &BlockKey) -> Option<&RawBlock> {
        self.blocks.iter().find(|b| &b.key == key)
    }
}

/// One paragraph/line unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Stable identifying key.
    pub key: BlockKey,
    /// Plain text content.
    pub text: String,
    /// Inline style annotations over the text.
    #[serde(default)]
    pub styles: Vec<StyleRange>,
}

impl RawBlock {
    pub fn new(key: impl Into<BlockKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            styles: Vec::new(),
        }
    }
}

/// A styled span within a block, offsets in grapheme clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: u32,
    pub length: u32,
    pub style: StyleId,
}

/// An entity payload carried through serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub mutability: String,
    #[serde(default)]
    pub data: serde_json::Value,
}
