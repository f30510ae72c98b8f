use std::collections::BTreeMap;

use autofmt_mini::{
    BlockKey, DocumentOps, RawBlock, RawDocument, RawEntity, Selection, StyleId, StyleRange,
};
use unicode_segmentation::UnicodeSegmentation;

/// Minimal block-structured document standing in for a real rich-text
/// engine. Offsets are grapheme clusters throughout.
pub struct MockDocument {
    blocks: Vec<RawBlock>,
    entity_map: BTreeMap<String, RawEntity>,
    selection: Selection,
    typing_styles: Vec<StyleId>,
}

impl MockDocument {
    /// Document with a single empty block and the caret in it.
    pub fn new() -> Self {
        Self {
            blocks: vec![RawBlock::new("b0", "")],
            entity_map: BTreeMap::new(),
            selection: Selection::caret("b0", 0),
            typing_styles: Vec::new(),
        }
    }

    /// Single-block document containing `text`, caret at the end.
    pub fn with_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.blocks[0].text = text.to_string();
        doc.selection = Selection::caret("b0", text.graphemes(true).count() as u32);
        doc
    }

    pub fn typing_styles(&self) -> &[StyleId] {
        &self.typing_styles
    }

    pub fn caret_text(&self) -> String {
        self.block_text(&self.selection.block).unwrap_or_default()
    }

    pub fn set_caret(&mut self, key: impl Into<BlockKey>, offset: u32) {
        self.selection = Selection::caret(key, offset);
    }

    pub fn push_block(&mut self, key: &str, text: &str) {
        self.blocks.push(RawBlock::new(key, text));
    }

    pub fn add_entity(&mut self, id: &str, entity: RawEntity) {
        self.entity_map.insert(id.to_string(), entity);
    }

    pub fn styles_of(&self, key: &str) -> Vec<StyleRange> {
        let key = BlockKey::new(key);
        self.blocks
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.styles.clone())
            .unwrap_or_default()
    }

    /// Insert one character at the caret, applying the active typing
    /// styles, and advance the caret.
    pub fn insert_char(&mut self, ch: char) {
        let offset = self.selection.start;
        let Some(block) = self
            .blocks
            .iter_mut()
            .find(|b| b.key == self.selection.block)
        else {
            return;
        };

        let at = byte_index(&block.text, offset);
        block.text.insert(at, ch);

        // Extend a range ending at the caret when its style is being typed;
        // shift everything at or past the caret.
        let mut extended: Vec<StyleId> = Vec::new();
        for range in &mut block.styles {
            let end = range.offset + range.length;
            if end == offset
                && self.typing_styles.contains(&range.style)
                && !extended.contains(&range.style)
            {
                range.length += 1;
                extended.push(range.style);
            } else if range.offset >= offset {
                range.offset += 1;
            } else if offset < end {
                range.length += 1;
            }
        }
        for &style in &self.typing_styles {
            if !extended.contains(&style) {
                block.styles.push(StyleRange {
                    offset,
                    length: 1,
                    style,
                });
                extended.push(style);
            }
        }

        self.selection = Selection::caret(self.selection.block.clone(), offset + 1);
    }
}

impl DocumentOps for MockDocument {
    fn selection(&self) -> Selection {
        self.selection.clone()
    }

    fn block_text(&self, key: &BlockKey) -> Option<String> {
        self.blocks
            .iter()
            .find(|b| &b.key == key)
            .map(|b| b.text.clone())
    }

    fn remove_range(&mut self, block: &BlockKey, start: u32, end: u32) {
        let Some(b) = self.blocks.iter_mut().find(|b| &b.key == block) else {
            return;
        };
        let from = byte_index(&b.text, start);
        let to = byte_index(&b.text, end);
        b.text.replace_range(from..to, "");

        let removed = end - start;
        let shift = |x: u32| {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        for range in &mut b.styles {
            let range_end = shift(range.offset + range.length);
            range.offset = shift(range.offset);
            range.length = range_end - range.offset;
        }
        b.styles.retain(|r| r.length > 0);

        // Backward-anchored: caret lands at the removal start.
        if self.selection.block == *block {
            self.selection = Selection::caret(block.clone(), start);
        }
    }

    fn toggle_typing_style(&mut self, style: StyleId) {
        if let Some(idx) = self.typing_styles.iter().position(|&s| s == style) {
            self.typing_styles.remove(idx);
        } else {
            self.typing_styles.push(style);
        }
    }

    fn to_raw(&self) -> RawDocument {
        RawDocument {
            blocks: self.blocks.clone(),
            entity_map: self.entity_map.clone(),
        }
    }

    fn apply_raw(&mut self, raw: RawDocument) {
        self.blocks = raw.blocks;
        self.entity_map = raw.entity_map;
        self.typing_styles.clear();
        if let Some(first) = self.blocks.first() {
            self.selection = Selection::caret(first.key.clone(), 0);
        }
    }
}

fn byte_index(text: &str, grapheme_offset: u32) -> usize {
    text.grapheme_indices(true)
        .nth(grapheme_offset as usize)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
