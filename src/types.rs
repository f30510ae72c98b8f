use serde::{Deserialize, Serialize};

/// An inline style identifier.
///
/// Identifiers are opaque to the engine: the rendering layer maps each one
/// to concrete visual attributes via [`style_attrs`]. The engine only ever
/// compares and forwards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleId {
    /// Bold weight.
    Bold,
    /// Red foreground color.
    Red,
    /// Underline decoration.
    Underline,
    /// Larger bold font for headings.
    Heading,
}

impl StyleId {
    /// Stable name used in snapshots and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleId::Bold => "BOLD",
            StyleId::Red => "RED",
            StyleId::Underline => "UNDERLINE",
            StyleId::Heading => "HEADING",
        }
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual attributes the rendering layer applies when painting a style.
///
/// The engine never reads these; they exist so hosts share one fixed table
/// instead of each inventing its own mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleAttrs {
    /// Bold font weight.
    pub bold: bool,
    /// Foreground color name, if the style sets one.
    pub color: Option<&'static str>,
    /// Underline decoration.
    pub underline: bool,
    /// Font size multiplier relative to body text.
    pub font_scale: f32,
}

/// The fixed rendering table for the built-in styles.
pub fn style_attrs(style: StyleId) -> StyleAttrs {
    match style {
        StyleId::Bold => StyleAttrs {
            bold: true,
            color: None,
            underline: false,
            font_scale: 1.0,
        },
        StyleId::Red => StyleAttrs {
            bold: false,
            color: Some("red"),
            underline: false,
            font_scale: 1.0,
        },
        StyleId::Underline => StyleAttrs {
            bold: false,
            color: None,
            underline: true,
            font_scale: 1.0,
        },
        StyleId::Heading => StyleAttrs {
            bold: true,
            color: None,
            underline: false,
            font_scale: 1.6,
        },
    }
}

/// Stable identifying key of a block within a document.
///
/// Keys are assigned by the host's document engine and survive edits; the
/// engine treats them as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// The caret or highlighted range within a document.
///
/// Offsets are zero-indexed and counted in grapheme clusters, not bytes or
/// chars, matching how hosts count columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Block containing the selection start.
    pub block: BlockKey,
    /// Start offset in grapheme clusters (inclusive).
    pub start: u32,
    /// End offset in grapheme clusters (exclusive).
    pub end: u32,
}

impl Selection {
    /// A collapsed selection (caret) at `offset` within `block`.
    pub fn caret(block: impl Into<BlockKey>, offset: u32) -> Self {
        Self {
            block: block.into(),
            start: offset,
            end: offset,
        }
    }

    /// True when the selection is collapsed to a caret.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

/// A mapping from a literal token to the style it activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    /// Literal token the entire block text must equal.
    pub token: String,
    /// Style toggled when the rule fires.
    pub style: StyleId,
}

impl TriggerRule {
    pub fn new(token: impl Into<String>, style: StyleId) -> Self {
        Self {
            token: token.into(),
            style,
        }
    }
}

/// Result of offering a pending character to the trigger engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The pending character should be inserted normally by the host.
    NotHandled,
    /// The pending character is consumed. The caller must remove `token`
    /// from the block and toggle `style` on the typing state.
    Handled {
        /// Token to remove from the block.
        token: String,
        /// Style to toggle going forward.
        style: StyleId,
    },
}

impl Decision {
    /// True when the pending character was consumed by a trigger.
    pub fn is_handled(&self) -> bool {
        matches!(self, Decision::Handled { .. })
    }
}

/// Edits emitted by the engine for the host to execute.
///
/// These represent the concrete mutations to apply against the document
/// engine; the trigger engine itself never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Remove the half-open grapheme range `[start, end)` from `block`,
    /// anchored backward so the caret lands at `start`.
    RemoveRange {
        block: BlockKey,
        start: u32,
        end: u32,
    },
    /// Toggle `style` on the current typing state.
    ToggleStyle { style: StyleId },
}
