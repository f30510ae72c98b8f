use unicode_segmentation::UnicodeSegmentation;

use crate::traits::DocumentOps;
use crate::types::{Decision, EditOp, StyleId, TriggerRule};

/// The separator that completes a trigger sequence. Exactly U+0020; tab and
/// newline never fire a rule.
const SEPARATOR: char = ' ';

/// The trigger engine: a table of rules evaluated per keystroke.
///
/// `evaluate` is a pure function of its inputs; the engine holds no
/// per-document state and one instance can serve any number of documents.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: Vec<TriggerRule>,
}

pub struct EngineBuilder {
    rules: Vec<TriggerRule>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            rules: vec![
                TriggerRule::new("*", StyleId::Bold),
                TriggerRule::new("**", StyleId::Red),
                TriggerRule::new("***", StyleId::Underline),
                TriggerRule::new("#", StyleId::Heading),
            ],
        }
    }
}

impl EngineBuilder {
    /// Builder with no rules installed.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule. A rule for the same token replaces the earlier one, so
    /// the table stays disjoint by construction.
    pub fn rule(mut self, token: impl Into<String>, style: StyleId) -> Self {
        let token = token.into();
        self.rules.retain(|r| r.token != token);
        self.rules.push(TriggerRule::new(token, style));
        self
    }

    pub fn build(self) -> Engine {
        Engine { rules: self.rules }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    /// Engine with the built-in rule table:
    /// `*`→Bold, `**`→Red, `***`→Underline, `#`→Heading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installed rules, in table order.
    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }

    /// Decide whether the about-to-be-inserted character completes a
    /// trigger sequence.
    ///
    /// A rule fires only when `block_text` equals its token exactly and
    /// `pending` is a single space. Whole-text equality keeps the match set
    /// disjoint: at most one rule can fire, and no ordering among rules
    /// exists.
    pub fn evaluate(&self, block_text: &str, pending: char) -> Decision {
        if pending != SEPARATOR {
            return Decision::NotHandled;
        }
        match self.rules.iter().find(|r| r.token == block_text) {
            Some(rule) => {
                log::debug!("trigger fired: {:?} -> {}", rule.token, rule.style);
                Decision::Handled {
                    token: rule.token.clone(),
                    style: rule.style,
                }
            }
            None => Decision::NotHandled,
        }
    }

    /// Evaluate against the block at the document's selection start and,
    /// on a match, emit the edits the host must apply: removal of the
    /// token's range followed by a style toggle.
    ///
    /// The pending separator itself is consumed, never inserted.
    pub fn handle_char<D: DocumentOps>(&self, doc: &D, pending: char) -> (Decision, Vec<EditOp>) {
        let selection = doc.selection();
        let Some(text) = doc.block_text(&selection.block) else {
            return (Decision::NotHandled, Vec::new());
        };

        let decision = self.evaluate(&text, pending);
        let mut ops = Vec::new();
        if let Decision::Handled { token, style } = &decision {
            if let Some((start, end)) = token_range(&text, token) {
                ops.push(EditOp::RemoveRange {
                    block: selection.block.clone(),
                    start,
                    end,
                });
            }
            ops.push(EditOp::ToggleStyle { style: *style });
        }
        (decision, ops)
    }
}

/// Half-open grapheme range of the first occurrence of `token` within
/// `block_text`, or `None` if the token does not occur.
pub fn token_range(block_text: &str, token: &str) -> Option<(u32, u32)> {
    if token.is_empty() {
        return None;
    }
    let byte_start = block_text.find(token)?;
    let start = block_text[..byte_start].graphemes(true).count() as u32;
    let len = token.graphemes(true).count() as u32;
    Some((start, start + len))
}
