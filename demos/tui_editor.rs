//! Terminal host example using crossterm and ratatui.
//!
//! Demonstrates wiring autofmt_mini into an editing surface: printable keys
//! are offered to the trigger engine before insertion, styled ranges render
//! through the fixed attribute table, and Ctrl-S persists the document to a
//! file-backed slot that is restored on the next launch.
//!
//! Run with: cargo run --example tui_editor
//! Type `* `, `** `, `*** `, or `# ` at the start of an empty line, then
//! keep typing. Ctrl-S saves, Esc quits.

use std::collections::BTreeMap;
use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;

use autofmt_mini::{
    BlockKey, DocumentOps, Engine, FileStore, RawBlock, RawDocument, Selection, Session,
    SnapshotCodec, StyleId, StyleRange, style_attrs,
};

/// Block-structured document backing the demo surface.
struct TuiDocument {
    blocks: Vec<RawBlock>,
    entity_map: BTreeMap<String, autofmt_mini::RawEntity>,
    caret_block: usize,
    caret_offset: u32,
    typing_styles: Vec<StyleId>,
    next_key: usize,
}

impl TuiDocument {
    fn new() -> Self {
        Self {
            blocks: vec![RawBlock::new("b0", "")],
            entity_map: BTreeMap::new(),
            caret_block: 0,
            caret_offset: 0,
            typing_styles: Vec::new(),
            next_key: 1,
        }
    }

    fn fresh_key(&mut self) -> BlockKey {
        let key = BlockKey::new(format!("b{}", self.next_key));
        self.next_key += 1;
        key
    }

    fn insert_char(&mut self, ch: char) {
        let offset = self.caret_offset;
        let styles = self.typing_styles.clone();
        let block = &mut self.blocks[self.caret_block];

        block.text.insert(byte_index(&block.text, offset), ch);

        let mut extended: Vec<StyleId> = Vec::new();
        for range in &mut block.styles {
            let end = range.offset + range.length;
            if end == offset && styles.contains(&range.style) && !extended.contains(&range.style) {
                range.length += 1;
                extended.push(range.style);
            } else if range.offset >= offset {
                range.offset += 1;
            } else if offset < end {
                range.length += 1;
            }
        }
        for style in styles {
            if !extended.contains(&style) {
                block.styles.push(StyleRange {
                    offset,
                    length: 1,
                    style,
                });
            }
        }
        self.caret_offset += 1;
    }

    fn backspace(&mut self) {
        if self.caret_offset > 0 {
            let key = self.blocks[self.caret_block].key.clone();
            self.remove_range(&key, self.caret_offset - 1, self.caret_offset);
        }
    }

    fn newline(&mut self) {
        let key = self.fresh_key();
        self.blocks.insert(self.caret_block + 1, RawBlock::new(key, ""));
        self.caret_block += 1;
        self.caret_offset = 0;
        self.typing_styles.clear();
    }
}

impl DocumentOps for TuiDocument {
    fn selection(&self) -> Selection {
        Selection::caret(self.blocks[self.caret_block].key.clone(), self.caret_offset)
    }

    fn block_text(&self, key: &BlockKey) -> Option<String> {
        self.blocks
            .iter()
            .find(|b| &b.key == key)
            .map(|b| b.text.clone())
    }

    fn remove_range(&mut self, block: &BlockKey, start: u32, end: u32) {
        let Some(idx) = self.blocks.iter().position(|b| &b.key == block) else {
            return;
        };
        let b = &mut self.blocks[idx];
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

        if idx == self.caret_block {
            self.caret_offset = start;
        }
    }

    fn toggle_typing_style(&mut self, style: StyleId) {
        if let Some(pos) = self.typing_styles.iter().position(|&s| s == style) {
            self.typing_styles.remove(pos);
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
        if self.blocks.is_empty() {
            self.blocks.push(RawBlock::new("b0", ""));
        }
        self.next_key = self.blocks.len();
        self.caret_block = self.blocks.len() - 1;
        self.caret_offset = self.blocks[self.caret_block].text.graphemes(true).count() as u32;
        self.typing_styles.clear();
    }
}

fn byte_index(text: &str, grapheme_offset: u32) -> usize {
    text.grapheme_indices(true)
        .nth(grapheme_offset as usize)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn tui_style(styles: &[StyleId]) -> Style {
    let mut out = Style::default();
    for &id in styles {
        let attrs = style_attrs(id);
        if attrs.bold {
            out = out.add_modifier(Modifier::BOLD);
        }
        if attrs.underline {
            out = out.add_modifier(Modifier::UNDERLINED);
        }
        if let Some("red") = attrs.color {
            out = out.fg(Color::Red);
        }
        // font_scale has no terminal analog; headings render bold only.
    }
    out
}

fn block_line(block: &RawBlock) -> Line<'static> {
    let graphemes: Vec<&str> = block.text.graphemes(true).collect();
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_styles: Vec<StyleId> = Vec::new();

    for (i, g) in graphemes.iter().enumerate() {
        let here: Vec<StyleId> = block
            .styles
            .iter()
            .filter(|r| (i as u32) >= r.offset && (i as u32) < r.offset + r.length)
            .map(|r| r.style)
            .collect();
        if here != run_styles && !run.is_empty() {
            spans.push(Span::styled(run.clone(), tui_style(&run_styles)));
            run.clear();
        }
        run_styles = here;
        run.push_str(g);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, tui_style(&run_styles)));
    }
    Line::from(spans)
}

struct App {
    session: Session<TuiDocument>,
    codec: SnapshotCodec,
    store: FileStore,
    status: String,
}

impl App {
    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(5)])
            .split(f.size());

        let lines: Vec<Line> = self
            .session
            .document()
            .to_raw()
            .blocks
            .iter()
            .map(block_line)
            .collect();
        let editor = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("autofmt_mini"));
        f.render_widget(editor, chunks[0]);

        let doc = self.session.document();
        let active: Vec<&str> = doc.typing_styles.iter().map(|s| s.as_str()).collect();
        let triggers: Vec<String> = self
            .session
            .engine()
            .rules()
            .iter()
            .map(|r| format!("`{} ` {}", r.token, r.style))
            .collect();
        let footer = Paragraph::new(vec![
            Line::from(format!("typing styles: [{}]", active.join(", "))),
            Line::from(format!("triggers: {}", triggers.join("  "))),
            Line::from(self.status.clone()),
        ])
        .block(Block::default().borders(Borders::ALL).title("status"));
        f.render_widget(footer, chunks[1]);

        let x = chunks[0].x + 1 + doc.caret_offset as u16;
        let y = chunks[0].y + 1 + doc.caret_block as u16;
        f.set_cursor(x, y);
    }

    fn on_key(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        match code {
            KeyCode::Esc => return false,
            KeyCode::Char('s') if mods.contains(KeyModifiers::CONTROL) => {
                self.status = match self.session.save(&self.codec, &mut self.store) {
                    Ok(()) => format!("saved to slot {:?}", self.codec.slot_key()),
                    Err(err) => format!("save failed: {err}"),
                };
            }
            KeyCode::Char(c) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
                if !self.session.handle_before_input(c).is_handled() {
                    self.session.document_mut().insert_char(c);
                }
            }
            KeyCode::Backspace => self.session.document_mut().backspace(),
            KeyCode::Enter => self.session.document_mut().newline(),
            _ => {}
        }
        true
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let codec = SnapshotCodec::new();
    let store = FileStore::new(".autofmt_demo").expect("create demo slot directory");

    let mut session = Session::new(TuiDocument::new(), Engine::new());
    let restore_note = match session.restore(&codec, &store) {
        Ok(true) => "restored previous document".to_string(),
        Ok(false) => "starting with an empty document".to_string(),
        Err(err) => format!("restore failed, starting empty: {err}"),
    };

    let mut app = App {
        session,
        codec,
        store,
        status: format!("{restore_note} — Ctrl-S saves, Esc quits"),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.on_key(key.code, key.modifiers) {
                break;
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
