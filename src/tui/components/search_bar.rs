//! # SearchBar Component
//!
//! Single-line query editor shown above the pager.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete)
//! - Cursor movement within the line (left, right, home, end)
//! - Emit `QueryChanged` with the full buffer after every edit
//!
//! The buffer is internal state. The loading flag is a prop from the
//! published `BrowseState` and only changes the title.
//!
//! Long queries scroll horizontally so the cursor always stays inside the
//! box. Widths are measured in terminal columns, not bytes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::text::StringKey;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Left border plus right border.
const HORIZONTAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchBarEvent {
    /// The buffer changed; carries the whole new query.
    QueryChanged(String),
}

pub struct SearchBar {
    /// Query text (Internal State)
    pub buffer: String,
    /// Whether a search is in flight (Prop)
    pub loading: bool,
    /// Cursor position as byte offset in buffer
    cursor: usize,
}

impl SearchBar {
    /// Create a search bar pre-filled with `initial`, cursor at the end.
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            loading: false,
            cursor: initial.len(),
        }
    }

    fn changed(&self) -> Option<SearchBarEvent> {
        Some(SearchBarEvent::QueryChanged(self.buffer.clone()))
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            " Search (searching...) "
        } else {
            " Search "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(
                StringKey::SearchHint.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let (start, _) = visible_window(&self.buffer, self.cursor, width);
            Paragraph::new(&self.buffer[start..]).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(paragraph.block(block), area);

        let (_, cursor_col) = visible_window(&self.buffer, self.cursor, width);
        frame.set_cursor_position((area.x + 1 + cursor_col as u16, area.y + 1));
    }
}

impl EventHandler for SearchBar {
    type Event = SearchBarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                if text.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// First visible byte and the cursor's column inside a `width`-column window.
///
/// Drops leading characters until the text before the cursor fits, leaving
/// one column for the cursor itself.
fn visible_window(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    let mut start = 0;
    while start < cursor && text[start..cursor].width() >= width.max(1) {
        start = next_char_boundary(text, start);
    }
    (start, text[start..cursor].width())
}
