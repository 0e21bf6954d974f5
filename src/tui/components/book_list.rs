//! # Book List Component
//!
//! Selectable list of books, used by both the search results page and the
//! favourites page.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookListState` lives in `TuiState`, one per page
//! - `BookList` is created each frame with borrowed state and books
//!
//! Each book takes two lines: title with publish year, then authors,
//! rating and edition count. Favourites are marked with a star.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::book::BookSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: usize = 5;

/// Persistent selection state for one book list.
#[derive(Default)]
pub struct BookListState {
    pub list_state: ListState,
    /// Number of books last shown, used to clamp navigation.
    len: usize,
}

impl BookListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the item count, clamping the selection into range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        match (len, self.list_state.selected()) {
            (0, _) => self.list_state.select(None),
            (_, None) => self.list_state.select(Some(0)),
            (_, Some(i)) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Select the first row and scroll to the top.
    pub fn reset(&mut self) {
        self.list_state = ListState::default();
        if self.len > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected().filter(|&i| i < self.len)
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(self.len - 1);
        self.list_state.select(Some(next));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookListEvent {
    /// Enter on the row at this index.
    Open(usize),
}

impl EventHandler for BookListState {
    type Event = BookListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_STEP as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_STEP as isize),
            TuiEvent::Submit => return self.selected().map(BookListEvent::Open),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper.
pub struct BookList<'a> {
    state: &'a mut BookListState,
    books: &'a [BookSummary],
    favourites: &'a [BookSummary],
    title: String,
}

impl<'a> BookList<'a> {
    pub fn new(
        state: &'a mut BookListState,
        books: &'a [BookSummary],
        favourites: &'a [BookSummary],
        title: String,
    ) -> Self {
        Self {
            state,
            books,
            favourites,
            title,
        }
    }

    fn is_favourite(&self, book: &BookSummary) -> bool {
        self.favourites.iter().any(|f| f.id == book.id)
    }

    fn item(&self, book: &BookSummary, width: usize) -> ListItem<'static> {
        let marker = if self.is_favourite(book) { "★ " } else { "  " };
        let year = book
            .first_publish_year
            .as_deref()
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        let title_width = width.saturating_sub(marker.width() + year.width());
        let title_line = Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(
                truncate_to_width(&book.title, title_width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(year, Style::default().fg(Color::DarkGray)),
        ]);

        let mut details = book.authors_line();
        if let Some(rating) = book.rating_label() {
            details.push_str(&format!("  ☆ {rating}"));
        }
        if book.num_editions > 1 {
            details.push_str(&format!("  {} editions", book.num_editions));
        }
        let detail_line = Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_to_width(&details, width.saturating_sub(2)),
                Style::default().fg(Color::Gray),
            ),
        ]);

        ListItem::new(vec![title_line, detail_line])
    }
}

impl Component for BookList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.set_len(self.books.len());

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .padding(Padding::horizontal(1));
        let width = block.inner(area).width as usize;

        let items: Vec<ListItem> = self.books.iter().map(|b| self.item(b, width)).collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Cut `text` to at most `max_width` columns, ending with "…" when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
