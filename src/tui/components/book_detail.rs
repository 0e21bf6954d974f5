//! # Book Detail Overlay
//!
//! Centered overlay opened when a book is clicked. Shows every field of the
//! summary and lets the user toggle the favourite flag with `f`.
//! Dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookDetailState` lives in `TuiState` while the overlay is open
//! - `BookDetail` is created each frame with the favourite flag as a prop

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::book::BookSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the detail overlay.
pub struct BookDetailState {
    pub book: BookSummary,
    /// When the book was favourited (Unix seconds), if known.
    pub favourite_since: Option<i64>,
    pub scroll_state: ScrollViewState,
}

impl BookDetailState {
    pub fn new(book: BookSummary, favourite_since: Option<i64>) -> Self {
        Self {
            book,
            favourite_since,
            scroll_state: ScrollViewState::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    ToggleFavourite,
    Dismiss,
}

impl EventHandler for BookDetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(DetailEvent::Dismiss),
            TuiEvent::InputChar('f') => Some(DetailEvent::ToggleFavourite),
            TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::PageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::PageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the detail overlay.
pub struct BookDetail<'a> {
    state: &'a mut BookDetailState,
    /// Whether the book is currently a favourite (Prop)
    is_favourite: bool,
}

impl<'a> BookDetail<'a> {
    pub fn new(state: &'a mut BookDetailState, is_favourite: bool) -> Self {
        Self {
            state,
            is_favourite,
        }
    }

    fn body_lines(&self, width: u16) -> Vec<Line<'static>> {
        let book = &self.state.book;
        let label = Style::default().fg(Color::DarkGray);
        let field = |name: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{name:<12}"), label),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled(
                book.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                book.authors_line(),
                Style::default().fg(Color::Cyan),
            )),
            Line::default(),
            field("Favourite", favourite_label(self.is_favourite, self.state.favourite_since)),
        ];

        if let Some(year) = &book.first_publish_year {
            lines.push(field("Published", year.clone()));
        }
        if let Some(rating) = book.rating_label() {
            let count = book
                .rating_count
                .map(|c| format!(" ({c} ratings)"))
                .unwrap_or_default();
            lines.push(field("Rating", format!("{rating}{count}")));
        }
        if let Some(pages) = book.num_pages {
            lines.push(field("Pages", pages.to_string()));
        }
        lines.push(field("Editions", book.num_editions.to_string()));
        if !book.languages.is_empty() {
            lines.push(field("Languages", book.languages.join(", ")));
        }
        if !book.image_url.is_empty() {
            lines.push(field("Cover", book.image_url.clone()));
        }

        if !book.description.is_empty() {
            lines.push(Line::default());
            let wrap_width = usize::from(width.max(1));
            for line in textwrap::wrap(&book.description, wrap_width) {
                lines.push(Line::raw(line.into_owned()));
            }
        }
        lines
    }
}

impl Component for BookDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let star = if self.is_favourite { "★" } else { "☆" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} Book ", star))
            .title_bottom(Line::from(" f Favourite  ↑↓ Scroll  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = self.body_lines(content_width);
        let height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

/// "Yes, since Jan 15 2024", "Yes" or "No".
fn favourite_label(is_favourite: bool, since: Option<i64>) -> String {
    use chrono::{DateTime, Local, Utc};
    match (is_favourite, since) {
        (false, _) => "No".to_string(),
        (true, None) => "Yes".to_string(),
        (true, Some(ts)) => {
            let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
                .unwrap_or_default()
                .with_timezone(&Local);
            format!("Yes, since {}", dt.format("%b %d %Y"))
        }
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
