//! # Status Panel
//!
//! Centered single message filling a page: the loading spinner, an error,
//! or an empty-state hint. Stateless.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::text::UiText;
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanel {
    Loading { frame: usize },
    Error(UiText),
    Empty(UiText),
}

impl StatusPanel {
    fn text_and_style(&self) -> (String, Style) {
        match self {
            StatusPanel::Loading { frame } => (
                format!("{} Searching...", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]),
                Style::default().fg(Color::Cyan),
            ),
            StatusPanel::Error(message) => (
                message.as_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            StatusPanel::Empty(message) => (
                message.as_string(),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

impl Component for StatusPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (text, style) = self.text_and_style();
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);
        let paragraph = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, middle);
    }
}
