//! # TabBar Component
//!
//! Row of tab titles with an underline indicator beneath.
//!
//! Stateless: every field is a prop. The highlighted title follows
//! `selected` (the controller's tab), while the indicator follows the
//! pager, sliding from the page on screen toward the animation target.
//! When the two disagree the user sees the indicator catching up.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::pager::PagerState;
use crate::core::state::Tab;
use crate::tui::component::Component;

/// Title row plus indicator row.
pub const TAB_BAR_HEIGHT: u16 = 2;

pub struct TabBar {
    pub selected: Tab,
    /// Page on screen
    pub current: Tab,
    /// Animation target, if any
    pub target: Option<Tab>,
    /// Animation progress in [0, 1]
    pub progress: f32,
    /// Number shown after the favourites title
    pub favourite_count: usize,
}

impl TabBar {
    pub fn new(selected: Tab, pager: &PagerState, favourite_count: usize) -> Self {
        Self {
            selected,
            current: pager.current(),
            target: pager.target(),
            progress: pager.progress(),
            favourite_count,
        }
    }

    /// Left edge of the indicator, in tab-width units.
    fn indicator_position(&self) -> f32 {
        let from = self.current.index() as f32;
        match self.target {
            Some(to) => from + (to.index() as f32 - from) * self.progress.clamp(0.0, 1.0),
            None => from,
        }
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [titles_area, indicator_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let cells =
            Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(titles_area);

        for (tab, cell) in Tab::ALL.iter().zip(cells.iter()) {
            let mut title = format!("F{} {}", tab.index() + 1, tab.title());
            if *tab == Tab::Favourites && self.favourite_count > 0 {
                title.push_str(&format!(" ({})", self.favourite_count));
            }
            let style = if *tab == self.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(Line::from(Span::styled(title, style)).centered(), *cell);
        }

        if indicator_area.width == 0 {
            return;
        }
        let tab_width = indicator_area.width / 3;
        let offset = (self.indicator_position() * f32::from(tab_width)).round() as u16;
        let x = indicator_area.x + offset.min(indicator_area.width.saturating_sub(tab_width));
        let indicator = Rect {
            x,
            y: indicator_area.y,
            width: tab_width,
            height: 1,
        };
        frame.render_widget(
            Span::styled(
                "━".repeat(tab_width as usize),
                Style::default().fg(Color::Yellow),
            ),
            indicator,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(tab_bar: &mut TabBar, width: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, TAB_BAR_HEIGHT)).unwrap();
        terminal.draw(|f| tab_bar.render(f, f.area())).unwrap();
        terminal
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_all_titles() {
        let mut tab_bar = TabBar::new(Tab::Search, &PagerState::new(Tab::Search), 0);
        let terminal = draw(&mut tab_bar, 90);
        let titles = row(&terminal, 0);
        assert!(titles.contains("F1 Search Results"));
        assert!(titles.contains("F2 Favourites"));
        assert!(titles.contains("F3 Syllabus"));
    }

    #[test]
    fn test_favourite_count_shown() {
        let mut tab_bar = TabBar::new(Tab::Search, &PagerState::new(Tab::Search), 3);
        let terminal = draw(&mut tab_bar, 90);
        assert!(row(&terminal, 0).contains("Favourites (3)"));
    }

    #[test]
    fn test_indicator_under_current_page() {
        let mut tab_bar = TabBar::new(Tab::Syllabus, &PagerState::new(Tab::Syllabus), 0);
        let terminal = draw(&mut tab_bar, 90);
        let indicator = row(&terminal, 1);
        let first = indicator.chars().position(|c| c == '━');
        assert_eq!(first, Some(60));
    }

    #[test]
    fn test_indicator_interpolates_during_animation() {
        let mut pager = PagerState::new(Tab::Search);
        pager.animate_to(Tab::Syllabus);
        pager.tick();
        pager.tick(); // halfway

        let tab_bar = TabBar::new(Tab::Syllabus, &pager, 0);
        assert!((tab_bar.indicator_position() - 1.0).abs() < f32::EPSILON);
    }
}
