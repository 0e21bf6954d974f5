//! # Syllabus View
//!
//! Expandable tree of grading tests, categories and techniques, drawn as an
//! indented list. Enter toggles the selected test or category. Esc
//! collapses everything.
//!
//! The tree is rebuilt from the curriculum and expansion state on every
//! frame and every key press. It is small enough that caching would only
//! add invalidation bugs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::syllabus::{self, Curriculum, ExpansionState, NodeKind, NodePath};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_STEP: usize = 5;

pub struct SyllabusViewState {
    pub curriculum: Curriculum,
    pub expansion: ExpansionState,
    pub list_state: ListState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyllabusEvent {
    Toggled { path: NodePath, expanded: bool },
    CollapsedAll,
}

impl SyllabusViewState {
    pub fn new(curriculum: Curriculum) -> Self {
        let mut list_state = ListState::default();
        if !curriculum.tests.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            curriculum,
            expansion: ExpansionState::default(),
            list_state,
        }
    }

    fn row_count(&self) -> usize {
        let tree = syllabus::render(&self.curriculum, &self.expansion);
        syllabus::flatten(&tree).len()
    }

    /// Path and kind of the selected row.
    fn selected_node(&self) -> Option<(NodePath, NodeKind)> {
        let index = self.list_state.selected()?;
        let tree = syllabus::render(&self.curriculum, &self.expansion);
        let rows = syllabus::flatten(&tree);
        rows.get(index).map(|row| (row.node.path.clone(), row.node.kind))
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.row_count();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }
}

impl EventHandler for SyllabusViewState {
    type Event = SyllabusEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_STEP as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_STEP as isize),
            TuiEvent::Submit => {
                let (path, kind) = self.selected_node()?;
                // Techniques are leaves
                if !kind.is_expandable() {
                    return None;
                }
                let expanded = self.expansion.toggle(&path);
                self.clamp_selection();
                return Some(SyllabusEvent::Toggled { path, expanded });
            }
            TuiEvent::Escape => {
                self.expansion.collapse_all();
                self.clamp_selection();
                return Some(SyllabusEvent::CollapsedAll);
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper.
pub struct SyllabusView<'a> {
    state: &'a mut SyllabusViewState,
}

impl<'a> SyllabusView<'a> {
    pub fn new(state: &'a mut SyllabusViewState) -> Self {
        Self { state }
    }
}

impl Component for SyllabusView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tree = syllabus::render(&self.state.curriculum, &self.state.expansion);
        let rows = syllabus::flatten(&tree);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let indent = "  ".repeat(row.depth);
                let (marker, style) = match row.node.kind {
                    NodeKind::Test { expanded } => (
                        if expanded { "▾ " } else { "▸ " },
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    NodeKind::Category { expanded } => (
                        if expanded { "▾ " } else { "▸ " },
                        Style::default().fg(Color::Cyan),
                    ),
                    NodeKind::Technique => ("· ", Style::default().fg(Color::Gray)),
                };
                ListItem::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(marker, style),
                    Span::styled(row.node.label.clone(), style),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Grading Syllabus ")
            .padding(Padding::horizontal(1));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const SMALL: &str = r#"
[[tests]]
name = "Test 1"

[[tests.categories]]
name = "Throws"
techniques = ["Hip Throw", "Leg Sweep"]

[[tests]]
name = "Test 2"
"#;

    fn state() -> SyllabusViewState {
        SyllabusViewState::new(Curriculum::from_toml_str(SMALL).unwrap())
    }

    fn screen_text(state: &mut SyllabusViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| SyllabusView::new(state).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_starts_collapsed() {
        let mut s = state();
        assert_eq!(s.row_count(), 2);
        let text = screen_text(&mut s);
        assert!(text.contains("▸ Test 1"));
        assert!(!text.contains("Throws"));
    }

    #[test]
    fn test_enter_expands_and_collapses() {
        let mut s = state();
        let event = s.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(SyllabusEvent::Toggled {
                path: NodePath::root(0),
                expanded: true
            })
        );
        assert_eq!(s.row_count(), 3);

        s.handle_event(&TuiEvent::CursorDown);
        s.handle_event(&TuiEvent::Submit);
        assert_eq!(s.row_count(), 5);
        let text = screen_text(&mut s);
        assert!(text.contains("Hip Throw"));
        assert!(text.contains("Leg Sweep"));
    }

    #[test]
    fn test_technique_rows_do_nothing() {
        let mut s = state();
        s.handle_event(&TuiEvent::Submit);
        s.handle_event(&TuiEvent::CursorDown);
        s.handle_event(&TuiEvent::Submit);
        s.handle_event(&TuiEvent::CursorDown); // Hip Throw

        let before = s.expansion.clone();
        assert_eq!(s.handle_event(&TuiEvent::Submit), None);
        assert_eq!(s.expansion, before);
    }

    #[test]
    fn test_collapse_clamps_selection() {
        let mut s = state();
        s.handle_event(&TuiEvent::Submit);
        s.handle_event(&TuiEvent::CursorDown);
        s.handle_event(&TuiEvent::Submit);
        s.handle_event(&TuiEvent::PageDown);
        assert_eq!(s.list_state.selected(), Some(4));

        assert_eq!(
            s.handle_event(&TuiEvent::Escape),
            Some(SyllabusEvent::CollapsedAll)
        );
        assert_eq!(s.row_count(), 2);
        assert_eq!(s.list_state.selected(), Some(1));
    }

    #[test]
    fn test_empty_curriculum() {
        let mut s = SyllabusViewState::new(Curriculum::default());
        assert_eq!(s.handle_event(&TuiEvent::Submit), None);
        s.handle_event(&TuiEvent::CursorDown);
        assert_eq!(s.list_state.selected(), None);
    }
}
