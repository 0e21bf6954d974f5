use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::{BrowseState, Tab};
use crate::core::text::StringKey;
use crate::core::view::{self, FavouritesPage, SearchPage};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    BookDetail, BookList, StatusPanel, SyllabusView, TAB_BAR_HEIGHT, TabBar,
};

const SEARCH_BAR_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, state: &BrowseState, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(SEARCH_BAR_HEIGHT),
        Length(TAB_BAR_HEIGHT),
        Min(0),
        Length(1),
    ]);
    let [search_area, tabs_area, page_area, help_area] = layout.areas(frame.area());

    tui.search_bar.loading = state.is_loading;
    tui.search_bar.render(frame, search_area);

    TabBar::new(state.selected_tab, &tui.pager, state.favourite_books.len())
        .render(frame, tabs_area);

    // The pager decides which page is on screen; it converges on the
    // selected tab through reconcile.
    draw_page(frame, page_area, tui.pager.current(), state, tui, spinner_frame);

    frame.render_widget(
        Span::styled(help_text(tui), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(detail) = tui.detail.as_mut() {
        let is_favourite = state.is_favourite(&detail.book.id);
        BookDetail::new(detail, is_favourite).render(frame, frame.area());
    }
}

fn draw_page(
    frame: &mut Frame,
    area: Rect,
    page: Tab,
    state: &BrowseState,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    match page {
        Tab::Search => match view::search_page(state) {
            SearchPage::Loading => StatusPanel::Loading {
                frame: spinner_frame,
            }
            .render(frame, area),
            SearchPage::Error(message) => StatusPanel::Error(message.clone()).render(frame, area),
            SearchPage::Empty => {
                StatusPanel::Empty(StringKey::NoSearchResults.into()).render(frame, area)
            }
            SearchPage::Results(books) => BookList::new(
                &mut tui.search_list,
                books,
                &state.favourite_books,
                format!("{} results for \"{}\"", books.len(), state.search_query.trim()),
            )
            .render(frame, area),
        },
        Tab::Favourites => match view::favourites_page(state) {
            FavouritesPage::Empty => {
                StatusPanel::Empty(StringKey::NoFavourites.into()).render(frame, area)
            }
            FavouritesPage::Books(books) => BookList::new(
                &mut tui.favourites_list,
                books,
                &state.favourite_books,
                Tab::Favourites.title().to_string(),
            )
            .render(frame, area),
        },
        Tab::Syllabus => SyllabusView::new(&mut tui.syllabus).render(frame, area),
    }
}

fn help_text(tui: &TuiState) -> &'static str {
    if tui.detail.is_some() {
        return " f Favourite  Esc Back  Ctrl+C Quit";
    }
    match tui.pager.current() {
        Tab::Syllabus => " F1-F3/Tab Pages  ↑↓ Move  Enter Expand  Esc Collapse all  Ctrl+C Quit",
        _ => " Type to search  F1-F3/Tab Pages  ↑↓ Move  Enter Open  Ctrl+C Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syllabus::Curriculum;
    use crate::test_support::book;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &BrowseState, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, state, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn tui() -> TuiState {
        TuiState::new("dune", Curriculum::default())
    }

    #[test]
    fn test_draw_search_results() {
        let mut state = BrowseState::new("dune".into());
        state.search_results = vec![book("1", "Dune"), book("2", "Dune Messiah")];
        let text = draw(&state, &mut tui());
        assert!(text.contains("2 results for \"dune\""));
        assert!(text.contains("Dune Messiah"));
    }

    #[test]
    fn test_draw_loading_hides_results() {
        let mut state = BrowseState::new("dune".into());
        state.search_results = vec![book("1", "Dune Messiah")];
        state.is_loading = true;
        let text = draw(&state, &mut tui());
        assert!(text.contains("Searching..."));
        assert!(!text.contains("Dune Messiah"));
    }

    #[test]
    fn test_draw_error_over_results() {
        let mut state = BrowseState::new("dune".into());
        state.search_results = vec![book("1", "Dune Messiah")];
        state.error_message = Some(StringKey::ErrorNoInternet.into());
        let text = draw(&state, &mut tui());
        assert!(text.contains("Couldn't reach the server"));
        assert!(!text.contains("Dune Messiah"));
    }

    #[test]
    fn test_draw_empty_search() {
        let state = BrowseState::new("zzzz".into());
        let text = draw(&state, &mut tui());
        assert!(text.contains("No search results"));
    }

    #[test]
    fn test_draw_follows_pager_not_selection() {
        let mut state = BrowseState::new("dune".into());
        state.selected_tab = Tab::Favourites;
        let mut tui = tui();
        tui.pager.animate_to(Tab::Favourites);
        // Mid-animation the search page is still on screen
        let text = draw(&state, &mut tui);
        assert!(text.contains("No search results"));

        while tui.pager.tick().is_none() {}
        let text = draw(&state, &mut tui);
        assert!(text.contains("You don't have any favourite books yet"));
    }

    #[test]
    fn test_draw_detail_overlay() {
        let mut state = BrowseState::new("dune".into());
        let dune = book("1", "Dune");
        state.favourite_books = vec![dune.clone()];
        let mut tui = tui();
        tui.detail = Some(crate::tui::components::BookDetailState::new(dune, None));
        let text = draw(&state, &mut tui);
        assert!(text.contains("★ Book"));
        assert!(text.contains("f Favourite"));
    }
}
