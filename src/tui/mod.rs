//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and executes the
//! effects the reducer hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//! key press ─► component ─► Action ─► BrowseController::dispatch ─► Effect ─► Runtime
//!                                            │                                  │
//!                                            ▼ watch                            ▼
//!                                       draw_ui(state)                 search task / pager /
//!                                                                      favourites store
//! ```
//!
//! Search tasks run on tokio and report back through an `std::sync::mpsc`
//! channel that the loop drains between frames.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (search in flight or pager sliding): draws every ~80ms
//!   and advances the pager one step per frame.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or a
//!   newly published state.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::controller::BrowseController;
use crate::core::favourites::{FavouritesStore, persist_favourite};
use crate::core::pager::{self, PagerState, SwipeDirection};
use crate::core::state::{BrowseState, Tab};
use crate::core::syllabus::Curriculum;
use crate::core::view::{self, FavouritesPage, SearchPage};
use crate::search::{CatalogProvider, OpenLibraryProvider, SearchDispatcher, SearchProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BookDetailState, BookListEvent, BookListState, DetailEvent, SearchBar, SearchBarEvent,
    SyllabusEvent, SyllabusViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_bar: SearchBar,
    pub search_list: BookListState,
    pub favourites_list: BookListState,
    pub syllabus: SyllabusViewState,
    // Page on screen; converges on BrowseState::selected_tab
    pub pager: PagerState,
    // Detail overlay (None = hidden)
    pub detail: Option<BookDetailState>,
}

impl TuiState {
    pub fn new(initial_query: &str, curriculum: Curriculum) -> Self {
        Self {
            search_bar: SearchBar::new(initial_query),
            search_list: BookListState::new(),
            favourites_list: BookListState::new(),
            syllabus: SyllabusViewState::new(curriculum),
            pager: PagerState::new(Tab::Search),
            detail: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for query editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build a search provider from a resolved config's backend name.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn SearchProvider> {
    match config.backend.as_str() {
        "catalog" => match &config.catalog_path {
            Some(path) => Arc::new(CatalogProvider::new(path.clone())),
            None => {
                warn!("Catalog backend selected without a catalog path, using Open Library");
                Arc::new(open_library(config))
            }
        },
        "openlibrary" => Arc::new(open_library(config)),
        other => {
            warn!("Unknown backend '{}', using Open Library", other);
            Arc::new(open_library(config))
        }
    }
}

fn open_library(config: &ResolvedConfig) -> OpenLibraryProvider {
    OpenLibraryProvider::new(
        Some(config.openlibrary_base_url.clone()),
        Some(config.covers_base_url.clone()),
        Duration::from_secs(config.timeout_secs),
    )
}

/// Everything effects act on, apart from presentation state.
struct Runtime {
    controller: BrowseController,
    dispatcher: SearchDispatcher,
    favourites: Option<FavouritesStore>,
    tx: mpsc::Sender<Action>,
}

impl Runtime {
    /// Dispatch one action and execute its effect. Returns true on quit.
    fn apply(&mut self, action: Action, tui: &mut TuiState) -> bool {
        let effect = self.controller.dispatch(action);
        self.execute(effect, tui)
    }

    fn execute(&mut self, effect: Effect, tui: &mut TuiState) -> bool {
        match effect {
            Effect::None => {}
            Effect::ScheduleSearch { query, ticket } => {
                self.dispatcher.schedule(query, ticket, self.tx.clone());
            }
            Effect::CancelSearch => self.dispatcher.cancel(),
            Effect::SyncPager(tab) => {
                if tui.pager.animate_to(tab) {
                    debug!("Pager animating {:?} -> {:?}", tui.pager.current(), tab);
                }
            }
            Effect::Navigate(book) => {
                let since = self
                    .favourites
                    .as_ref()
                    .and_then(|store| store.entry(&book.id))
                    .map(|entry| entry.added_at);
                tui.detail = Some(BookDetailState::new(book, since));
            }
            Effect::ScrollResultsToTop => tui.search_list.reset(),
            Effect::PersistFavourite { book, favourite } => {
                if let Some(store) = self.favourites.as_mut() {
                    persist_favourite(store, &book, favourite);
                    if let Some(detail) = tui.detail.as_mut()
                        && detail.book.id == book.id
                    {
                        detail.favourite_since = store.entry(&book.id).map(|e| e.added_at);
                    }
                }
            }
            Effect::Quit => return true,
        }
        false
    }

    /// Turn a settled pager page into a tab selection when they disagree.
    fn settle_pager(&mut self, settled: Tab, tui: &mut TuiState) -> bool {
        match pager::reconcile(settled, self.controller.state().selected_tab) {
            Some(action) => self.apply(action, tui),
            None => false,
        }
    }

    /// Route list/tree navigation to the page on screen.
    fn handle_page_event(&mut self, event: &TuiEvent, tui: &mut TuiState) -> bool {
        match tui.pager.current() {
            Tab::Search => {
                let state = self.controller.state();
                let SearchPage::Results(books) = view::search_page(state) else {
                    return false;
                };
                tui.search_list.set_len(books.len());
                if let Some(BookListEvent::Open(index)) = tui.search_list.handle_event(event)
                    && let Some(book) = books.get(index).cloned()
                {
                    return self.apply(Action::BookClicked(book), tui);
                }
            }
            Tab::Favourites => {
                let state = self.controller.state();
                let FavouritesPage::Books(books) = view::favourites_page(state) else {
                    return false;
                };
                tui.favourites_list.set_len(books.len());
                if let Some(BookListEvent::Open(index)) = tui.favourites_list.handle_event(event)
                    && let Some(book) = books.get(index).cloned()
                {
                    return self.apply(Action::BookClicked(book), tui);
                }
            }
            Tab::Syllabus => match tui.syllabus.handle_event(event) {
                Some(SyllabusEvent::Toggled { path, expanded }) => {
                    debug!("Syllabus node {} expanded={}", path, expanded);
                }
                Some(SyllabusEvent::CollapsedAll) => debug!("Syllabus collapsed"),
                None => {}
            },
        }
        false
    }

    /// Handle one terminal event. Returns true on quit.
    fn handle_event(&mut self, event: TuiEvent, tui: &mut TuiState) -> bool {
        // Resize just needs a redraw
        if matches!(event, TuiEvent::Resize) {
            return false;
        }

        // ForceQuit (Ctrl+C) always quits regardless of overlay
        if matches!(event, TuiEvent::ForceQuit) {
            return self.apply(Action::Quit, tui);
        }

        // When the detail overlay is open, route all events to it
        if let Some(detail) = tui.detail.as_mut() {
            match detail.handle_event(&event) {
                Some(DetailEvent::Dismiss) => tui.detail = None,
                Some(DetailEvent::ToggleFavourite) => {
                    let book = detail.book.clone();
                    return self.apply(Action::ToggleFavourite(book), tui);
                }
                None => {}
            }
            return false;
        }

        match event {
            TuiEvent::SelectTab(index) => match Tab::try_from(index) {
                Ok(tab) => self.apply(Action::SelectTab(tab), tui),
                Err(e) => {
                    warn!("Ignoring tab selection: {}", e);
                    false
                }
            },
            TuiEvent::SwipeForward | TuiEvent::SwipeBack => {
                let direction = if event == TuiEvent::SwipeForward {
                    SwipeDirection::Forward
                } else {
                    SwipeDirection::Back
                };
                match tui.pager.swipe(direction) {
                    Some(settled) => self.settle_pager(settled, tui),
                    None => false,
                }
            }
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::PageUp
            | TuiEvent::PageDown
            | TuiEvent::Submit
            | TuiEvent::Escape => self.handle_page_event(&event, tui),
            // SearchBar handles everything else
            _ => match tui.search_bar.handle_event(&event) {
                Some(SearchBarEvent::QueryChanged(query)) => {
                    self.apply(Action::ChangeSearchQuery(query), tui)
                }
                None => false,
            },
        }
    }
}

fn load_curriculum(config: &ResolvedConfig) -> Curriculum {
    match Curriculum::load(config.syllabus_file.as_deref()) {
        Ok(curriculum) => curriculum,
        Err(e) => {
            warn!("Failed to load syllabus, using the bundled one: {}", e);
            Curriculum::bundled().unwrap_or_else(|e| {
                warn!("Bundled syllabus is invalid: {}", e);
                Curriculum::default()
            })
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let dispatcher = SearchDispatcher::new(
        provider,
        Duration::from_millis(config.debounce_ms),
        config.result_limit,
    );
    info!("Search backend: {}", dispatcher.provider_name());

    let favourites = match FavouritesStore::open_default() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Favourites unavailable: {}", e);
            None
        }
    };

    let state = BrowseState::new(config.default_query.clone())
        .with_min_query_len(config.min_query_len);
    let controller = BrowseController::new(state);
    // The renderer only ever sees published states
    let mut published = controller.subscribe();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut runtime = Runtime {
        controller,
        dispatcher,
        favourites,
        tx,
    };
    let mut tui = TuiState::new(&config.default_query, load_curriculum(&config));

    if let Some(books) = runtime.favourites.as_ref().map(FavouritesStore::books) {
        runtime.apply(Action::FavouritesLoaded(books), &mut tui);
    }
    runtime.apply(Action::ChangeSearchQuery(config.default_query.clone()), &mut tui);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = runtime.controller.state().is_loading || tui.pager.is_animating();
        if animating || published.has_changed().unwrap_or(false) {
            needs_redraw = true;
        }

        let mut should_quit = false;

        // Advance the pager one step per animation frame
        if tui.pager.is_animating()
            && let Some(settled) = tui.pager.tick()
        {
            should_quit |= runtime.settle_pager(settled, &mut tui);
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            // The borrow must end before the next dispatch publishes
            let state = published.borrow_and_update();
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui, spinner_frame))?;
            drop(state);
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            should_quit |= runtime.handle_event(event, &mut tui);
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (search lifecycle)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runtime.apply(action, &mut tui) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    runtime.dispatcher.cancel();
    ratatui::restore();
    Ok(())
}
