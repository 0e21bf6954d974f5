//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as fields:
//! - `TabBar`: Tab titles with the pager indicator
//! - `StatusPanel`: Loading spinner, error or empty-state message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBar`: Query editor, emits the new query after every edit
//! - `BookListState` / `BookList`: Selectable book list
//! - `SyllabusViewState` / `SyllabusView`: Expandable syllabus tree
//! - `BookDetailState` / `BookDetail`: Detail overlay with favourite toggle
//!
//! The paired names follow the persistent state + transient wrapper pattern:
//! the `...State` value lives in `TuiState` across frames, and the wrapper
//! is built each frame with borrowed state plus props from `BrowseState`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── search_bar.rs     (Query editor)
//! ├── tab_bar.rs        (Tab titles + pager indicator)
//! ├── book_list.rs      (Search results and favourites lists)
//! ├── book_detail.rs    (Detail overlay)
//! ├── syllabus_view.rs  (Syllabus tree)
//! └── status_panel.rs   (Centered status message)
//! ```

pub mod book_detail;
pub mod book_list;
pub mod search_bar;
pub mod status_panel;
pub mod syllabus_view;
pub mod tab_bar;

pub use book_detail::{BookDetail, BookDetailState, DetailEvent};
pub use book_list::{BookList, BookListEvent, BookListState};
pub use search_bar::{SearchBar, SearchBarEvent};
pub use status_panel::StatusPanel;
pub use syllabus_view::{SyllabusEvent, SyllabusView, SyllabusViewState};
pub use tab_bar::{TAB_BAR_HEIGHT, TabBar};
