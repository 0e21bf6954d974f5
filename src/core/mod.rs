//! # Core Application Logic
//!
//! This module contains Folio's browsing logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • BrowseState          │
//!                    │  • Action (intents)     │
//!                    │  • update() (reducer)   │
//!                    │  • PagerState           │
//!                    │  • Syllabus tree        │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Search   │      │ Favourites │
//!     │  Adapter   │      │ providers  │      │   store    │
//!     │ (ratatui)  │      │ (reqwest)  │      │   (json)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `BrowseState` and `Tab`
//! - [`action`]: `Action`, `Effect`, and the `update()` reducer
//! - [`controller`]: owns the state and publishes it to subscribers
//! - [`pager`]: keeps the paged view and the selected tab in step
//! - [`view`]: which panel each page shows
//! - [`syllabus`]: curriculum asset, expansion map, render tree

pub mod action;
pub mod book;
pub mod config;
pub mod controller;
pub mod favourites;
pub mod pager;
pub mod state;
pub mod syllabus;
pub mod text;
pub mod view;
