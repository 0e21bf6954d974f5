//! # Browse Controller
//!
//! Single owner of `BrowseState`. Intents go in through `dispatch()`, which
//! runs the reducer and then publishes the committed state on a
//! `tokio::sync::watch` channel. Subscribers always see whole transitions,
//! in order, never a half-applied one.
//!
//! Unchanged states (e.g. `BookClicked`, stale search completions) are not
//! republished.

use log::debug;
use tokio::sync::watch;

use crate::core::action::{Action, Effect, update};
use crate::core::state::BrowseState;

pub struct BrowseController {
    state: BrowseState,
    publisher: watch::Sender<BrowseState>,
}

impl BrowseController {
    pub fn new(state: BrowseState) -> Self {
        let (publisher, _) = watch::channel(state.clone());
        Self { state, publisher }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// A receiver that starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<BrowseState> {
        self.publisher.subscribe()
    }

    /// Apply one intent and publish the result. Returns the effect for the
    /// caller to execute.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        let effect = update(&mut self.state, action);
        let state = &self.state;
        self.publisher.send_if_modified(|published| {
            if published == state {
                false
            } else {
                published.clone_from(state);
                true
            }
        });
        effect
    }
}
