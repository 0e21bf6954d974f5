//! # Search Dispatcher
//!
//! Runs searches for the event loop. Each `schedule()` call:
//!
//! 1. aborts the previous search task, pending or in flight
//! 2. waits out the debounce window
//! 3. sends `SearchStarted(ticket)`, runs the provider, then sends
//!    `SearchSucceeded` or `SearchFailed` with the same ticket
//!
//! Aborting is best effort: a task that already sent its completion cannot
//! be recalled. The reducer drops completions with stale tickets, so a late
//! result is harmless either way.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::state::SearchTicket;
use crate::search::{SearchProvider, SearchRequest};

pub struct SearchDispatcher {
    provider: Arc<dyn SearchProvider>,
    debounce: Duration,
    limit: usize,
    active: Option<AbortHandle>,
}

impl SearchDispatcher {
    pub fn new(provider: Arc<dyn SearchProvider>, debounce: Duration, limit: usize) -> Self {
        Self {
            provider,
            debounce,
            limit,
            active: None,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Debounce, then search for `query`. Supersedes any earlier schedule.
    pub fn schedule(&mut self, query: String, ticket: SearchTicket, tx: mpsc::Sender<Action>) {
        self.cancel();

        info!(
            "Scheduling search {:?} via {} ({:?})",
            query,
            self.provider.name(),
            ticket
        );
        let provider = self.provider.clone();
        let debounce = self.debounce;
        let limit = self.limit;

        let handle = tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            if tx.send(Action::SearchStarted(ticket)).is_err() {
                warn!("Failed to send SearchStarted: receiver dropped");
                return;
            }

            let request = SearchRequest {
                query: &query,
                limit,
            };
            let action = match provider.search(request).await {
                Ok(results) => {
                    debug!("Search {:?} returned {} books", ticket, results.len());
                    Action::SearchSucceeded { ticket, results }
                }
                Err(e) => {
                    warn!("Search {:?} failed: {}", ticket, e);
                    Action::SearchFailed {
                        ticket,
                        message: e.ui_text(),
                    }
                }
            };
            if tx.send(action).is_err() {
                warn!("Failed to send search result: receiver dropped");
            }
        });
        self.active = Some(handle.abort_handle());
    }

    /// Abort the current search task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!("Aborting previous search task");
            handle.abort();
        }
    }
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
