//! # Pager
//!
//! The paged view under the tab bar. Two things can move it:
//!
//! - a tab selection (`Effect::SyncPager`) animates it to the selected page
//! - a swipe moves it directly to a neighbouring page
//!
//! Either way the pager reports a page only when it *settles*, and
//! `reconcile()` turns a settled page into `Action::SelectTab` only if it
//! differs from the selected tab. Pages passed over mid-animation are never
//! reported, and animating to the page already shown is a no-op, so tab
//! selection and page position cannot chase each other.
//!
//! ```text
//! SelectTab(t) ─► SyncPager(t) ─► animate_to(t) ─► tick()… ─► settled t ─► reconcile: equal, nothing
//! swipe(→)     ─► settled p    ─► reconcile: differs ─► SelectTab(p) ─► SyncPager(p) ─► animate_to: already there
//! ```

use crate::core::action::Action;
use crate::core::state::Tab;

/// Animation progress added per tick. Four ticks per transition.
const ANIMATION_STEP: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Forward,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagerState {
    current: Tab,
    target: Option<Tab>,
    progress: f32,
}

impl Default for PagerState {
    fn default() -> Self {
        Self::new(Tab::Search)
    }
}

impl PagerState {
    pub fn new(current: Tab) -> Self {
        Self {
            current,
            target: None,
            progress: 0.0,
        }
    }

    /// The page currently on screen. During an animation this is still the
    /// page being left.
    pub fn current(&self) -> Tab {
        self.current
    }

    pub fn target(&self) -> Option<Tab> {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Animation progress in [0, 1]. Zero when idle.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start animating toward `tab`. Returns false when nothing needs to move.
    pub fn animate_to(&mut self, tab: Tab) -> bool {
        if self.target == Some(tab) {
            return false;
        }
        if self.target.is_none() && self.current == tab {
            return false;
        }
        if self.current == tab {
            // Retargeted back to where we started: just stop.
            self.target = None;
            self.progress = 0.0;
            return false;
        }
        self.target = Some(tab);
        self.progress = 0.0;
        true
    }

    /// Advance the animation one frame. Returns the page it settled on, if
    /// this tick finished it.
    pub fn tick(&mut self) -> Option<Tab> {
        let target = self.target?;
        self.progress += ANIMATION_STEP;
        if self.progress < 1.0 {
            return None;
        }
        self.current = target;
        self.target = None;
        self.progress = 0.0;
        Some(target)
    }

    /// Move directly to the neighbouring page. Cancels any animation.
    /// Returns the settled page, or None at the edge.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<Tab> {
        let next = match direction {
            SwipeDirection::Forward => self.current.next(),
            SwipeDirection::Back => self.current.prev(),
        }?;
        self.current = next;
        self.target = None;
        self.progress = 0.0;
        Some(next)
    }
}

/// Turn a settled page into a tab selection, unless it already matches.
pub fn reconcile(settled: Tab, selected: Tab) -> Option<Action> {
    (settled != selected).then_some(Action::SelectTab(settled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Effect, update};
    use crate::core::state::BrowseState;

    fn settle(pager: &mut PagerState) -> Option<Tab> {
        for _ in 0..16 {
            if let Some(tab) = pager.tick() {
                return Some(tab);
            }
        }
        None
    }

    #[test]
    fn test_animate_to_current_page_is_noop() {
        let mut pager = PagerState::new(Tab::Favourites);
        assert!(!pager.animate_to(Tab::Favourites));
        assert!(!pager.is_animating());
        assert_eq!(pager.tick(), None);
    }

    #[test]
    fn test_animation_settles_on_target_only() {
        let mut pager = PagerState::new(Tab::Search);
        assert!(pager.animate_to(Tab::Syllabus));

        let mut reported = Vec::new();
        for _ in 0..8 {
            if let Some(tab) = pager.tick() {
                reported.push(tab);
            }
        }
        // Never reports the Favourites page it slid past.
        assert_eq!(reported, vec![Tab::Syllabus]);
        assert_eq!(pager.current(), Tab::Syllabus);
    }

    #[test]
    fn test_repeated_animate_to_same_target() {
        let mut pager = PagerState::new(Tab::Search);
        assert!(pager.animate_to(Tab::Favourites));
        pager.tick();
        let progress = pager.progress();
        assert!(!pager.animate_to(Tab::Favourites));
        assert_eq!(pager.progress(), progress);
    }

    #[test]
    fn test_retarget_to_origin_stops_animation() {
        let mut pager = PagerState::new(Tab::Search);
        pager.animate_to(Tab::Syllabus);
        pager.tick();
        assert!(!pager.animate_to(Tab::Search));
        assert!(!pager.is_animating());
        assert_eq!(pager.current(), Tab::Search);
    }

    #[test]
    fn test_swipe_clamps_at_edges() {
        let mut pager = PagerState::new(Tab::Search);
        assert_eq!(pager.swipe(SwipeDirection::Back), None);
        assert_eq!(pager.swipe(SwipeDirection::Forward), Some(Tab::Favourites));
        assert_eq!(pager.swipe(SwipeDirection::Forward), Some(Tab::Syllabus));
        assert_eq!(pager.swipe(SwipeDirection::Forward), None);
        assert_eq!(pager.current(), Tab::Syllabus);
    }

    #[test]
    fn test_swipe_cancels_animation() {
        let mut pager = PagerState::new(Tab::Favourites);
        pager.animate_to(Tab::Syllabus);
        pager.tick();
        assert_eq!(pager.swipe(SwipeDirection::Back), Some(Tab::Search));
        assert!(!pager.is_animating());
    }

    #[test]
    fn test_reconcile_guards_on_equality() {
        assert_eq!(reconcile(Tab::Search, Tab::Search), None);
        assert_eq!(
            reconcile(Tab::Syllabus, Tab::Search),
            Some(Action::SelectTab(Tab::Syllabus))
        );
    }

    #[test]
    fn test_tab_selection_round_trip_has_no_feedback() {
        let mut state = BrowseState::default();
        let mut pager = PagerState::default();

        for tab in [Tab::Syllabus, Tab::Search, Tab::Favourites, Tab::Favourites] {
            let Effect::SyncPager(page) = update(&mut state, Action::SelectTab(tab)) else {
                panic!("expected SyncPager");
            };
            if pager.animate_to(page) {
                let settled = settle(&mut pager).unwrap();
                assert_eq!(reconcile(settled, state.selected_tab), None);
            }
            assert_eq!(pager.current(), state.selected_tab);
        }
    }

    #[test]
    fn test_swipe_round_trip_converges() {
        let mut state = BrowseState::default();
        let mut pager = PagerState::default();

        let settled = pager.swipe(SwipeDirection::Forward).unwrap();
        let action = reconcile(settled, state.selected_tab).unwrap();
        let Effect::SyncPager(page) = update(&mut state, action) else {
            panic!("expected SyncPager");
        };
        // The pager is already there, so it does not animate again.
        assert!(!pager.animate_to(page));
        assert_eq!(state.selected_tab, Tab::Favourites);
        assert_eq!(pager.current(), Tab::Favourites);
    }
}
