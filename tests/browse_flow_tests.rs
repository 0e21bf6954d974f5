use std::sync::{Arc, mpsc};
use std::time::Duration;

use async_trait::async_trait;
use folio::core::action::{Action, Effect};
use folio::core::book::BookSummary;
use folio::core::controller::BrowseController;
use folio::core::pager::{PagerState, SwipeDirection, reconcile};
use folio::core::state::{BrowseState, SearchTicket, Tab};
use folio::core::syllabus::{self, Curriculum, ExpansionState, NodePath};
use folio::core::text::{StringKey, UiText};
use folio::core::view::{FavouritesPage, SearchPage, favourites_page, search_page};
use folio::search::{SearchDispatcher, SearchError, SearchProvider, SearchRequest};

// ============================================================================
// Helper Functions
// ============================================================================

fn book(id: &str, title: &str) -> BookSummary {
    BookSummary {
        id: id.to_string(),
        title: title.to_string(),
        image_url: String::new(),
        authors: Vec::new(),
        description: String::new(),
        languages: Vec::new(),
        first_publish_year: None,
        average_rating: None,
        rating_count: None,
        num_pages: None,
        num_editions: 1,
    }
}

/// Answers every query with one book titled after the query. Queries
/// starting with "slow" take a while.
struct EchoProvider;

#[async_trait]
impl SearchProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookSummary>, SearchError> {
        if request.query.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        if request.query == "offline" {
            return Err(SearchError::NoInternet);
        }
        Ok(vec![book(request.query, request.query)])
    }
}

/// Execute search effects the way the event loop does.
fn run_effect(effect: Effect, dispatcher: &mut SearchDispatcher, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::ScheduleSearch { query, ticket } => dispatcher.schedule(query, ticket, tx.clone()),
        Effect::CancelSearch => dispatcher.cancel(),
        _ => {}
    }
}

/// Pump background actions into the controller until `done` holds or two
/// seconds pass.
async fn pump_until(
    controller: &mut BrowseController,
    dispatcher: &mut SearchDispatcher,
    tx: &mpsc::Sender<Action>,
    rx: &mpsc::Receiver<Action>,
    done: impl Fn(&BrowseState) -> bool,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !done(controller.state()) && tokio::time::Instant::now() < deadline {
        while let Ok(action) = rx.try_recv() {
            let effect = controller.dispatch(action);
            run_effect(effect, dispatcher, tx);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn setup() -> (
    BrowseController,
    SearchDispatcher,
    mpsc::Sender<Action>,
    mpsc::Receiver<Action>,
) {
    let controller = BrowseController::new(BrowseState::new(String::new()));
    let dispatcher = SearchDispatcher::new(Arc::new(EchoProvider), Duration::from_millis(20), 20);
    let (tx, rx) = mpsc::channel();
    (controller, dispatcher, tx, rx)
}

// ============================================================================
// Search Flow
// ============================================================================

#[tokio::test]
async fn test_query_to_results() {
    let (mut controller, mut dispatcher, tx, rx) = setup();
    let mut view = controller.subscribe();

    let effect = controller.dispatch(Action::ChangeSearchQuery("dune".into()));
    run_effect(effect, &mut dispatcher, &tx);
    pump_until(&mut controller, &mut dispatcher, &tx, &rx, |s| {
        !s.search_results.is_empty()
    })
    .await;

    let state = view.borrow_and_update().clone();
    assert_eq!(state.search_results, vec![book("dune", "dune")]);
    assert!(!state.is_loading);
    assert_eq!(state.error_message, None);
    assert_eq!(search_page(&state), SearchPage::Results(&state.search_results));
}

#[tokio::test]
async fn test_newer_query_wins_over_slow_older_one() {
    let (mut controller, mut dispatcher, tx, rx) = setup();

    let effect = controller.dispatch(Action::ChangeSearchQuery("slow query".into()));
    run_effect(effect, &mut dispatcher, &tx);
    // Let the slow search get past its debounce and start
    tokio::time::sleep(Duration::from_millis(60)).await;

    let effect = controller.dispatch(Action::ChangeSearchQuery("fast".into()));
    run_effect(effect, &mut dispatcher, &tx);

    pump_until(&mut controller, &mut dispatcher, &tx, &rx, |_| false).await;

    assert_eq!(controller.state().search_results, vec![book("fast", "fast")]);
    assert!(!controller.state().is_loading);
}

#[tokio::test]
async fn test_stale_completion_is_dropped() {
    let (mut controller, _dispatcher, _tx, _rx) = setup();
    controller.dispatch(Action::ChangeSearchQuery("first".into()));
    let stale = controller.state().search_ticket;
    controller.dispatch(Action::ChangeSearchQuery("second".into()));

    let before = controller.state().clone();
    let effect = controller.dispatch(Action::SearchSucceeded {
        ticket: stale,
        results: vec![book("1", "first")],
    });
    assert_eq!(effect, Effect::None);
    assert_eq!(controller.state(), &before);

    let effect = controller.dispatch(Action::SearchFailed {
        ticket: SearchTicket(stale.0),
        message: StringKey::ErrorServer.into(),
    });
    assert_eq!(effect, Effect::None);
    assert_eq!(controller.state().error_message, None);
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let (mut controller, mut dispatcher, tx, rx) = setup();

    let effect = controller.dispatch(Action::ChangeSearchQuery("offline".into()));
    run_effect(effect, &mut dispatcher, &tx);
    pump_until(&mut controller, &mut dispatcher, &tx, &rx, |s| {
        s.error_message.is_some()
    })
    .await;

    assert_eq!(
        controller.state().error_message,
        Some(UiText::Resource(StringKey::ErrorNoInternet))
    );
    assert!(matches!(search_page(controller.state()), SearchPage::Error(_)));

    let effect = controller.dispatch(Action::ChangeSearchQuery("online".into()));
    run_effect(effect, &mut dispatcher, &tx);
    pump_until(&mut controller, &mut dispatcher, &tx, &rx, |s| {
        !s.search_results.is_empty()
    })
    .await;

    assert_eq!(controller.state().error_message, None);
    assert_eq!(controller.state().search_results, vec![book("online", "online")]);
}

#[tokio::test]
async fn test_short_query_cancels_pending_search() {
    let (mut controller, mut dispatcher, tx, rx) = setup();

    let effect = controller.dispatch(Action::ChangeSearchQuery("dune".into()));
    run_effect(effect, &mut dispatcher, &tx);
    let effect = controller.dispatch(Action::ChangeSearchQuery("d".into()));
    assert_eq!(effect, Effect::CancelSearch);
    run_effect(effect, &mut dispatcher, &tx);

    // Give an un-cancelled task ample time to report back
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());
    assert!(controller.state().search_results.is_empty());
    assert!(!controller.state().is_loading);
}

// ============================================================================
// Tabs and Pager
// ============================================================================

#[test]
fn test_tab_click_and_swipe_converge() {
    let mut controller = BrowseController::new(BrowseState::default());
    let mut pager = PagerState::new(Tab::Search);

    // Click: controller first, pager follows
    let effect = controller.dispatch(Action::SelectTab(Tab::Syllabus));
    assert_eq!(effect, Effect::SyncPager(Tab::Syllabus));
    assert!(pager.animate_to(Tab::Syllabus));
    let settled = loop {
        if let Some(tab) = pager.tick() {
            break tab;
        }
    };
    assert_eq!(reconcile(settled, controller.state().selected_tab), None);

    // Swipe: pager first, controller follows
    let settled = pager.swipe(SwipeDirection::Back).unwrap();
    let action = reconcile(settled, controller.state().selected_tab).unwrap();
    let effect = controller.dispatch(action);
    assert_eq!(controller.state().selected_tab, Tab::Favourites);
    // The pager is already there, so syncing is a no-op
    let Effect::SyncPager(tab) = effect else {
        panic!("expected SyncPager, got {:?}", effect);
    };
    assert!(!pager.animate_to(tab));
    assert_eq!(pager.current(), Tab::Favourites);
}

#[test]
fn test_tab_index_out_of_range_rejected() {
    assert_eq!(Tab::try_from(1), Ok(Tab::Favourites));
    assert!(Tab::try_from(3).is_err());
}

// ============================================================================
// Favourites
// ============================================================================

#[test]
fn test_toggle_favourite_round_trip() {
    let mut controller = BrowseController::new(BrowseState::default());
    let dune = book("1", "Dune");
    assert_eq!(favourites_page(controller.state()), FavouritesPage::Empty);

    let effect = controller.dispatch(Action::ToggleFavourite(dune.clone()));
    assert_eq!(
        effect,
        Effect::PersistFavourite {
            book: dune.clone(),
            favourite: true
        }
    );
    assert!(controller.state().is_favourite("1"));

    let effect = controller.dispatch(Action::ToggleFavourite(dune.clone()));
    assert_eq!(
        effect,
        Effect::PersistFavourite {
            book: dune,
            favourite: false
        }
    );
    assert_eq!(favourites_page(controller.state()), FavouritesPage::Empty);
}

// ============================================================================
// Syllabus
// ============================================================================

#[test]
fn test_bundled_syllabus_expands() {
    let curriculum = Curriculum::bundled().expect("bundled syllabus parses");
    assert_eq!(curriculum.tests.len(), 4);

    let mut expansion = ExpansionState::default();
    let collapsed = syllabus::render(&curriculum, &expansion);
    assert_eq!(syllabus::flatten(&collapsed).len(), 4);

    expansion.toggle(&NodePath::root(0));
    let tree = syllabus::render(&curriculum, &expansion);
    let rows = syllabus::flatten(&tree);
    let labels: Vec<&str> = rows.iter().map(|r| r.node.label.as_str()).collect();
    assert_eq!(labels[0], "Test 1");
    assert!(labels.contains(&"Self Defence"));
    assert!(rows.iter().filter(|r| r.depth == 1).count() >= 3);
}
