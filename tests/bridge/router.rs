use systray_bridge::tray::router::{ClickRouter, RouteResult};
use tokio::sync::mpsc;

#[test]
fn menu_ids_round_trip_to_seq_ids() {
    // Arrange
    let seq_ids = [0, 1, 42, usize::MAX];

    // Act
    let parsed: Vec<Option<usize>> = seq_ids
        .iter()
        .map(|&seq_id| ClickRouter::seq_id(&ClickRouter::menu_id(seq_id)))
        .collect();

    // Assert
    assert_eq!(parsed, seq_ids.iter().map(|&s| Some(s)).collect::<Vec<_>>());
}

#[test]
fn foreign_menu_ids_have_no_seq_id() {
    let cases = ["", "item-", "item-x", "item--1", "quit", "0", "items-3"];

    for menu_id in cases {
        assert_eq!(ClickRouter::seq_id(menu_id), None, "menu id {:?}", menu_id);
    }
}

#[test]
fn router_delivers_click_to_subscribed_item() {
    // Arrange
    let mut router = ClickRouter::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    router.subscribe(3, tx);

    // Act
    let result = router.route(&ClickRouter::menu_id(3));

    // Assert
    assert_eq!(result, RouteResult::Delivered(3));
    assert_eq!(rx.try_recv(), Ok(()));
}

#[test]
fn router_returns_unrouted_for_unknown_ids() {
    // Arrange
    let mut router = ClickRouter::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    router.subscribe(0, tx);

    // Act
    let result = router.route("unknown");

    // Assert
    assert_eq!(result, RouteResult::Unrouted);
}

#[test]
fn router_reports_closed_sources() {
    // Arrange
    let mut router = ClickRouter::new();
    let (tx, rx) = mpsc::unbounded_channel();
    router.subscribe(1, tx);
    drop(rx);

    // Act
    let result = router.route(&ClickRouter::menu_id(1));

    // Assert
    assert_eq!(result, RouteResult::Closed(1));
}

#[test]
fn router_ignores_ids_that_only_look_like_items() {
    // Arrange
    let mut router = ClickRouter::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    router.subscribe(0, tx);

    // Act
    let results: Vec<RouteResult> = ["item-00x", "item-", "item-1", "Item-0"]
        .into_iter()
        .map(|menu_id| router.route(menu_id))
        .collect();

    // Assert
    assert!(results.iter().all(|r| *r == RouteResult::Unrouted));
    assert!(rx.try_recv().is_err());
}

#[test]
fn router_uses_latest_subscription() {
    // Arrange
    let mut router = ClickRouter::new();
    let (first_tx, mut first_rx) = mpsc::unbounded_channel();
    let (second_tx, mut second_rx) = mpsc::unbounded_channel();
    router.subscribe(0, first_tx);
    router.subscribe(0, second_tx);

    // Act
    let _ = router.route(&ClickRouter::menu_id(0));

    // Assert
    assert!(first_rx.try_recv().is_err());
    assert_eq!(second_rx.try_recv(), Ok(()));
}

#[test]
fn routes_do_not_leak_between_items() {
    let mut router = ClickRouter::new();
    let receivers: Vec<_> = (0..3)
        .map(|seq_id| {
            let (tx, rx) = mpsc::unbounded_channel();
            router.subscribe(seq_id, tx);
            rx
        })
        .collect();

    let _ = router.route(&ClickRouter::menu_id(1));

    for (seq_id, mut rx) in receivers.into_iter().enumerate() {
        assert_eq!(rx.try_recv().is_ok(), seq_id == 1, "item {}", seq_id);
    }
}
