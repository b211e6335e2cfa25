//! Integration tests for the search debouncer, driven by a paused clock.

use std::time::Duration;

use leadgrid_lib::debounce::DEFAULT_SEARCH_DEBOUNCE;
use leadgrid_lib::debounce::Debouncer;
use leadgrid_lib::model::Record;
use leadgrid_lib::table::Column;
use leadgrid_lib::table::TableConfig;
use leadgrid_lib::table::TableController;

#[tokio::test(start_paused = true)]
async fn test_latest_value_wins_after_quiet_period() {
    let mut debouncer = Debouncer::new(Duration::from_millis(300));

    debouncer.push("j");
    tokio::time::advance(Duration::from_millis(200)).await;
    debouncer.push("ja");
    tokio::time::advance(Duration::from_millis(200)).await;
    debouncer.push("jane");

    // 400ms since the first keystroke, but only 0ms since the last.
    assert_eq!(debouncer.take_ready(), None);

    tokio::time::advance(Duration::from_millis(299)).await;
    assert_eq!(debouncer.take_ready(), None);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(debouncer.take_ready(), Some("jane"));
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.take_ready(), None);
}

#[tokio::test(start_paused = true)]
async fn test_settled_waits_for_deadline() {
    let mut debouncer = Debouncer::default();
    assert_eq!(debouncer.delay(), DEFAULT_SEARCH_DEBOUNCE);

    let start = tokio::time::Instant::now();
    debouncer.push(42);
    assert_eq!(debouncer.deadline(), Some(start + DEFAULT_SEARCH_DEBOUNCE));

    assert_eq!(debouncer.settled().await, Some(42));
    assert!(start.elapsed() >= DEFAULT_SEARCH_DEBOUNCE);
    assert_eq!(debouncer.settled().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() {
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    debouncer.push("draft");
    assert_eq!(debouncer.cancel(), Some("draft"));

    tokio::time::advance(Duration::from_millis(100)).await;
    assert_eq!(debouncer.take_ready(), None);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_drives_table() {
    let rows: Vec<Record> = (1..=30)
        .map(|i| Record::new(i).set("name", format!("User {i}")))
        .collect();
    let columns = vec![Column::new("name", "Name").searchable()];
    let config = TableConfig::default().with_search_debounce(Duration::from_millis(500));
    let mut debouncer = Debouncer::new(config.search_debounce());
    let mut table = TableController::new(rows, columns, config).unwrap();

    for typed in ["u", "us", "user 2"] {
        debouncer.push(typed.to_string());
        tokio::time::advance(Duration::from_millis(100)).await;
        if let Some(query) = debouncer.take_ready() {
            table.set_search(query);
        }
    }
    assert_eq!(table.total_count(), 30);

    if let Some(query) = debouncer.settled().await {
        table.set_search(query);
    }
    // "User 2" and "User 20" through "User 29".
    assert_eq!(table.total_count(), 11);
}
