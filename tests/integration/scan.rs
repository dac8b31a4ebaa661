//! Scan pass behaviour against in-memory collaborators

use chrono::Duration;
use trendscan::models::Signal;
use trendscan::scan::{Scanner, TickerOutcome};
use trendscan::services::CHART_POINTS;
use trendscan::state::DedupState;

use crate::test_utils::{breakout, quiet, today, TestScanBuilder};

#[tokio::test]
async fn signal_is_delivered_and_recorded() {
    let scan = TestScanBuilder::new().ticker("AAPL", breakout(250)).build();
    let scanner = Scanner::new(scan.context.clone());

    let summary = scanner.run(today()).await.unwrap();

    assert_eq!(summary.universe, 1);
    assert_eq!(summary.notified, vec![("AAPL".to_string(), Signal::PriceAboveEma200)]);

    let deliveries = scan.notifier.deliveries.lock().unwrap().clone();
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries[0].caption.starts_with("<b>AAPL</b> - AAPL Corp\n🚀 Price crossed"));
    assert!(deliveries[0].caption.contains("P/E Ratio: <b>21.3</b>"));
    assert!(deliveries[0].caption.contains("Price: $300.00"));
    assert_eq!(
        deliveries[0].image_url.as_deref(),
        Some("https://charts.test/abc.png")
    );

    assert_eq!(
        scan.charts.rendered.lock().unwrap().clone(),
        vec![("AAPL".to_string(), CHART_POINTS)]
    );
    assert!(scan.store.snapshot().notified_on("AAPL", today()));
}

#[tokio::test]
async fn second_pass_on_same_day_is_idempotent() {
    let scan = TestScanBuilder::new().ticker("AAPL", breakout(250)).build();
    let scanner = Scanner::new(scan.context.clone());

    scanner.run(today()).await.unwrap();
    let second = scanner.run(today()).await.unwrap();

    assert_eq!(second.already_notified, 1);
    assert!(second.notified.is_empty());
    assert_eq!(scan.notifier.deliveries.lock().unwrap().len(), 1);
    // the already-notified ticker is not even fetched again
    assert_eq!(scan.history.requested.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn ticker_marked_today_is_skipped_despite_signal() {
    let mut state = DedupState::new();
    state.mark("AAPL", today());

    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .state(state.clone())
        .build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.already_notified, 1);
    assert!(scan.notifier.deliveries.lock().unwrap().is_empty());
    assert_eq!(scan.store.snapshot(), state);
}

#[tokio::test]
async fn ticker_marked_on_an_earlier_day_fires_again() {
    let mut state = DedupState::new();
    state.mark("AAPL", today() - Duration::days(1));

    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .state(state)
        .build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.notified.len(), 1);
    assert_eq!(scan.store.snapshot().last_notified("AAPL"), Some(today()));
}

#[tokio::test]
async fn short_history_is_skipped_without_touching_state() {
    let scan = TestScanBuilder::new().ticker("NEWCO", breakout(200)).build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.insufficient_history, 1);
    assert!(scan.notifier.deliveries.lock().unwrap().is_empty());
    assert!(scan.charts.rendered.lock().unwrap().is_empty());
    assert!(scan.store.snapshot().is_empty());
}

#[tokio::test]
async fn empty_history_is_skipped() {
    let scan = TestScanBuilder::new().ticker("GONE", Vec::new()).build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.insufficient_history, 1);
    assert!(summary.notified.is_empty());
}

#[tokio::test]
async fn quiet_ticker_produces_no_signal() {
    let scan = TestScanBuilder::new().ticker("MSFT", quiet(300)).build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.no_signal, 1);
    assert!(scan.notifier.deliveries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_chart_falls_back_to_text_only() {
    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .without_chart()
        .build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(summary.notified.len(), 1);
    let deliveries = scan.notifier.deliveries.lock().unwrap().clone();
    assert_eq!(deliveries[0].image_url, None);
}

#[tokio::test]
async fn missing_fundamentals_use_placeholders() {
    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .without_fundamentals()
        .build();
    Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    let deliveries = scan.notifier.deliveries.lock().unwrap().clone();
    assert!(deliveries[0].caption.starts_with("<b>AAPL</b> - AAPL\n"));
    assert!(deliveries[0].caption.contains("P/E Ratio: <b>N/A</b>"));
}

#[tokio::test]
async fn failed_delivery_leaves_ticker_unmarked_and_scan_continues() {
    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .ticker("NVDA", breakout(260))
        .failing_delivery("AAPL")
        .build();
    let summary = Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(
        summary.delivery_failed,
        vec![("AAPL".to_string(), Signal::PriceAboveEma200)]
    );
    assert_eq!(
        summary.notified,
        vec![("NVDA".to_string(), Signal::PriceAboveEma200)]
    );

    let state = scan.store.snapshot();
    assert_eq!(state.last_notified("AAPL"), None);
    assert!(state.notified_on("NVDA", today()));
}

#[tokio::test]
async fn state_is_saved_once_per_pass() {
    let scan = TestScanBuilder::new()
        .ticker("AAPL", breakout(250))
        .ticker("MSFT", quiet(300))
        .ticker("NVDA", breakout(260))
        .build();
    Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(*scan.store.saves.lock().unwrap(), 1);
    assert_eq!(scan.store.snapshot().len(), 2);
}

#[tokio::test]
async fn tickers_are_scanned_in_sorted_order() {
    let scan = TestScanBuilder::new()
        .ticker("NVDA", quiet(300))
        .ticker("AAPL", quiet(300))
        .ticker("MSFT", quiet(300))
        .build();
    Scanner::new(scan.context.clone()).run(today()).await.unwrap();

    assert_eq!(
        scan.history.requested.lock().unwrap().clone(),
        vec!["AAPL", "MSFT", "NVDA"]
    );
}

#[tokio::test]
async fn scan_ticker_reports_outcome() {
    let scan = TestScanBuilder::new().ticker("AAPL", breakout(250)).build();
    let scanner = Scanner::new(scan.context.clone());
    let mut state = DedupState::new();

    let first = scanner.scan_ticker("AAPL", today(), &mut state).await.unwrap();
    let second = scanner.scan_ticker("AAPL", today(), &mut state).await.unwrap();

    assert_eq!(first, TickerOutcome::Notified(Signal::PriceAboveEma200));
    assert_eq!(second, TickerOutcome::AlreadyNotified);
}
