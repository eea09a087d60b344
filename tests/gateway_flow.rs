//! End-to-end submission flow against a recording transport and a real
//! on-disk store.

use serenade::reply::mock::MockTransport;
use serenade::{ReplyGateway, ReplyStore, SubmitOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn reply_round_trip_persists_delivers_and_acknowledges() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReplyStore::open(&dir.path().join("serenade.db")).unwrap();

    let transport = MockTransport::new();
    let deliveries = transport.deliveries_handle();
    let acks = Arc::new(AtomicUsize::new(0));
    let counter = acks.clone();
    let gateway = ReplyGateway::new(transport, store.clone()).with_ack(move |text| {
        assert_eq!(text, "Hello");
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let outcome = gateway.submit("Hello").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(acks.load(Ordering::SeqCst), 1);

    let sent = deliveries.lock().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "Hello");

    // The backup survives a process restart.
    drop(gateway);
    let reopened = ReplyStore::open(&dir.path().join("serenade.db")).unwrap();
    assert_eq!(reopened.reply().unwrap(), Some("Hello".to_string()));
    let stamp = reopened.reply_timestamp().unwrap().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
}

#[tokio::test]
async fn failed_delivery_still_leaves_a_durable_backup() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReplyStore::open(&dir.path().join("serenade.db")).unwrap();

    let gateway = ReplyGateway::new(MockTransport::failing(), store.clone());
    let err = gateway.submit("don't lose me").await.unwrap_err();
    assert!(err.to_string().contains("deliver"));

    assert_eq!(store.reply().unwrap(), Some("don't lose me".to_string()));
}

#[tokio::test]
async fn empty_submission_touches_nothing() {
    let store = ReplyStore::in_memory().unwrap();
    let transport = MockTransport::new();
    let deliveries = transport.deliveries_handle();
    let gateway = ReplyGateway::new(transport, store.clone());

    let outcome = gateway.submit("  \n  ").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert!(deliveries.lock().is_empty());
    assert_eq!(store.reply().unwrap(), None);
    assert_eq!(store.reply_timestamp().unwrap(), None);
}
