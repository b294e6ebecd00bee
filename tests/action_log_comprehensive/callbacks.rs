//! Callback Tests
//!
//! Tests for on_log registration, dispatch and failure isolation.

use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_callbacks_fire_per_matching_action() {
    let log = create_log();
    let called = Arc::new(AtomicUsize::new(0));

    for action in ["3", "1"] {
        let called = called.clone();
        log.on_log(action, "test", move |_, _| {
            called.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    for id in ["1", "2", "3", "1"] {
        log.log_action(id, None);
    }
    assert_eq!(called.load(Ordering::SeqCst), 3);
}

#[test]
fn test_callback_sees_log_after_append() {
    let log = create_log();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();

    log.on_log("b", "snapshot", move |_, entries| {
        record
            .lock()
            .push(entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>());
        Ok(())
    });

    log.log_action("a", None);
    log.log_action("b", None);
    assert_eq!(*seen.lock(), vec![vec!["a".to_string(), "b".to_string()]]);
}

#[test]
fn test_failing_callback_does_not_stop_siblings() {
    let log = create_log();
    let called = Arc::new(AtomicUsize::new(0));

    log.on_log("a", "errors", |_, _| Err(anyhow::anyhow!("report failed")));
    log.on_log("a", "panics", |_, _| panic!("callback bug"));
    let counter = called.clone();
    log.on_log("a", "counts", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    log.log_action("a", None);
    assert_eq!(called.load(Ordering::SeqCst), 1);
    assert_eq!(ids(&log), vec!["a"]);
}

#[test]
fn test_callback_can_record_actions() {
    let log = create_log();
    log.on_log("checkout", "follow_up", |log, _| {
        log.log_action("checkout_seen", None);
        Ok(())
    });

    log.log_action("checkout", None);
    assert_eq!(ids(&log), vec!["checkout", "checkout_seen"]);
}

#[test]
fn test_callback_can_register_callbacks() {
    let log = create_log();
    let called = Arc::new(AtomicUsize::new(0));
    let counter = called.clone();

    log.on_log("a", "installer", move |log, _| {
        let counter = counter.clone();
        log.on_log("b", "installed", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        Ok(())
    });

    log.log_action("b", None);
    log.log_action("a", None);
    log.log_action("b", None);
    assert_eq!(called.load(Ordering::SeqCst), 1);
}
