//! History Flush Tests
//!
//! Tests for log_history_and_mark: the strict threshold, forced flushes,
//! persistent marks and sink failures.

use crate::*;

#[test]
fn test_flush_marks_and_reports_new_entries() {
    let (log, flushed) = create_log_with_sink();
    for id in ["a", "b", "c", "d"] {
        log.log_action(id, None);
    }

    let outcome = log.log_history_and_mark(false).unwrap();
    assert_eq!(outcome, FlushOutcome::Flushed { count: 4 });

    let logs = log.get_logs();
    assert!(logs.iter().all(LogEntry::is_marked));

    let batches = flushed.lock();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), logs.len());
    assert_eq!(batches[0][0].id, "a");
    assert_eq!(batches[0][3].id, "d");
}

#[test]
fn test_threshold_is_strictly_greater() {
    let (log, flushed) = create_log_with_sink();
    log.log_action("a", None);
    log.log_action("b", None);

    assert_eq!(
        log.log_history_and_mark(false).unwrap(),
        FlushOutcome::Pending { count: 2 }
    );
    assert!(flushed.lock().is_empty());
    assert!(log.get_logs().iter().all(|e| !e.is_marked()));

    log.log_action("c", None);
    assert_eq!(
        log.log_history_and_mark(false).unwrap(),
        FlushOutcome::Flushed { count: 3 }
    );

    let ids: Vec<_> = flushed.lock()[0].iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_only_new_entries_are_reconsidered() {
    let (log, flushed) = create_log_with_sink();
    for id in ["a", "b", "c", "d"] {
        log.log_action(id, None);
    }
    log.log_history_and_mark(false).unwrap();

    log.log_action("e", None);
    assert_eq!(
        log.log_history_and_mark(false).unwrap(),
        FlushOutcome::Pending { count: 1 }
    );
    assert_eq!(flushed.lock().len(), 1);

    // "a" was evicted by "e"; the newest entry is the only unmarked one.
    let logs = log.get_logs();
    assert_eq!(logs.len(), 4);
    assert!(!logs[3].is_marked());
    assert!(logs[..3].iter().all(LogEntry::is_marked));
}

#[test]
fn test_force_flushes_below_threshold() {
    let (log, flushed) = create_log_with_sink();
    log.log_action("a", None);

    assert_eq!(
        log.log_history_and_mark(true).unwrap(),
        FlushOutcome::Flushed { count: 1 }
    );
    assert!(log.get_logs()[0].is_marked());

    let batches = flushed.lock();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0][0].id, "a");
}

#[test]
fn test_marks_survive_sink_failure() {
    let log = ActionLog::builder()
        .history_min_buffer(0)
        .flush_sink(|_: &[LogEntry]| -> anyhow::Result<()> {
            anyhow::bail!("collector unavailable")
        })
        .build()
        .unwrap();
    log.log_action("a", None);

    let err = log.log_history_and_mark(false).unwrap_err();
    assert!(err.is_sink());
    assert!(log.get_logs()[0].is_marked());
}

#[test]
fn test_sink_can_record_actions() {
    let storage = Arc::new(MemoryStorage::new());
    let recorder = Arc::new(create_log_over(storage.clone()));
    let flusher = ActionLog::builder()
        .storage(storage)
        .history_min_buffer(0)
        .flush_sink({
            let recorder = recorder.clone();
            move |entries: &[LogEntry]| -> anyhow::Result<()> {
                let mut payload = Payload::new();
                payload.insert("count".to_string(), json!(entries.len()));
                recorder.log_action("HISTORY_FLUSHED", Some(payload));
                Ok(())
            }
        })
        .build()
        .unwrap();

    recorder.log_action("a", None);
    flusher.log_history_and_mark(false).unwrap();

    let logs = flusher.get_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].is_marked());
    assert_eq!(logs[1].id, "HISTORY_FLUSHED");
    assert!(!logs[1].is_marked());
}
