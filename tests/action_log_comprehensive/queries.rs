//! Query Tests
//!
//! Tests for find_subset_in_order, events_since_last_occurrence_of and
//! find_latest_occurrence over explicit and default haystacks.

use crate::*;
use actionlog::{events_since_last_occurrence_of, find_latest_occurrence, find_subset_in_order};

// =============================================================================
// FIND SUBSET IN ORDER
// =============================================================================

#[test]
fn test_find_subset_in_order_funnels() {
    let session = signup_session();
    let search = needlestack(vec![
        ("signup_success", vec!["LOGIN_OPEN", "SIGNUP_CALLBACK"]),
        (
            "signup_resend_success",
            vec!["VALIDATE_PASSWORD_EMPTY", "SIGNUP_CALLBACK"],
        ),
        ("fb_click", vec!["FB_CLICK"]),
        ("signin", vec!["LOGIN_OPEN", "SIGNIN_SUBMIT", "SIGNIN_CALLBACK"]),
    ]);

    let result = find_subset_in_order(&search, &session);

    let signup: Vec<_> = result["signup_success"].iter().map(|e| e.id.as_str()).collect();
    assert_eq!(signup, vec!["LOGIN_OPEN", "SIGNUP_CALLBACK"]);

    let resend: Vec<_> = result["signup_resend_success"]
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(resend, vec!["VALIDATE_PASSWORD_EMPTY", "SIGNUP_CALLBACK"]);

    assert_eq!(result["fb_click"].len(), 1);
    assert_eq!(result["fb_click"][0].id, "FB_CLICK");
    assert!(!result.contains_key("signin"));
    assert_eq!(result.len(), 3);
}

#[test]
fn test_find_subset_in_order_keeps_payloads() {
    let session = signup_session();
    let result = find_subset_in_order(
        &needlestack(vec![("switch", vec!["LOGIN_SWITCH"])]),
        &session,
    );
    assert_eq!(result["switch"][0].optional["action"], json!("signup"));
}

#[test]
fn test_find_subset_in_order_over_current_log() {
    let log = create_log();
    for id in ["open", "noise", "close"] {
        log.log_action(id, None);
    }

    let result = log.find_subset_in_order(&needlestack(vec![("visit", vec!["open", "close"])]));
    assert_eq!(result["visit"].len(), 2);
}

// =============================================================================
// EVENTS SINCE LAST OCCURRENCE
// =============================================================================

#[test]
fn test_events_since_last_occurrence() {
    let session = signup_session();

    let tail = events_since_last_occurrence_of("VALIDATE_LAST_NAME_EMPTY", &session);
    assert_eq!(tail.len(), 3);
    assert_eq!(tail, session[8..].to_vec());

    let submit = events_since_last_occurrence_of("SIGNUP_SUBMIT", &session);
    assert_eq!(submit[0].timestamp, 45);

    assert!(events_since_last_occurrence_of("NEVER_LOGGED", &session).is_empty());
    assert_eq!(session.len(), 11);
}

#[test]
fn test_events_since_last_occurrence_over_current_log() {
    let log = create_log();
    for id in ["a", "b", "a", "c"] {
        log.log_action(id, None);
    }

    let tail: Vec<_> = log
        .events_since_last_occurrence_of("a")
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(tail, vec!["a", "c"]);
}

// =============================================================================
// FIND LATEST OCCURRENCE
// =============================================================================

#[test]
fn test_find_latest_occurrence() {
    let session = signup_session();
    let latest = find_latest_occurrence("SIGNUP_SUBMIT", &session).unwrap();
    assert_eq!(latest.timestamp, 45);
    assert!(find_latest_occurrence("SIGNIN_SUBMIT", &session).is_none());
}

#[test]
fn test_find_latest_occurrence_over_current_log() {
    let log = create_log();
    let mut payload = Payload::new();
    payload.insert("n".to_string(), json!(2));
    log.log_action("a", None);
    log.log_action("a", Some(payload));

    let latest = log.find_latest_occurrence("a").unwrap();
    assert_eq!(latest.optional["n"], json!(2));
}
