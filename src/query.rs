//! Pattern queries over a log snapshot.
//!
//! The free functions take an explicit haystack; the `ActionLog` methods of
//! the same name run over the full current log. None of them modify the
//! stored log or their inputs.

use crate::action_log::ActionLog;
use actionlog_core::LogEntry;
use std::collections::BTreeMap;

/// Labelled sequences of action IDs to look for, in order.
pub type Needlestack = BTreeMap<String, Vec<String>>;

/// Entries matched for each fully satisfied label, in match order.
pub type Matches = BTreeMap<String, Vec<LogEntry>>;

struct Cursor<'a> {
    label: &'a str,
    needles: &'a [String],
    pos: usize,
    matched: Vec<LogEntry>,
}

/// Find, for every label, its needle IDs as an ordered subsequence of the
/// haystack.
///
/// A single left-to-right pass advances every label whose next expected ID
/// equals the current entry's ID. Occurrences of a needle before its turn are
/// ignored. Labels that are not fully matched by the end are left out; a label
/// with no needles is always matched, with no entries.
///
/// # Example
///
/// ```ignore
/// let needles = Needlestack::from([
///     ("signup".to_string(), vec!["LOGIN_OPEN".to_string(), "SIGNUP_CALLBACK".to_string()]),
/// ]);
/// let found = find_subset_in_order(&needles, &haystack);
/// ```
pub fn find_subset_in_order(needlestack: &Needlestack, haystack: &[LogEntry]) -> Matches {
    let mut cursors: Vec<Cursor<'_>> = needlestack
        .iter()
        .map(|(label, needles)| Cursor {
            label,
            needles,
            pos: 0,
            matched: Vec::new(),
        })
        .collect();

    for entry in haystack {
        for cursor in cursors.iter_mut() {
            if cursor
                .needles
                .get(cursor.pos)
                .is_some_and(|needle| *needle == entry.id)
            {
                cursor.pos += 1;
                cursor.matched.push(entry.clone());
            }
        }
    }

    cursors
        .into_iter()
        .filter(|cursor| cursor.pos == cursor.needles.len())
        .map(|cursor| (cursor.label.to_string(), cursor.matched))
        .collect()
}

/// Entries from the last occurrence of `action_id` to the end, inclusive.
///
/// Empty if `action_id` never occurs.
pub fn events_since_last_occurrence_of(action_id: &str, haystack: &[LogEntry]) -> Vec<LogEntry> {
    haystack
        .iter()
        .rposition(|entry| entry.id == action_id)
        .map(|i| haystack[i..].to_vec())
        .unwrap_or_default()
}

/// The most recent entry recorded for `action_id`.
pub fn find_latest_occurrence(action_id: &str, haystack: &[LogEntry]) -> Option<LogEntry> {
    haystack
        .iter()
        .rev()
        .find(|entry| entry.id == action_id)
        .cloned()
}

/// Put `entry` at the front of every matched sequence.
///
/// Used to attach shared context, such as the session start, to each result
/// of [`find_subset_in_order`].
pub fn prepend_to_result_sets(sets: &mut Matches, entry: &LogEntry) {
    for matched in sets.values_mut() {
        matched.insert(0, entry.clone());
    }
}

impl ActionLog {
    /// [`find_subset_in_order`] over the full current log.
    pub fn find_subset_in_order(&self, needlestack: &Needlestack) -> Matches {
        find_subset_in_order(needlestack, &self.get_logs())
    }

    /// [`events_since_last_occurrence_of`] over the full current log.
    pub fn events_since_last_occurrence_of(&self, action_id: &str) -> Vec<LogEntry> {
        events_since_last_occurrence_of(action_id, &self.get_logs())
    }

    /// [`find_latest_occurrence`] over the full current log.
    pub fn find_latest_occurrence(&self, action_id: &str) -> Option<LogEntry> {
        find_latest_occurrence(action_id, &self.get_logs())
    }
}
