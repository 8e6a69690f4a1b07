//! Filter warnings with colored terminal output.
//!
//! Provides deduplication so a document with hundreds of identical unknown
//! tags reports each problem once. Used by the CLI to surface filter reports.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning and report whether it is new.
///
/// Returns `false` when the same component/message pair was already seen
/// since the last [`clear_warnings`].
#[must_use]
pub fn record_warning(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a filter decision (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Filter", "dropped unknown tag <marquee> at byte 12");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record_warning(component, message) {
        eprintln!("{}", warning_line(component, message).yellow());
    }
}

fn warning_line(component: &str, message: &str) -> String {
    format!("[Sieve {component}] ⚠ {message}")
}

/// Clear all recorded warnings (call before filtering a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
