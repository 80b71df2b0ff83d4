//! Minifier warnings with colored terminal output.
//!
//! Provides deduplication so a document with a thousand broken tags reports
//! each distinct problem once. Used by the tokenizer and the minifier pass to
//! report malformed input that is passed through rather than repaired.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about malformed input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unexpected end of input inside tag at 42");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{YELLOW}[Wombat {component}] ⚠ {message}{RESET}");
    }
}

/// Returns true if the given warning has been emitted since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call before minifying an unrelated document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: clearing the global set would race with any other test
    // checking it.
    #[test]
    fn test_warnings_are_recorded_until_cleared() {
        warn_once("Left", "same message");
        assert!(has_warned("Left", "same message"));
        assert!(!has_warned("Right", "same message"));
        assert!(!has_warned("Left", "never emitted"));

        clear_warnings();
        assert!(!has_warned("Left", "same message"));
    }
}
