//! Secret scanning and redaction
//!
//! Builds the redaction set for a report by walking capture contexts with an
//! explicit worklist and a visited set keyed on map identity, then replaces
//! every collected value in the assembled report text.

use std::collections::{BTreeSet, HashSet};

use faultline_core::domain::{is_secret_name, ContextMap, ContextValue};

/// Marker appended to a truncated variable rendering.
const TRUNCATION_MARKER: &str = " [...]";

/// Collects all rendered values that must be hidden from a report.
///
/// A value contributes when its *name* matches the secret pattern
/// (`pwd`/`pass`/`p_pw`, case-insensitive). Nested maps are descended into
/// via a worklist; the visited set on map identity guarantees termination on
/// self-referential structures. `seed` values (e.g. the database password
/// from configuration) are always included.
///
/// The empty string is never part of the result: redacting it would insert
/// the placeholder between every pair of characters of unrelated output.
pub fn collect_values_to_hide(locals: &ContextMap, seed: &[String]) -> BTreeSet<String> {
    let mut hidden: BTreeSet<String> = seed.iter().cloned().collect();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut worklist: Vec<ContextMap> = vec![locals.clone()];

    while let Some(map) = worklist.pop() {
        if !visited.insert(map.identity()) {
            continue;
        }
        for (name, value) in map.snapshot() {
            if is_secret_name(&name) {
                hidden.insert(value.rendered());
            }
            if let ContextValue::Map(inner) = value {
                worklist.push(inner);
            }
        }
    }

    hidden.remove("");
    hidden
}

/// Replaces every value in `hidden` with `placeholder`, everywhere in `text`.
///
/// This is deliberately a plain global substring replacement, not anchored
/// redaction: a short secret value will also hit unrelated text that happens
/// to contain it, and secrets appearing in transformed form are missed. The
/// semantics are kept for byte-compatibility with existing report logs.
pub fn apply_redactions(
    text: &str,
    hidden: &BTreeSet<String>,
    placeholder: &str,
) -> String {
    let mut result = text.to_string();
    for value in hidden {
        result = result.replace(value, placeholder);
    }
    result
}

/// Clamps a rendered variable to at most `limit` characters.
///
/// When the value is longer, the output is exactly `limit` characters
/// followed by the ` [...]` marker.
pub fn truncate_rendered(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(limit).collect();
        out.push_str(TRUNCATION_MARKER);
        out
    }
}
