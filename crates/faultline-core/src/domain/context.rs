//! Capture-context value tree
//!
//! Diagnostic reports do not inspect live call frames (that is not portable
//! and not possible in safe Rust). Instead, call sites construct an explicit
//! context: an ordered mapping of variable name to an already-rendered value,
//! where values may themselves be nested maps. Maps are reference-counted so
//! they can be shared between frames and may even be self-referential; the
//! Arc pointer doubles as the identity used for cycle detection.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// A rendered value inside a capture context.
///
/// `Text` holds the final string form of a variable. `Map` holds a nested
/// mapping that secret scanning and rendering descend into.
#[derive(Debug, Clone)]
pub enum ContextValue {
    /// A variable rendered to its final string form
    Text(String),
    /// A nested mapping of name to value
    Map(ContextMap),
}

impl ContextValue {
    /// Builds a `Text` value from anything displayable.
    pub fn text(value: impl std::fmt::Display) -> Self {
        ContextValue::Text(value.to_string())
    }

    /// Builds a `Text` value from a fallible rendering.
    ///
    /// When the closure fails, the error is folded into an inline marker so
    /// that a single unrepresentable variable never aborts a whole report.
    pub fn render_with<E: std::fmt::Display>(
        render: impl FnOnce() -> Result<String, E>,
    ) -> Self {
        match render() {
            Ok(text) => ContextValue::Text(text),
            Err(err) => {
                ContextValue::Text(format!("ERROR: when representing the value: {}", err))
            }
        }
    }

    /// Renders this value to a single string.
    ///
    /// Nested maps are rendered in `{key = value, ...}` form. A map that is
    /// reached again while it is still being rendered (a true cycle) is
    /// replaced by a `<cycle>` marker; shared non-cyclic maps render fully.
    pub fn rendered(&self) -> String {
        let mut in_progress = Vec::new();
        self.render_inner(&mut in_progress)
    }

    fn render_inner(&self, in_progress: &mut Vec<usize>) -> String {
        match self {
            ContextValue::Text(text) => text.clone(),
            ContextValue::Map(map) => {
                let identity = map.identity();
                if in_progress.contains(&identity) {
                    return "<cycle>".to_string();
                }
                in_progress.push(identity);
                let mut parts = Vec::new();
                for (name, value) in map.snapshot() {
                    parts.push(format!("{} = {}", name, value.render_inner(in_progress)));
                }
                in_progress.pop();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}

/// A shared, ordered mapping of variable name to [`ContextValue`].
///
/// Cloning a `ContextMap` clones the handle, not the contents; two clones
/// share the same identity.
#[derive(Debug, Clone, Default)]
pub struct ContextMap {
    inner: Arc<RwLock<BTreeMap<String, ContextValue>>>,
}

impl ContextMap {
    /// Creates an empty context map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `name`, replacing any previous entry.
    pub fn insert(&self, name: impl Into<String>, value: ContextValue) {
        self.inner
            .write()
            .expect("context map lock poisoned")
            .insert(name.into(), value);
    }

    /// Convenience: insert a displayable value as rendered text.
    pub fn insert_text(&self, name: impl Into<String>, value: impl std::fmt::Display) {
        self.insert(name, ContextValue::text(value));
    }

    /// Returns a sorted copy of the entries.
    pub fn snapshot(&self) -> Vec<(String, ContextValue)> {
        self.inner
            .read()
            .expect("context map lock poisoned")
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().expect("context map lock poisoned").len()
    }

    /// Returns true when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stable identity of the underlying allocation.
    ///
    /// Used as the visited-set key when traversing nested maps, so that
    /// self-referential structures terminate.
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

/// Returns true when a variable name looks like it holds a secret.
///
/// Matches the name patterns `pwd`, `pass` and `p_pw` case-insensitively,
/// anywhere in the name.
pub fn is_secret_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("pwd") || lower.contains("pass") || lower.contains("p_pw")
}
