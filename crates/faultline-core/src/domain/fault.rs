//! Fault events and signatures
//!
//! A `FaultEvent` is the explicit, portable description of one failure:
//! the exception kind and message, the frames the call site chose to capture
//! (innermost first), and optional client context. The `FaultSignature`
//! derived from it identifies a recurring failure site for notification
//! rate limiting.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::{is_secret_name, ContextMap};

/// Placeholder used when a fault has no captured frame.
pub const UNKNOWN_LOCATION: &str = "<unknown>";

// ============================================================================
// Severity
// ============================================================================

/// Log channel selector for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Severe failures, written to the error channel
    Error,
    /// Informational failures, written to the warning channel
    Warning,
}

impl Severity {
    /// File extension used by file-based log sinks (`faultline.err` / `faultline.log`).
    pub fn file_extension(&self) -> &'static str {
        match self {
            Severity::Error => "err",
            Severity::Warning => "log",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// FrameSnapshot
// ============================================================================

/// One captured call frame.
///
/// Frames are constructed deliberately by call sites; there is no runtime
/// stack introspection. `locals` holds the variables the call site considered
/// worth reporting.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Function name
    pub function: String,
    /// Source file path
    pub file: PathBuf,
    /// Line number of the failure point within `file`
    pub line: u32,
    /// Local variables captured at this frame
    pub locals: ContextMap,
}

impl FrameSnapshot {
    /// Creates a frame with an empty locals map.
    pub fn new(function: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
            locals: ContextMap::new(),
        }
    }

    /// Attaches a locals map.
    pub fn with_locals(mut self, locals: ContextMap) -> Self {
        self.locals = locals;
        self
    }

    /// File name without directories, as used in fault signatures.
    pub fn file_basename(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.to_string_lossy().to_string())
    }
}

// ============================================================================
// FaultSignature
// ============================================================================

/// Identity of a distinct recurring failure site: (kind, file, line).
///
/// Used as the key for occurrence records so that the same fault raised from
/// the same place does not re-notify administrators on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultSignature {
    /// Exception kind (e.g. `ValueError`)
    pub kind: String,
    /// Basename of the originating source file
    pub file: String,
    /// Line number within the file
    pub line: u32,
}

impl FaultSignature {
    pub fn new(kind: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            kind: kind.into(),
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for FaultSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.kind, self.file, self.line)
    }
}

// ============================================================================
// ClientInfo
// ============================================================================

/// Key-value dump of request/user context supplied by the caller.
///
/// Rendered as an aligned table; keys matching the secret-name pattern are
/// excluded, and `uri`/`referer` values are wrapped in angle brackets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    entries: BTreeMap<String, String>,
}

impl ClientInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the aligned key-value table.
    ///
    /// Keys are right-aligned to the widest key. Returns a fixed message
    /// when no context is available.
    pub fn render(&self) -> String {
        let visible: Vec<(&String, &String)> = self
            .entries
            .iter()
            .filter(|(key, _)| !is_secret_name(key))
            .collect();

        if visible.is_empty() {
            return "No client information available".to_string();
        }

        let width = visible.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(visible.len());
        for (key, value) in visible {
            if key == "uri" || key == "referer" {
                lines.push(format!("{:>width$}: <{}>", key, value, width = width));
            } else {
                lines.push(format!("{:>width$}: {}", key, value, width = width));
            }
        }
        lines.join("\n")
    }
}

// ============================================================================
// FaultEvent
// ============================================================================

/// A single failure occurrence, ready for diagnostic capture.
///
/// Frames are stored innermost first (raw capture order); the report renderer
/// reverses them so the output reads outermost to innermost.
#[derive(Debug, Clone)]
pub struct FaultEvent {
    /// Exception kind
    pub kind: String,
    /// Exception message
    pub message: String,
    /// Captured frames, innermost first
    pub frames: Vec<FrameSnapshot>,
    /// Optional client/request context
    pub client: Option<ClientInfo>,
    /// When the fault occurred
    pub occurred_at: DateTime<Utc>,
}

impl FaultEvent {
    /// Creates a fault event with no frames yet.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            frames: Vec::new(),
            client: None,
            occurred_at: Utc::now(),
        }
    }

    /// An empty event: no kind, no frames. Renders to the empty string.
    pub fn none() -> Self {
        Self::new("", "")
    }

    /// Appends a captured frame (innermost first).
    pub fn with_frame(mut self, frame: FrameSnapshot) -> Self {
        self.frames.push(frame);
        self
    }

    /// Attaches client context.
    pub fn with_client(mut self, client: ClientInfo) -> Self {
        self.client = Some(client);
        self
    }

    /// True when there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.frames.is_empty()
    }

    /// The innermost captured frame, if any.
    pub fn origin(&self) -> Option<&FrameSnapshot> {
        self.frames.first()
    }

    /// (file basename, line, function) of the origin, with placeholders when
    /// no frame was captured.
    pub fn location(&self) -> (String, u32, String) {
        match self.origin() {
            Some(frame) => (frame.file_basename(), frame.line, frame.function.clone()),
            None => (UNKNOWN_LOCATION.to_string(), 0, UNKNOWN_LOCATION.to_string()),
        }
    }

    /// Fault signature for occurrence tracking.
    pub fn signature(&self) -> FaultSignature {
        let (file, line, _) = self.location();
        FaultSignature::new(self.kind.clone(), file, line)
    }

    /// Timestamp in the report's `YYYY-MM-DD HH:MM:SS` form.
    pub fn timestamp(&self) -> String {
        self.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Captures a single-frame fault event at the caller's source location.
///
/// This is the synthetic-raise entry point: it needs no pre-existing error
/// value, just a kind and message.
#[track_caller]
pub fn synthetic_event(kind: impl Into<String>, message: impl Into<String>) -> FaultEvent {
    let location = std::panic::Location::caller();
    let frame = FrameSnapshot::new(
        UNKNOWN_LOCATION,
        Path::new(location.file()),
        location.line(),
    );
    FaultEvent::new(kind, message).with_frame(frame)
}
