//! Process-wide panic capture
//!
//! Registers a diagnostic sink once at process start instead of patching a
//! global display hook at call time. Panics are converted into fault events
//! and handed to the sink; the previously installed panic hook is chained so
//! default stderr behavior is preserved.

use std::path::Path;
use std::sync::Arc;

use faultline_core::domain::{FaultEvent, FrameSnapshot, UNKNOWN_LOCATION};

/// Receiver for fault events produced outside the normal reporting path
/// (currently: panics).
pub trait DiagnosticSink: Send + Sync {
    /// Handles one fault event. Must not panic.
    fn submit(&self, event: &FaultEvent);
}

/// Builds the fault event for a panic at `file`:`line` with `message`.
pub fn panic_event(message: &str, file: &str, line: u32) -> FaultEvent {
    FaultEvent::new("Panic", message)
        .with_frame(FrameSnapshot::new(UNKNOWN_LOCATION, Path::new(file), line))
}

/// Installs a panic hook that feeds panics into `sink`.
///
/// Chains with the existing panic hook so default behavior (stderr output)
/// is preserved. Call once at process start.
pub fn install_panic_capture(sink: Arc<dyn DiagnosticSink>) {
    tracing::info!("Installing panic capture hook");
    let previous_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        let event = match panic_info.location() {
            Some(location) => panic_event(&message, location.file(), location.line()),
            None => panic_event(&message, UNKNOWN_LOCATION, 0),
        };

        sink.submit(&event);

        // Call the previous panic hook
        previous_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_event_shape() {
        let event = panic_event("index out of bounds", "src/buffer.rs", 42);
        assert_eq!(event.kind, "Panic");
        assert_eq!(event.message, "index out of bounds");

        let sig = event.signature();
        assert_eq!(sig.file, "buffer.rs");
        assert_eq!(sig.line, 42);
    }

    #[test]
    fn test_panic_event_without_location() {
        let event = panic_event("mystery", UNKNOWN_LOCATION, 0);
        assert_eq!(event.signature().line, 0);
    }

    #[test]
    fn test_installed_hook_captures_panics() {
        use std::sync::Mutex;

        struct Recorder(Mutex<Vec<FaultEvent>>);

        impl DiagnosticSink for Recorder {
            fn submit(&self, event: &FaultEvent) {
                self.0.lock().unwrap().push(event.clone());
            }
        }

        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        install_panic_capture(recorder.clone());

        let result = std::panic::catch_unwind(|| panic!("captured panic"));
        assert!(result.is_err());

        let events = recorder.0.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "Panic");
        assert_eq!(events[0].message, "captured panic");
        assert_eq!(events[0].signature().file, "hook.rs");
    }
}
