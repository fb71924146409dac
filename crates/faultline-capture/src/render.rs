//! Report assembly
//!
//! Produces the full multi-section diagnostic text for one fault event:
//! a one-line summary, the client context dump, and the stack frame section
//! with source snippets and truncated locals. Redaction runs over the fully
//! assembled text as the last step.

use faultline_core::config::ScrubConfig;
use faultline_core::domain::FaultEvent;

use crate::scrub::{apply_redactions, collect_values_to_hide, truncate_rendered};
use crate::snippet::source_snippet;

/// Renders the complete diagnostic report for `event`.
///
/// Returns the empty string for an empty event (no kind, no frames).
/// Frames are emitted outermost to innermost, the reverse of the raw
/// capture order.
pub fn render_report(event: &FaultEvent, scrub: &ScrubConfig) -> String {
    if event.is_empty() {
        return String::new();
    }

    let (file, line, function) = event.location();
    let mut out = String::new();

    // One-line summary
    out.push_str(&format!(
        "* {} -> {}: {} ({}:{}:{})\n",
        event.timestamp(),
        event.kind,
        event.message,
        file,
        line,
        function,
    ));

    // Client context
    out.push_str("\n** Client details\n");
    match &event.client {
        Some(client) => out.push_str(&client.render()),
        None => out.push_str("No client information available"),
    }
    out.push('\n');

    // Stack frames, outermost first
    out.push_str("\n** Stack frame details\n");
    let empty = faultline_core::domain::ContextMap::new();
    let mut hidden = collect_values_to_hide(&empty, &scrub.always_redact);
    for frame in event.frames.iter().rev() {
        out.push('\n');
        out.push_str(&format!(
            "Frame {} in {} at line {}\n",
            frame.function,
            frame.file.display(),
            frame.line,
        ));

        hidden.extend(collect_values_to_hide(&frame.locals, &[]));

        if let Some(snippet) = source_snippet(&frame.file, frame.line) {
            out.push_str(&snippet);
            out.push('\n');
        }

        for (name, value) in frame.locals.snapshot() {
            out.push_str(&format!(
                "\t{:>20} = {}\n",
                name,
                truncate_rendered(&value.rendered(), scrub.truncate_limit),
            ));
        }
    }

    apply_redactions(&out, &hidden, &scrub.placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::domain::{ClientInfo, ContextMap, ContextValue, FrameSnapshot};
    use std::io::Write;

    fn scrub_config() -> ScrubConfig {
        ScrubConfig::default()
    }

    fn basic_event() -> FaultEvent {
        let locals = ContextMap::new();
        locals.insert("x", ContextValue::text(42));
        FaultEvent::new("ValueError", "bad input").with_frame(
            FrameSnapshot::new("parse_query", "/srv/app/query.rs", 12).with_locals(locals),
        )
    }

    #[test]
    fn test_empty_event_renders_empty_string() {
        assert_eq!(render_report(&FaultEvent::none(), &scrub_config()), "");
    }

    #[test]
    fn test_summary_line_contents() {
        let report = render_report(&basic_event(), &scrub_config());
        let summary = report.lines().next().unwrap();

        assert!(summary.starts_with("* "));
        assert!(summary.contains("ValueError"));
        assert!(summary.contains("bad input"));
        assert!(summary.contains("query.rs:12:parse_query"));
    }

    #[test]
    fn test_frame_section_contains_locals() {
        let report = render_report(&basic_event(), &scrub_config());
        assert!(report.contains("** Stack frame details"));
        assert!(report.contains("Frame parse_query in /srv/app/query.rs at line 12"));
        assert!(report.contains("x = 42"));
    }

    #[test]
    fn test_frames_rendered_outermost_first() {
        let event = FaultEvent::new("IOError", "boom")
            .with_frame(FrameSnapshot::new("inner", "/a/inner.rs", 5))
            .with_frame(FrameSnapshot::new("outer", "/a/outer.rs", 9));

        let report = render_report(&event, &scrub_config());
        let outer_pos = report.find("Frame outer").unwrap();
        let inner_pos = report.find("Frame inner").unwrap();
        assert!(outer_pos < inner_pos);
    }

    #[test]
    fn test_client_section_rendered() {
        let event = basic_event().with_client(ClientInfo::new().with("uid", "42"));
        let report = render_report(&event, &scrub_config());
        assert!(report.contains("** Client details"));
        assert!(report.contains("uid: 42"));
    }

    #[test]
    fn test_missing_client_renders_fixed_message() {
        let report = render_report(&basic_event(), &scrub_config());
        assert!(report.contains("No client information available"));
    }

    #[test]
    fn test_secret_local_redacted_everywhere_including_message() {
        let locals = ContextMap::new();
        locals.insert_text("password", "hunter2");
        let event = FaultEvent::new("AuthError", "login failed for hunter2").with_frame(
            FrameSnapshot::new("login", "/srv/app/auth.rs", 33).with_locals(locals),
        );

        let report = render_report(&event, &scrub_config());
        assert!(!report.contains("hunter2"));
        assert!(report.contains("<*****>"));
        // the summary line itself is scrubbed
        assert!(report.lines().next().unwrap().contains("<*****>"));
    }

    #[test]
    fn test_configured_seed_value_redacted() {
        let mut scrub = scrub_config();
        scrub.always_redact = vec!["dbsecret".to_string()];

        let locals = ContextMap::new();
        locals.insert_text("dsn", "postgres://app:dbsecret@db/app");
        let event = FaultEvent::new("DbError", "connect failed").with_frame(
            FrameSnapshot::new("connect", "/srv/app/db.rs", 7).with_locals(locals),
        );

        let report = render_report(&event, &scrub);
        assert!(!report.contains("dbsecret"));
        assert!(report.contains("postgres://app:<*****>@db/app"));
    }

    #[test]
    fn test_long_local_truncated_with_marker() {
        let locals = ContextMap::new();
        locals.insert_text("payload", "z".repeat(700));
        let event = FaultEvent::new("ParseError", "oversized").with_frame(
            FrameSnapshot::new("parse", "/srv/app/parse.rs", 3).with_locals(locals),
        );

        let report = render_report(&event, &scrub_config());
        assert!(report.contains(&format!("{} [...]", "z".repeat(500))));
        assert!(!report.contains(&"z".repeat(501)));
    }

    #[test]
    fn test_snippet_included_when_source_readable() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=10 {
            writeln!(tmp, "fn line_{}() {{}}", i).unwrap();
        }
        tmp.flush().unwrap();

        let event = FaultEvent::new("TestError", "mid-file")
            .with_frame(FrameSnapshot::new("line_5", tmp.path(), 5));

        let report = render_report(&event, &scrub_config());
        assert!(report.contains("---->    5 fn line_5() {}"));
    }

    #[test]
    fn test_unreadable_source_omits_snippet_silently() {
        let event = FaultEvent::new("TestError", "gone")
            .with_frame(FrameSnapshot::new("gone", "/nonexistent/gone.rs", 4));

        let report = render_report(&event, &scrub_config());
        assert!(report.contains("Frame gone in /nonexistent/gone.rs at line 4"));
        assert!(!report.contains("---->"));
    }

    #[test]
    fn test_rendering_failure_marker_survives() {
        let locals = ContextMap::new();
        locals.insert(
            "half_built",
            ContextValue::render_with(|| Err::<String, _>("field not initialised")),
        );
        let event = FaultEvent::new("InitError", "ctor failed").with_frame(
            FrameSnapshot::new("build", "/srv/app/build.rs", 21).with_locals(locals),
        );

        let report = render_report(&event, &scrub_config());
        assert!(report.contains("ERROR: when representing the value: field not initialised"));
    }
}
