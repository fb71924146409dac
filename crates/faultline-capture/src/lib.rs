//! Faultline Capture - Diagnostic report generation
//!
//! Provides:
//! - `render_report`: Full secret-scrubbed text report for a fault event
//! - `collect_values_to_hide` / `apply_redactions`: Secret scanning over
//!   nested capture contexts with cycle-safe traversal
//! - `source_snippet`: Source context windows around the failure line
//! - `install_panic_capture`: Process-wide panic-hook registration
//! - `ReportArchive`: File-based archive of rendered reports

pub mod archive;
pub mod hook;
pub mod render;
pub mod scrub;
pub mod snippet;

pub use archive::{ArchiveEntry, ArchivedReport, ReportArchive};
pub use hook::{install_panic_capture, DiagnosticSink};
pub use render::render_report;
pub use scrub::{apply_redactions, collect_values_to_hide, truncate_rendered};
pub use snippet::source_snippet;
