//! Faultline Notify - Exception reporting and notification
//!
//! Provides:
//! - `ExceptionReporter`: Logs rendered reports and emails administrators,
//!   rate-limited per fault signature
//! - `EmergencySchedule`: Time-window based emergency recipient resolution
//! - `register_emergency`: Fan-out emergency mail
//! - `MemoryOccurrenceStore`: In-process occurrence tracking
//! - `FileLogSink`: `faultline.err` / `faultline.log` file channels
//! - `HttpMailer`: HTTP mail relay adapter

pub mod emergency;
pub mod log_sink;
pub mod mailer;
pub mod occurrence;
pub mod reporter;
pub mod schedule;

pub use emergency::register_emergency;
pub use log_sink::FileLogSink;
pub use mailer::HttpMailer;
pub use occurrence::MemoryOccurrenceStore;
pub use reporter::{ExceptionReporter, RegisterOptions};
pub use schedule::{EmergencySchedule, TimeWindow};
