//! Domain entities and value objects
//!
//! Pure business types with no adapter dependencies.

pub mod context;
pub mod errors;
pub mod fault;
pub mod occurrence;

pub use context::{is_secret_name, ContextMap, ContextValue};
pub use errors::DomainError;
pub use fault::{
    synthetic_event, ClientInfo, FaultEvent, FaultSignature, FrameSnapshot, Severity,
    UNKNOWN_LOCATION,
};
pub use occurrence::{AdminNotifyPolicy, OccurrenceRecord};
