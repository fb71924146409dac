//! Faultline Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `FaultEvent`, `FrameSnapshot`, `ContextValue`,
//!   `FaultSignature`, `OccurrenceRecord`, `ClientInfo`
//! - **Port definitions** - Traits for adapters: `ILogSink`, `IMailTransport`,
//!   `IOccurrenceStore`, `ICredentialStore`, `IRemoteFilesystem`
//! - **Configuration** - Typed YAML configuration with validation and builder
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.

pub mod config;
pub mod domain;
pub mod ports;
