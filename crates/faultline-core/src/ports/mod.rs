//! Port definitions (trait interfaces for adapters)

pub mod log_sink;
pub mod mail_transport;
pub mod occurrence_store;
pub mod remote_filesystem;

pub use log_sink::ILogSink;
pub use mail_transport::IMailTransport;
pub use occurrence_store::IOccurrenceStore;
pub use remote_filesystem::{
    ICredentialStore, IRemoteFilesystem, IRemoteFsFactory, RemoteFsError,
};
