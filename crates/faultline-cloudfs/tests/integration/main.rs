//! Integration tests for faultline-cloudfs
//!
//! Uses wiremock to simulate the remote filesystem API and verifies
//! end-to-end behavior of the HTTP adapter and the connector's root
//! bootstrap flow.

mod common;

mod test_client;
mod test_connector;
