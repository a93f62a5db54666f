//! Tracing initialization
//!
//! One subscriber is installed per process, before the storage client and router are built.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry};
