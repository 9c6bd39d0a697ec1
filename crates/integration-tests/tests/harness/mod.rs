//! Shared harness for integration tests

pub mod config;
pub mod mock_synthesis;
pub mod pdf;
pub mod server;
#[cfg(unix)]
pub mod transcoder;
