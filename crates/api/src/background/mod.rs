//! Background tasks.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn` and aborted at shutdown.

pub mod rate_limit_prune;
