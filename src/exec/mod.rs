// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the user's commands with
//! `tokio::process::Command` and reporting how each one ended.
//!
//! - [`runner`] spawns a single process (script or command line), passes its
//!   output through, and waits for it or kills it on shutdown.
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `RealExecutorBackend` the orchestrator uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
