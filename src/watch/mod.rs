// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Reducing a file tree to its newest modification time ([`detector`]).
//! - Sleeping between scans through an injectable [`Clock`] ([`clock`]).
//! - Waiting until a scan reports something newer than a reference
//!   ([`poller`]).
//!
//! It never uses OS change notifications; every decision comes from
//! re-reading modification times.

pub mod clock;
pub mod detector;
pub mod poller;

pub use clock::{Clock, TokioClock};
pub use detector::{ChangeDetector, Snapshot};
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
