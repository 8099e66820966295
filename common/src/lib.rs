//! # Sweep Common
//!
//! Shared models for the sweep workspace: scan targets, network prefixes,
//! scan requests, probe outcomes and the error taxonomy.
//! Pure data, no IO.

pub mod config;
pub mod error;
pub mod network;
pub mod scan;
