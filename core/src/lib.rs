//! # Sweep Core
//!
//! The scanning engine. Data flows through four stages:
//!
//! * **[`enumerator`]**: turns a [`ScanRequest`](sweep_common::scan::request::ScanRequest)
//!   into an ordered, lazy sequence of targets.
//! * **[`probe`]**: one connection attempt under a deadline, classified into an outcome.
//! * **[`scheduler`]**: fans probes out over a bounded pool of worker slots.
//! * **[`aggregator`]**: collects outcomes in arrival order and hands back enumeration order.
//!
//! [`scanner`] wires the stages together and is the entry point for callers.

pub mod aggregator;
pub mod enumerator;
pub mod network;
pub mod probe;
pub mod scanner;
pub mod scheduler;
