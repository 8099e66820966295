//! End-to-end scenarios for the sweep engine.
//!
//! Everything runs in-process: [`harness::ScriptedNetwork`] stands in for a
//! network whose hosts behave exactly as scripted, and loopback listeners cover
//! the real TCP path.

#[cfg(test)]
mod harness;
