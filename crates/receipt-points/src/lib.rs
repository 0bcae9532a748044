//! Loyalty points scoring for purchase receipts.
//!
//! Receipts are validated, scored under a fixed rule set, and kept in an
//! identifier-keyed store so the score can be looked up later.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
