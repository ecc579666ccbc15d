//! Cross-repository progression orchestration.
//!
//! Handlers stay thin; the multi-table read-evaluate-write sequences live
//! here. Everything in this module relies on store-level unique constraints
//! rather than in-process locks, so concurrent evaluations for the same
//! user are safe.

pub mod module_gate;
