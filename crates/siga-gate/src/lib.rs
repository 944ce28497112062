//! SIGA Gate: validação para a transição Draft → Completed
//!
//! The rule set a report must pass before it may leave Draft. Checks run in
//! a fixed order so the most fundamental problem is reported first, and the
//! first failure names the offending item so the caller can navigate there.
//! The gate never blocks Draft saves.

pub mod gate;

pub use gate::{GateVerdict, RejectReason, SignatureRequirement, ValidationGate};
