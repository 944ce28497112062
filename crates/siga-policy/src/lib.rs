//! SIGA Policy: Authorization, Signatures, and Audit
//!
//! This crate provides the role-gated side of the report lifecycle: a single
//! capability table consulted for every operation, the signature workflow
//! that stamps the two sign-off slots, the engine policy switches for the
//! behaviors that vary across the system's revisions, and an audit trail of
//! every decision.
//!
//! # Architecture
//!
//! ```text
//! Operation → Capability Table → Signature Workflow → Audit Trail
//!                  ↓                     ↓
//!            (role, action)     gate checks + identity
//!                  ↓              re-verification
//!             allow/refuse             ↓
//!                               stamped slot
//! ```

pub mod audit;
pub mod capability;
pub mod config;
pub mod signature;

pub use audit::{AuditEntry, AuditEvent, AuditLog};
pub use capability::{authorize, role_allows, ActionKind};
pub use config::{EnginePolicy, FindingRetention};
pub use signature::SignatureWorkflow;
