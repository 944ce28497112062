//! SIGA Engine: ciclo de vida do relatório de inspeção
//!
//! Orchestrates the catalog, scoring engine, validation gate, and signature
//! workflow around a single Report aggregate, and defines the collaborator
//! contracts (identity, persistence, blob store) the host application plugs
//! in. One editing session mutates a given report at a time; scoring is
//! recomputed synchronously on every mutation.

pub mod collaborators;
pub mod controller;
pub mod summary;
pub mod template;

pub use collaborators::{EvidenceStore, IdentityProvider, ReportStore};
pub use controller::{ItemUpdate, ReportController};
pub use summary::{
    monthly_trend, pending_actions, project_summary, status_distribution, PendingAction,
    ProjectSummary, StatusDistribution,
};
pub use template::build_template;
