//! Collaborator contracts the core is implemented against.
//!
//! Identity, persistence, and blob storage are owned by the host
//! application; the engine only sees these traits. Evidence upload is the
//! one long-running operation, so its trait is async; everything else is
//! bounded in-memory computation and stays synchronous.

use async_trait::async_trait;
use siga_core::{Actor, CollaboratorError, Confirmation, EvidenceRef, Report};

/// External identity provider. Re-verification gates signature transitions.
pub trait IdentityProvider: Send + Sync {
    fn current_actor(&self) -> Option<Actor>;

    fn reauthenticate(&self, actor: &Actor) -> Result<Confirmation, CollaboratorError>;
}

/// External report persistence. `save_report` is an idempotent upsert keyed
/// by report id.
pub trait ReportStore: Send + Sync {
    fn load_reports(&self, project_id: &str) -> Result<Vec<Report>, CollaboratorError>;

    fn save_report(&self, report: &Report) -> Result<Report, CollaboratorError>;
}

/// External blob store for photographic evidence.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    async fn store_evidence(&self, data: &[u8]) -> Result<EvidenceRef, CollaboratorError>;
}
