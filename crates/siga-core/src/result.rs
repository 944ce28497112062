//! Per-item inspection answers: status, evidence, comment, action plan.

use serde::{Deserialize, Serialize};

/// Resource flags for a corrective action plan (financeiro, mão de obra,
/// administrativo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFlags {
    pub financial: bool,
    pub labor: bool,
    pub administrative: bool,
}

/// Corrective action plan for a non-compliant finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// Ações / provisões. Must be non-empty before the report can complete.
    pub actions: String,
    pub responsible: String,
    pub deadline: Option<chrono::NaiveDate>,
    pub resources: ResourceFlags,
}

impl ActionPlan {
    /// Whether the plan satisfies the completion gate.
    pub fn is_filled(&self) -> bool {
        !self.actions.trim().is_empty()
    }
}

/// Answer status of one checklist item.
///
/// The action plan is carried inside the `NonCompliant` variant, so an
/// orphaned plan (a plan on a compliant item) is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not yet answered. Blocks completion; counts against the score.
    Unanswered,
    /// Conforme
    Compliant,
    /// Não Conforme, with its corrective action plan
    NonCompliant { plan: ActionPlan },
    /// Não Aplicável. Excluded from scoring denominators.
    NotApplicable,
}

impl ItemStatus {
    pub fn is_answered(&self) -> bool {
        !matches!(self, ItemStatus::Unanswered)
    }

    /// Applicable items are included in scoring denominators. Unanswered
    /// counts as applicable (and as non-compliant) until proven otherwise.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, ItemStatus::NotApplicable)
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, ItemStatus::Compliant)
    }

    pub fn plan(&self) -> Option<&ActionPlan> {
        match self {
            ItemStatus::NonCompliant { plan } => Some(plan),
            _ => None,
        }
    }
}

/// Opaque reference to a piece of photographic evidence. The binary itself
/// is owned by the external blob store; an unresolved upload is "pending",
/// never an error of the containing mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EvidenceRef {
    /// Original representation kept locally (upload not attempted or failed)
    Inline { id: String, data: Vec<u8> },
    /// Resolved reference into the blob store
    Stored { id: String, url: String },
    /// Upload in flight
    Pending { id: String },
}

impl EvidenceRef {
    /// Content-addressed id for inline evidence.
    pub fn inline(data: Vec<u8>) -> Self {
        let id = evidence_id(&data);
        EvidenceRef::Inline { id, data }
    }

    pub fn id(&self) -> &str {
        match self {
            EvidenceRef::Inline { id, .. }
            | EvidenceRef::Stored { id, .. }
            | EvidenceRef::Pending { id } => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, EvidenceRef::Stored { .. })
    }
}

/// Stable content hash used as an evidence id.
pub fn evidence_id(data: &[u8]) -> String {
    format!("ev-{}", &blake3::hash(data).to_hex()[..16])
}

/// One answer per catalog item. The set of item ids in a report equals the
/// catalog's item set at creation time and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    pub item_id: String,
    pub status: ItemStatus,
    pub comment: String,
    pub evidence: Vec<EvidenceRef>,
    /// Set once by the carry-forward resolver at report creation; flags a
    /// recurring non-conformity from the previous visit. Never mutated.
    pub previous_non_compliance: bool,
}

impl ItemResult {
    /// Fresh unanswered result for a new report template.
    pub fn unanswered(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: ItemStatus::Unanswered,
            comment: String::new(),
            evidence: Vec::new(),
            previous_non_compliance: false,
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.status.is_applicable()
    }

    pub fn is_compliant(&self) -> bool {
        self.status.is_compliant()
    }

    /// A non-conformity whose action plan is still empty. These show up in
    /// the pending-actions summaries and block completion.
    pub fn is_open_non_conformity(&self) -> bool {
        match &self.status {
            ItemStatus::NonCompliant { plan } => !plan.is_filled(),
            _ => false,
        }
    }
}
