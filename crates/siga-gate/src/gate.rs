//! Completion checks, in order: completeness, action plans, signatures.

use serde::{Deserialize, Serialize};
use siga_core::{Catalog, EngineError, ItemStatus, Report, SignerSlot};
use std::fmt;

/// Which signature slots must be populated before completion. The manager
/// requirement varies across the system's revisions, so it is policy, not a
/// fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureRequirement {
    /// Inspector must sign; the manager signature may be applied later.
    InspectorOnly,
    /// Both slots must be signed before the report completes.
    Both,
}

/// Why a report was refused the Draft → Completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnansweredItem,
    MissingActionPlan,
    MissingSignature,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::UnansweredItem => write!(f, "item sem resposta"),
            RejectReason::MissingActionPlan => {
                write!(f, "não conformidade sem plano de ação")
            }
            RejectReason::MissingSignature => write!(f, "assinatura pendente"),
        }
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GateVerdict {
    Ok,
    Rejected {
        reason: RejectReason,
        /// The first offending item in catalog traversal order, when the
        /// failure concerns a specific item.
        item_id: Option<String>,
        /// The unsigned slot, when the failure concerns a signature.
        slot: Option<SignerSlot>,
    },
}

impl GateVerdict {
    fn rejected_item(reason: RejectReason, item_id: &str) -> Self {
        GateVerdict::Rejected {
            reason,
            item_id: Some(item_id.to_string()),
            slot: None,
        }
    }

    fn rejected_slot(slot: SignerSlot) -> Self {
        GateVerdict::Rejected {
            reason: RejectReason::MissingSignature,
            item_id: None,
            slot: Some(slot),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, GateVerdict::Ok)
    }

    /// Convert into the engine error taxonomy; `Ok` becomes `Ok(())`.
    pub fn into_result(self) -> Result<(), EngineError> {
        match self {
            GateVerdict::Ok => Ok(()),
            GateVerdict::Rejected { reason, item_id, slot } => {
                let detail = match slot {
                    Some(slot) => format!("{} ({})", reason, slot),
                    None => reason.to_string(),
                };
                Err(EngineError::Validation { reason: detail, item_id })
            }
        }
    }
}

/// The rule set for the Draft → Completed transition.
#[derive(Debug, Clone, Copy)]
pub struct ValidationGate {
    requirement: SignatureRequirement,
}

impl ValidationGate {
    pub fn new(requirement: SignatureRequirement) -> Self {
        Self { requirement }
    }

    pub fn requirement(&self) -> SignatureRequirement {
        self.requirement
    }

    /// Checks 1–2: completeness and action-plan presence. This is also the
    /// precondition for applying a signature.
    pub fn check_answers(&self, catalog: &Catalog, report: &Report) -> GateVerdict {
        // Completeness first: an item missing from the result set counts as
        // unanswered rather than panicking on a broken aggregate.
        for item in catalog.items() {
            match report.result(&item.id) {
                Some(result) if result.status.is_answered() => {}
                _ => return GateVerdict::rejected_item(RejectReason::UnansweredItem, &item.id),
            }
        }

        for item in catalog.items() {
            if let Some(result) = report.result(&item.id) {
                if let ItemStatus::NonCompliant { plan } = &result.status {
                    if !plan.is_filled() {
                        return GateVerdict::rejected_item(
                            RejectReason::MissingActionPlan,
                            &item.id,
                        );
                    }
                }
            }
        }

        GateVerdict::Ok
    }

    /// The full gate: answers plus the policy-required signatures.
    pub fn can_complete(&self, catalog: &Catalog, report: &Report) -> GateVerdict {
        let answers = self.check_answers(catalog, report);
        if !answers.is_ok() {
            return answers;
        }

        if !report.signatures.is_signed(SignerSlot::Inspector) {
            return GateVerdict::rejected_slot(SignerSlot::Inspector);
        }
        if self.requirement == SignatureRequirement::Both
            && !report.signatures.is_signed(SignerSlot::Manager)
        {
            return GateVerdict::rejected_slot(SignerSlot::Manager);
        }

        GateVerdict::Ok
    }
}
