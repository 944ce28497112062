//! The Report aggregate: one inspection visit, its answers, signatures and
//! derived scorecard.

use crate::result::ItemResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A construction site under inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Report lifecycle status. Draft reports are mutable; Completed reports are
/// historical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Draft,
    Completed,
}

/// Qualitative band derived from the overall score. Lower bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationBand {
    #[serde(rename = "ÓTIMO")]
    Otimo,
    #[serde(rename = "BOM")]
    Bom,
    #[serde(rename = "REGULAR")]
    Regular,
    #[serde(rename = "RUIM")]
    Ruim,
}

impl EvaluationBand {
    /// ≥90 ÓTIMO, ≥70 BOM, ≥50 REGULAR, otherwise RUIM.
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            EvaluationBand::Otimo
        } else if score >= 70 {
            EvaluationBand::Bom
        } else if score >= 50 {
            EvaluationBand::Regular
        } else {
            EvaluationBand::Ruim
        }
    }
}

impl fmt::Display for EvaluationBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationBand::Otimo => write!(f, "ÓTIMO"),
            EvaluationBand::Bom => write!(f, "BOM"),
            EvaluationBand::Regular => write!(f, "REGULAR"),
            EvaluationBand::Ruim => write!(f, "RUIM"),
        }
    }
}

/// Derived scoring output. Never hand-edited; recomputed by the scoring
/// engine whenever item results change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    /// 0–100 integer
    pub overall_score: u32,
    pub evaluation: EvaluationBand,
    /// Category id → 0–100 integer
    pub category_scores: BTreeMap<String, u32>,
}

/// One of the two sign-off positions on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerSlot {
    /// Responsável Ambiental
    Inspector,
    /// Responsável Engenharia
    Manager,
}

impl fmt::Display for SignerSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignerSlot::Inspector => write!(f, "inspector"),
            SignerSlot::Manager => write!(f, "manager"),
        }
    }
}

/// A populated signature slot: always name plus timestamp, never a partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub signed_at: DateTime<Utc>,
}

/// The two independent signer slots of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub inspector: Option<Signature>,
    pub manager: Option<Signature>,
}

impl SignatureBlock {
    pub fn slot(&self, slot: SignerSlot) -> Option<&Signature> {
        match slot {
            SignerSlot::Inspector => self.inspector.as_ref(),
            SignerSlot::Manager => self.manager.as_ref(),
        }
    }

    pub fn is_signed(&self, slot: SignerSlot) -> bool {
        self.slot(slot).is_some()
    }

    /// Stamp a slot. `Unsigned → Signed` is irreversible; stamping an
    /// already-signed slot is refused.
    pub fn stamp(&mut self, slot: SignerSlot, signature: Signature) -> Result<(), Signature> {
        let target = match slot {
            SignerSlot::Inspector => &mut self.inspector,
            SignerSlot::Manager => &mut self.manager,
        };
        if target.is_some() {
            return Err(signature);
        }
        *target = Some(signature);
        Ok(())
    }
}

/// One inspection visit: answers for every catalog item, two signature
/// slots, and the derived scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub author_name: String,
    pub author_id: String,
    pub status: ReportStatus,
    pub results: Vec<ItemResult>,
    pub signatures: SignatureBlock,
    pub scorecard: Scorecard,
}

impl Report {
    pub fn is_completed(&self) -> bool {
        self.status == ReportStatus::Completed
    }

    pub fn result(&self, item_id: &str) -> Option<&ItemResult> {
        self.results.iter().find(|r| r.item_id == item_id)
    }

    pub fn result_mut(&mut self, item_id: &str) -> Option<&mut ItemResult> {
        self.results.iter_mut().find(|r| r.item_id == item_id)
    }

    /// Open non-conformities (non-compliant, empty action plan) in this
    /// report, in result order.
    pub fn open_non_conformities(&self) -> impl Iterator<Item = &ItemResult> {
        self.results.iter().filter(|r| r.is_open_non_conformity())
    }
}
