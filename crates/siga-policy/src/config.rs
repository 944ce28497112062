//! Engine policy switches.
//!
//! The source system changed its mind across revisions on two points: whether
//! the manager signature is mandatory before completion, and whether a
//! finding's comment and evidence survive a status change away from
//! Não Conforme. Both are explicit configuration here, with presets for each
//! revision's behavior.

use serde::{Deserialize, Serialize};
use siga_gate::SignatureRequirement;

/// What happens to a finding's comment and evidence when its status moves
/// away from NonCompliant. The action plan itself always travels with the
/// NonCompliant variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingRetention {
    /// Clear comment and evidence along with the plan.
    Discard,
    /// Keep comment and evidence for potential reuse.
    Preserve,
}

/// Policy switches governing the report lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginePolicy {
    /// Signature slots required before a report may complete.
    pub signature_requirement: SignatureRequirement,

    /// May a Manager still mutate/sign a Completed report while the manager
    /// signature is missing.
    pub manager_may_amend_completed: bool,

    /// Retention of comment/evidence on a status change away from
    /// NonCompliant.
    pub finding_retention: FindingRetention,
}

impl EnginePolicy {
    /// Both signatures up front, completed reports immutable, findings
    /// discarded on status change.
    pub fn strict() -> Self {
        Self {
            signature_requirement: SignatureRequirement::Both,
            manager_may_amend_completed: false,
            finding_retention: FindingRetention::Discard,
        }
    }

    /// Manager signature deferrable, late manager amendments allowed,
    /// findings preserved for reuse.
    pub fn flexible() -> Self {
        Self {
            signature_requirement: SignatureRequirement::InspectorOnly,
            manager_may_amend_completed: true,
            finding_retention: FindingRetention::Preserve,
        }
    }

    /// Load a policy from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self::strict()
    }
}
