//! The authorization capability table.
//!
//! One table keyed by (role, action), consulted by the lifecycle controller
//! and the signature workflow. No role conditionals anywhere else.

use serde::{Deserialize, Serialize};
use siga_core::{Actor, EngineError, Role, SignerSlot};
use std::fmt;

/// Every operation a role can be granted or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ViewReports,
    CreateReport,
    EditDraft,
    /// Mutate or sign a Completed report that is still missing the manager
    /// signature. Only honored when the engine policy allows it.
    AmendCompleted,
    SignInspector,
    SignManager,
}

impl ActionKind {
    pub fn for_slot(slot: SignerSlot) -> Self {
        match slot {
            SignerSlot::Inspector => ActionKind::SignInspector,
            SignerSlot::Manager => ActionKind::SignManager,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ActionKind::ViewReports => "view_reports",
            ActionKind::CreateReport => "create_report",
            ActionKind::EditDraft => "edit_draft",
            ActionKind::AmendCompleted => "amend_completed",
            ActionKind::SignInspector => "sign_inspector",
            ActionKind::SignManager => "sign_manager",
        };
        write!(f, "{}", name)
    }
}

/// The capability table. Administrators hold every capability; viewers only
/// read.
pub fn role_allows(role: Role, action: ActionKind) -> bool {
    use ActionKind::*;
    use Role::*;

    match (role, action) {
        (_, ViewReports) => true,
        (Administrator, _) => true,
        (Viewer, _) => false,

        (Manager | Assistant, CreateReport | EditDraft) => true,
        (Manager, AmendCompleted) => true,
        (Assistant, AmendCompleted) => false,

        // Inspector slot: environmental assistant. Manager slot: engineer.
        (Assistant, SignInspector) => true,
        (Assistant, SignManager) => false,
        (Manager, SignManager) => true,
        (Manager, SignInspector) => false,
    }
}

/// Check an actor against the table, producing the authorization error the
/// operation propagates on refusal.
pub fn authorize(actor: &Actor, action: ActionKind) -> Result<(), EngineError> {
    if role_allows(actor.role, action) {
        Ok(())
    } else {
        Err(EngineError::authorization(format!("{} may not {}", actor.role, action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            id: format!("user-{}", role),
            display_name: "Teste".to_string(),
            role,
        }
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(role_allows(Role::Viewer, ActionKind::ViewReports));
        assert!(!role_allows(Role::Viewer, ActionKind::EditDraft));
        assert!(!role_allows(Role::Viewer, ActionKind::CreateReport));
        assert!(!role_allows(Role::Viewer, ActionKind::SignInspector));
        assert!(!role_allows(Role::Viewer, ActionKind::SignManager));
    }

    #[test]
    fn test_administrator_signs_either_slot() {
        assert!(role_allows(Role::Administrator, ActionKind::SignInspector));
        assert!(role_allows(Role::Administrator, ActionKind::SignManager));
        assert!(role_allows(Role::Administrator, ActionKind::AmendCompleted));
    }

    #[test]
    fn test_slots_are_role_gated() {
        assert!(role_allows(Role::Assistant, ActionKind::SignInspector));
        assert!(!role_allows(Role::Assistant, ActionKind::SignManager));
        assert!(role_allows(Role::Manager, ActionKind::SignManager));
        assert!(!role_allows(Role::Manager, ActionKind::SignInspector));
    }

    #[test]
    fn test_authorize_error_names_role_and_action() {
        let err = authorize(&actor(Role::Viewer), ActionKind::EditDraft).unwrap_err();
        assert_eq!(err.to_string(), "AUTH/viewer may not edit_draft");
        assert!(authorize(&actor(Role::Assistant), ActionKind::EditDraft).is_ok());
    }
}
