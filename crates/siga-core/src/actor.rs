//! Actors and roles. Identity is owned by the external provider; the core
//! only consumes the role for authorization decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an authenticated user, as provisioned by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrador: full access, may sign either slot
    #[serde(rename = "admin")]
    Administrator,
    /// Engenheiro gerente: edits drafts, signs the manager slot
    Manager,
    /// Assistente (meio ambiente): edits drafts, signs the inspector slot
    Assistant,
    /// Visitante: read-only
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Administrator => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Assistant => write!(f, "assistant"),
            Role::Viewer => write!(f, "viewer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub display_name: String,
    pub role: Role,
}

/// Opaque confirmation returned by the identity provider's re-verification,
/// required to stamp a signature slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub actor_id: String,
    pub confirmed_at: DateTime<Utc>,
}

impl Confirmation {
    pub fn covers(&self, actor: &Actor) -> bool {
        self.actor_id == actor.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Administrator).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let parsed: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(parsed, Role::Viewer);
    }

    #[test]
    fn test_confirmation_covers_actor() {
        let actor = Actor {
            id: "user-1".to_string(),
            display_name: "Gediel da Silva".to_string(),
            role: Role::Assistant,
        };
        let confirmation = Confirmation {
            actor_id: "user-1".to_string(),
            confirmed_at: Utc::now(),
        };
        assert!(confirmation.covers(&actor));

        let other = Confirmation {
            actor_id: "user-2".to_string(),
            confirmed_at: Utc::now(),
        };
        assert!(!other.covers(&actor));
    }
}
