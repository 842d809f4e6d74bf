//! Actor (authenticated user) entities and the authorization guard

use serde::{Deserialize, Serialize};

use crate::support::errors::{DomainError, DomainResult};

/// Role carried by an authenticated actor.
///
/// Ordered by privilege: every operator capability is also granted to
/// admins, which is what the derived `Ord` encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Operator,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Viewer
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Operator => "operator",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(Self::Viewer),
            "operator" => Some(Self::Operator),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Authenticated user performing actions in a session.
///
/// Supplied by the authentication collaborator; the core treats it as
/// read-only context with the role fixed for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    /// Name shown next to records this actor opened or closed.
    /// Falls back to the email when no display name is set.
    pub fn visible_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }

    /// Lightweight reference embedded in occupancy records.
    pub fn reference(&self) -> ActorRef {
        ActorRef {
            id: self.id.clone(),
            display_name: self.visible_name().to_string(),
        }
    }

    /// Central capability check: every mutating entry point calls this
    /// before touching any state.
    pub fn require_role(&self, required: Role) -> DomainResult<()> {
        if self.role >= required {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "{} requires role {}, current role is {}",
                self.visible_name(),
                required.as_str(),
                self.role.as_str()
            )))
        }
    }
}

/// Identity snapshot stored on occupancy records
#[derive(Debug, Clone, PartialEq)]
pub struct ActorRef {
    pub id: String,
    pub display_name: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            id: "u1".into(),
            display_name: "Ana".into(),
            email: "ana@example.com".into(),
            role,
        }
    }

    #[test]
    fn roles_are_ordered_by_privilege() {
        assert!(Role::Viewer < Role::Operator);
        assert!(Role::Operator < Role::Admin);
    }

    #[test]
    fn role_roundtrip() {
        for role in &[Role::Viewer, Role::Operator, Role::Admin] {
            assert_eq!(&Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("root").is_none());
    }

    #[test]
    fn viewer_fails_operator_guard() {
        let err = actor(Role::Viewer).require_role(Role::Operator).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn admin_passes_every_guard() {
        let admin = actor(Role::Admin);
        admin.require_role(Role::Viewer).unwrap();
        admin.require_role(Role::Operator).unwrap();
        admin.require_role(Role::Admin).unwrap();
    }

    #[test]
    fn visible_name_falls_back_to_email() {
        let mut a = actor(Role::Operator);
        a.display_name.clear();
        assert_eq!(a.visible_name(), "ana@example.com");
    }
}
