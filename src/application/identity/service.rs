//! User-profile directory — application-layer orchestration
//!
//! Sign-in itself belongs to the authentication collaborator; this service
//! only reads and maintains the profile documents (display name, role) the
//! lot UI needs: role resolution at session start, the profile panel, and
//! the admin user list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::actor::{Actor, Role};
use crate::infrastructure::storage::{collections, Document, DocumentStore};
use crate::support::errors::DomainResult;

/// Stored user profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

pub struct IdentityService {
    store: Arc<dyn DocumentStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Role for a signed-in user.
    ///
    /// A missing profile is created with role viewer (first sign-in); any
    /// store trouble also resolves to viewer, never more privilege than
    /// the directory can vouch for.
    pub async fn resolve_role(&self, id: &str, display_name: &str, email: &str) -> Role {
        match self.store.get(collections::USERS, id).await {
            Ok(Some(profile)) => profile
                .get("role")
                .and_then(Value::as_str)
                .and_then(Role::from_str)
                .unwrap_or_default(),
            Ok(None) => {
                let document: Document = [
                    ("displayName".to_string(), json!(display_name)),
                    ("email".to_string(), json!(email)),
                    ("role".to_string(), json!(Role::Viewer.as_str())),
                    (
                        "createdAt".to_string(),
                        json!(chrono::Utc::now().timestamp_millis()),
                    ),
                ]
                .into_iter()
                .collect();

                if let Err(e) = self.store.set(collections::USERS, id, document).await {
                    warn!("Could not create profile for {}: {}", id, e);
                } else {
                    info!("Created viewer profile for {}", id);
                }
                Role::Viewer
            }
            Err(e) => {
                warn!("Role lookup failed for {}, defaulting to viewer: {}", id, e);
                Role::Viewer
            }
        }
    }

    /// All user profiles, for the admin panel.
    pub async fn list_profiles(&self, actor: &Actor) -> DomainResult<Vec<(String, UserProfile)>> {
        actor.require_role(Role::Admin)?;

        let documents = self.store.list(collections::USERS).await?;
        let mut profiles = Vec::with_capacity(documents.len());
        for (id, document) in documents {
            match serde_json::from_value(Value::Object(document)) {
                Ok(profile) => profiles.push((id, profile)),
                Err(e) => warn!("Skipping malformed user profile {}: {}", id, e),
            }
        }
        Ok(profiles)
    }

    /// Admin edit of another user's name and role.
    pub async fn update_profile(
        &self,
        id: &str,
        display_name: &str,
        role: Role,
        actor: &Actor,
    ) -> DomainResult<()> {
        actor.require_role(Role::Admin)?;

        let fields: Document = [
            ("displayName".to_string(), json!(display_name)),
            ("role".to_string(), json!(role.as_str())),
        ]
        .into_iter()
        .collect();

        self.store.update(collections::USERS, id, fields).await?;
        info!(
            "Profile {} updated by {}: role={}",
            id,
            actor.visible_name(),
            role.as_str()
        );
        Ok(())
    }

    /// Update the caller's own display name.
    pub async fn update_own_name(&self, actor: &Actor, new_name: &str) -> DomainResult<()> {
        let fields: Document = [("displayName".to_string(), json!(new_name))]
            .into_iter()
            .collect();
        self.store.update(collections::USERS, &actor.id, fields).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
