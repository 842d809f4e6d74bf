//! In-memory authentication gateway
//!
//! Stands in for the real authentication collaborator in tests and local
//! development: the actor is set programmatically and changes are fanned
//! out on a broadcast channel.

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::domain::actor::{Actor, AuthGateway};
use crate::support::errors::DomainResult;

pub struct StaticAuthGateway {
    actor: RwLock<Option<Actor>>,
    changes: broadcast::Sender<Option<Actor>>,
}

impl StaticAuthGateway {
    pub fn new(actor: Option<Actor>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            actor: RwLock::new(actor),
            changes,
        }
    }

    /// Replace the signed-in actor and notify subscribers.
    pub async fn set_actor(&self, actor: Option<Actor>) {
        *self.actor.write().await = actor.clone();
        let _ = self.changes.send(actor);
    }
}

#[async_trait]
impl AuthGateway for StaticAuthGateway {
    async fn current_actor(&self) -> Option<Actor> {
        self.actor.read().await.clone()
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.set_actor(None).await;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<Actor>> {
        self.changes.subscribe()
    }
}

// ── Tests ──────────────────────────────────────────────────────
