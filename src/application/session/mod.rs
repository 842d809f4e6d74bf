//! Lot session: owned state for one operator session
//!
//! Owns the spot registry plus the two ephemeral flows (pending finish,
//! active move). Everything is mutated through `&mut self` entry points and
//! runs to completion before the next event; the only suspension points
//! are the ledger's store calls. The actor's role is captured at
//! construction and never re-read during the session.

mod occupancy;
mod relocation;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::application::identity::IdentityService;
use crate::application::services::HistoryLedger;
use crate::config::LotConfig;
use crate::domain::actor::{Actor, AuthGateway};
use crate::domain::spot::{Occupancy, SpotId, SpotRegistry, Visit};
use crate::notifications::{LotEvent, SharedEventBus};
use crate::support::errors::DomainResult;

pub use relocation::MoveOutcome;

/// Snapshot taken when the finish flow starts on an occupied spot.
///
/// At most one exists per session; it lives for a single finish→charge
/// round trip and starting another finish flow replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFinish {
    pub spot: SpotId,
    pub visit: Visit,
    pub ended_at: DateTime<Utc>,
    /// Raw duration; may be negative on a clock anomaly, flooring to zero
    /// happens at format time only
    pub duration_ms: i64,
}

/// Active move: while set, spot selection picks the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub source: SpotId,
}

pub struct LotSession {
    actor: Actor,
    registry: SpotRegistry,
    pending_finish: Option<PendingFinish>,
    move_ctx: Option<MoveContext>,
    ledger: Arc<HistoryLedger>,
    events: SharedEventBus,
}

impl LotSession {
    pub fn new(
        config: &LotConfig,
        actor: Actor,
        ledger: Arc<HistoryLedger>,
        events: SharedEventBus,
    ) -> Self {
        Self {
            actor,
            registry: SpotRegistry::new(config),
            pending_finish: None,
            move_ctx: None,
            ledger,
            events,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn registry(&self) -> &SpotRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn pending_finish(&self) -> Option<&PendingFinish> {
        self.pending_finish.as_ref()
    }

    pub fn move_context(&self) -> Option<MoveContext> {
        self.move_ctx
    }

    /// Current record for a spot; `None` means free.
    pub fn spot(&self, spot: SpotId) -> DomainResult<Option<&Occupancy>> {
        self.registry.get(spot)
    }

    fn publish_spot(&self, spot: SpotId) {
        let occupancy = self.registry.get(spot).ok().flatten().cloned();
        self.events.publish(LotEvent::SpotChanged { spot, occupancy });
    }
}

/// Build a session for whoever is currently signed in.
///
/// The actor comes from the auth gateway, the role from the user directory
/// (not from the gateway), resolved exactly once; the role then stays fixed
/// until the session is torn down. `None` when nobody is signed in.
pub async fn start_session(
    gateway: &dyn AuthGateway,
    identity: &IdentityService,
    config: &LotConfig,
    ledger: Arc<HistoryLedger>,
    events: SharedEventBus,
) -> Option<LotSession> {
    let mut actor = gateway.current_actor().await?;
    actor.role = identity
        .resolve_role(&actor.id, &actor.display_name, &actor.email)
        .await;

    info!(
        "Session started for {} as {}",
        actor.visible_name(),
        actor.role.as_str()
    );
    Some(LotSession::new(config, actor, ledger, events))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::Role;
    use crate::infrastructure::auth::StaticAuthGateway;
    use crate::infrastructure::storage::{InMemoryDocumentStore, MemoryHistoryCache};
    use crate::notifications::create_event_bus;

    fn actor() -> Actor {
        Actor {
            id: "u1".into(),
            display_name: "Ana".into(),
            email: "ana@example.com".into(),
            role: Role::Admin, // gateway's idea of the role is not trusted
        }
    }

    #[tokio::test]
    async fn signed_out_yields_no_session() {
        let gateway = StaticAuthGateway::new(None);
        let store = std::sync::Arc::new(InMemoryDocumentStore::new());
        let identity = IdentityService::new(store.clone());
        let events = create_event_bus();
        let ledger = Arc::new(HistoryLedger::new(
            store,
            Arc::new(MemoryHistoryCache::new()),
            events.clone(),
        ));

        let session =
            start_session(&gateway, &identity, &LotConfig::default(), ledger, events).await;
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn role_comes_from_the_directory() {
        let gateway = StaticAuthGateway::new(Some(actor()));
        let store = std::sync::Arc::new(InMemoryDocumentStore::new());
        let identity = IdentityService::new(store.clone());
        let events = create_event_bus();
        let ledger = Arc::new(HistoryLedger::new(
            store,
            Arc::new(MemoryHistoryCache::new()),
            events.clone(),
        ));

        let session = start_session(&gateway, &identity, &LotConfig::default(), ledger, events)
            .await
            .expect("actor is signed in");

        // first sign-in: the directory files the user as viewer regardless
        // of what the gateway claimed
        assert_eq!(session.actor().role, Role::Viewer);
        assert_eq!(session.registry().capacity(), 55);
    }
}
