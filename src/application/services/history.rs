//! History ledger service
//!
//! Dual-backed persistence for completed visits: a remote document store
//! (authoritative when reachable) mirrored by a durable local cache. Reads
//! prefer the remote and fall back to the cache; writes land locally first
//! and a remote failure never rolls them back.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::actor::{Actor, Role};
use crate::domain::history::{HistoryPatch, HistoryRecord};
use crate::infrastructure::storage::{collections, DocumentStore, HistoryCache};
use crate::notifications::{LotEvent, SharedEventBus};
use crate::support::errors::{DomainError, DomainResult};

/// Field the date-scoped query filters on
const DATE_KEY_FIELD: &str = "dateKey";

pub struct HistoryLedger {
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn HistoryCache>,
    events: SharedEventBus,
}

impl HistoryLedger {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn HistoryCache>,
        events: SharedEventBus,
    ) -> Self {
        Self {
            store,
            cache,
            events,
        }
    }

    /// Append a completed visit.
    ///
    /// The local cache always receives the record; the remote write is
    /// attempted afterwards and a failure is logged and swallowed; the
    /// cache stays the record of truth for the running session.
    pub async fn record(&self, record: HistoryRecord) -> DomainResult<()> {
        self.mirror(|records| {
            records.push(record.clone());
            true
        });

        match record.to_document() {
            Ok(document) => {
                if let Err(e) = self
                    .store
                    .set(collections::HISTORY, &record.id, document)
                    .await
                {
                    warn!(
                        "Remote write failed for history record {}, kept locally: {}",
                        record.id, e
                    );
                }
            }
            Err(e) => warn!("Could not serialize history record {}: {}", record.id, e),
        }

        info!(
            "History record {} saved: spot {}, {}",
            record.id, record.spot, record.date_key
        );
        self.events.publish(LotEvent::HistoryAppended { record });
        Ok(())
    }

    /// Records filed under a calendar-date key.
    ///
    /// Remote result set when the store is reachable (the cache is not
    /// merged in); local cache filtered by the same key otherwise. Order is
    /// unspecified, callers re-sort.
    pub async fn query_by_date(&self, date_key: &str) -> DomainResult<Vec<HistoryRecord>> {
        let needle = Value::String(date_key.to_string());
        match self
            .store
            .query_eq(collections::HISTORY, DATE_KEY_FIELD, &needle)
            .await
        {
            Ok(documents) => {
                let mut records = Vec::with_capacity(documents.len());
                for (id, document) in documents {
                    match HistoryRecord::from_document(&id, document) {
                        Ok(record) => records.push(record),
                        Err(e) => warn!("Skipping malformed history document {}: {}", id, e),
                    }
                }
                Ok(records)
            }
            Err(e) => {
                warn!("History query degraded to local cache: {}", e);
                Ok(self
                    .load_cache()
                    .into_iter()
                    .filter(|r| r.date_key == date_key)
                    .collect())
            }
        }
    }

    /// Number of completed visits on a day (history screen summary).
    pub async fn count_for_date(&self, date_key: &str) -> DomainResult<usize> {
        Ok(self.query_by_date(date_key).await?.len())
    }

    /// Edit the mutable fields of a record. Admin only.
    pub async fn update(&self, id: &str, patch: &HistoryPatch, actor: &Actor) -> DomainResult<()> {
        actor.require_role(Role::Admin)?;

        let fields = patch
            .to_fields()
            .map_err(|e| DomainError::StoreWriteFailed(e.to_string()))?;
        self.store.update(collections::HISTORY, id, fields).await?;

        self.mirror(|records| match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                patch.apply(record);
                true
            }
            None => false,
        });

        info!("History record {} updated by {}", id, actor.visible_name());
        self.events.publish(LotEvent::HistoryChanged {
            record_id: id.to_string(),
        });
        Ok(())
    }

    /// Remove a record. Admin only.
    pub async fn delete(&self, id: &str, actor: &Actor) -> DomainResult<()> {
        actor.require_role(Role::Admin)?;

        self.store.delete(collections::HISTORY, id).await?;

        self.mirror(|records| {
            let before = records.len();
            records.retain(|r| r.id != id);
            records.len() != before
        });

        info!("History record {} deleted by {}", id, actor.visible_name());
        self.events.publish(LotEvent::HistoryChanged {
            record_id: id.to_string(),
        });
        Ok(())
    }

    fn load_cache(&self) -> Vec<HistoryRecord> {
        match self.cache.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("Local history cache unreadable: {}", e);
                Vec::new()
            }
        }
    }

    /// Apply a mutation to the cached list and persist it when it changed
    /// anything. Cache failures are logged, never propagated.
    fn mirror(&self, mutate: impl FnOnce(&mut Vec<HistoryRecord>) -> bool) {
        let mut records = self.load_cache();
        if mutate(&mut records) {
            if let Err(e) = self.cache.save(&records) {
                warn!("Local history cache write failed: {}", e);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spot::{SpotId, VehicleClass};
    use crate::infrastructure::storage::{InMemoryDocumentStore, MemoryHistoryCache};
    use crate::notifications::create_event_bus;
    use chrono::{TimeZone, Utc};

    fn actor(role: Role) -> Actor {
        Actor {
            id: "u1".into(),
            display_name: "Ana".into(),
            email: "ana@example.com".into(),
            role,
        }
    }

    fn record(id: &str, date_key: &str) -> HistoryRecord {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        HistoryRecord {
            id: id.into(),
            date_key: date_key.into(),
            spot: SpotId::Regular(12),
            plate: Some("AB123CD".into()),
            vehicle: VehicleClass::Car,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            duration_ms: 3_600_000,
            amount: "5000".into(),
            opened_by_name: "Ana".into(),
            closed_by_name: "Ana".into(),
            created_at: start,
        }
    }

    struct Fixture {
        store: Arc<InMemoryDocumentStore>,
        cache: Arc<MemoryHistoryCache>,
        ledger: HistoryLedger,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryDocumentStore::new());
        let cache = Arc::new(MemoryHistoryCache::new());
        let ledger = HistoryLedger::new(store.clone(), cache.clone(), create_event_bus());
        Fixture {
            store,
            cache,
            ledger,
        }
    }

    #[tokio::test]
    async fn record_lands_in_both_stores() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();

        assert_eq!(fx.cache.load().unwrap().len(), 1);
        assert!(fx.store.get("history", "a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn remote_write_failure_keeps_local_record() {
        let fx = fixture();
        fx.store.set_fail_writes(true);

        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();

        assert_eq!(fx.cache.load().unwrap().len(), 1);
        fx.store.set_fail_writes(false);
        assert!(fx.store.get("history", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_filters_by_date_key() {
        let fx = fixture();
        for (id, day) in [
            ("a", "2024-05-01"),
            ("b", "2024-05-02"),
            ("c", "2024-05-01"),
            ("d", "2024-05-03"),
        ] {
            fx.ledger.record(record(id, day)).await.unwrap();
        }

        let hits = fx.ledger.query_by_date("2024-05-01").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.date_key == "2024-05-01"));
        assert_eq!(fx.ledger.count_for_date("2024-05-02").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unreachable_remote_degrades_to_cache() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();
        fx.ledger.record(record("b", "2024-05-02")).await.unwrap();

        fx.store.set_offline(true);
        let hits = fx.ledger.query_by_date("2024-05-01").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[tokio::test]
    async fn update_requires_admin() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();

        let patch = HistoryPatch {
            plate: None,
            vehicle: VehicleClass::Truck,
            amount: "9000".into(),
        };
        let err = fx
            .ledger
            .update("a", &patch, &actor(Role::Operator))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // Nothing changed anywhere
        let hits = fx.ledger.query_by_date("2024-05-01").await.unwrap();
        assert_eq!(hits[0].amount, "5000");
    }

    #[tokio::test]
    async fn update_mirrors_into_cache() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();

        let patch = HistoryPatch {
            plate: Some("ZZ999".into()),
            vehicle: VehicleClass::Truck,
            amount: "9000".into(),
        };
        fx.ledger
            .update("a", &patch, &actor(Role::Admin))
            .await
            .unwrap();

        let remote = fx.ledger.query_by_date("2024-05-01").await.unwrap();
        assert_eq!(remote[0].amount, "9000");
        assert_eq!(remote[0].vehicle, VehicleClass::Truck);

        let cached = fx.cache.load().unwrap();
        assert_eq!(cached[0].amount, "9000");
        assert_eq!(cached[0].plate.as_deref(), Some("ZZ999"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let fx = fixture();
        let patch = HistoryPatch {
            plate: None,
            vehicle: VehicleClass::Car,
            amount: "1".into(),
        };
        let err = fx
            .ledger
            .update("missing", &patch, &actor(Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_from_both_stores() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();
        fx.ledger.record(record("b", "2024-05-01")).await.unwrap();

        fx.ledger.delete("a", &actor(Role::Admin)).await.unwrap();

        let remote = fx.ledger.query_by_date("2024-05-01").await.unwrap();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].id, "b");

        let cached = fx.cache.load().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "b");
    }

    #[tokio::test]
    async fn delete_requires_admin() {
        let fx = fixture();
        fx.ledger.record(record("a", "2024-05-01")).await.unwrap();

        let err = fx
            .ledger
            .delete("a", &actor(Role::Viewer))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(fx.ledger.count_for_date("2024-05-01").await.unwrap(), 1);
    }
}
