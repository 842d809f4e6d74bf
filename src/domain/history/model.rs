//! History record entity
//!
//! One record per completed visit. Serialized field names and epoch-ms
//! timestamps match the documents the durable store already holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::spot::{SpotId, VehicleClass};

/// Durable record of one completed visit.
///
/// Owned by the history ledger; timestamps and spot are immutable after
/// creation, only plate, vehicle class and amount may be edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(default)]
    pub id: String,
    pub date_key: String,
    #[serde(rename = "spotLabel")]
    pub spot: SpotId,
    pub plate: Option<String>,
    pub vehicle: VehicleClass,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    pub duration_ms: i64,
    /// Free-form charge amount as entered by the operator
    pub amount: String,
    pub opened_by_name: String,
    pub closed_by_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Store document for this record. The id travels as the document key,
    /// not as a field.
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(mut map) => {
                map.remove("id");
                Ok(map)
            }
            _ => unreachable!("struct serializes to an object"),
        }
    }

    /// Rebuild a record from a store document and its key.
    pub fn from_document(
        id: &str,
        document: Map<String, Value>,
    ) -> Result<Self, serde_json::Error> {
        let mut record: Self = serde_json::from_value(Value::Object(document))?;
        record.id = id.to_string();
        Ok(record)
    }
}

/// Editable subset of a history record (admin edit flow)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPatch {
    pub plate: Option<String>,
    pub vehicle: VehicleClass,
    pub amount: String,
}

impl HistoryPatch {
    pub fn apply(&self, record: &mut HistoryRecord) {
        record.plate = self.plate.clone();
        record.vehicle = self.vehicle;
        record.amount = self.amount.clone();
    }

    /// Field map for a partial store update.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => unreachable!("struct serializes to an object"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> HistoryRecord {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        HistoryRecord {
            id: "rec-1".into(),
            date_key: "2024-05-01".into(),
            spot: SpotId::Regular(12),
            plate: Some("AB123CD".into()),
            vehicle: VehicleClass::Car,
            start_time: start,
            end_time: end,
            duration_ms: 90 * 60_000,
            amount: "5000".into(),
            opened_by_name: "Ana".into(),
            closed_by_name: "Luis".into(),
            created_at: end,
        }
    }

    #[test]
    fn document_roundtrip() {
        let record = sample_record();
        let doc = record.to_document().unwrap();
        assert!(doc.get("id").is_none());
        assert_eq!(doc.get("dateKey").unwrap(), "2024-05-01");
        assert_eq!(doc.get("spotLabel").unwrap(), "12");
        assert_eq!(doc.get("vehicle").unwrap(), "car");
        assert_eq!(
            doc.get("startTime").unwrap().as_i64(),
            Some(record.start_time.timestamp_millis())
        );

        let rebuilt = HistoryRecord::from_document("rec-1", doc).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let mut doc = sample_record().to_document().unwrap();
        doc.insert("vehicle".into(), Value::String("boat".into()));
        assert!(HistoryRecord::from_document("rec-1", doc).is_err());
    }

    #[test]
    fn patch_touches_only_editable_fields() {
        let mut record = sample_record();
        let original = record.clone();
        let patch = HistoryPatch {
            plate: None,
            vehicle: VehicleClass::Truck,
            amount: "7500".into(),
        };
        patch.apply(&mut record);

        assert_eq!(record.plate, None);
        assert_eq!(record.vehicle, VehicleClass::Truck);
        assert_eq!(record.amount, "7500");
        assert_eq!(record.start_time, original.start_time);
        assert_eq!(record.end_time, original.end_time);
        assert_eq!(record.spot, original.spot);
        assert_eq!(record.duration_ms, original.duration_ms);
    }

    #[test]
    fn patch_fields_map() {
        let patch = HistoryPatch {
            plate: Some("XY987Z".into()),
            vehicle: VehicleClass::Motorcycle,
            amount: "1200".into(),
        };
        let fields = patch.to_fields().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("plate").unwrap(), "XY987Z");
        assert_eq!(fields.get("vehicle").unwrap(), "motorcycle");
        assert_eq!(fields.get("amount").unwrap(), "1200");
    }
}
