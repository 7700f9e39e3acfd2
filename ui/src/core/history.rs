//! Bounded, most-recent-first history of past predictions.
//!
//! The store owns its backend and mirrors every change to it. Persistence is
//! best-effort: read failures load as an empty history and write failures are
//! logged and dropped, so the triggering action always completes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::client::PredictionPayload;
use super::label::parse_label;
use super::storage::{KeyValueStore, StorageError};

/// Storage key holding the JSON array of records.
pub const HISTORY_KEY: &str = "pred_history_v1";

/// Maximum number of records kept.
pub const HISTORY_LIMIT: usize = 5;

/// One persisted prediction. Never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    pub id: i64,
    pub timestamp: String,
    pub crop: String,
    pub disease: String,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub confidence: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub raw: Value,
}

impl PredictionRecord {
    /// Build a record from a successful response. Returns `None` when the
    /// payload carries no label.
    pub fn from_payload(
        payload: &PredictionPayload,
        image: Option<String>,
        id: i64,
        timestamp: String,
    ) -> Option<Self> {
        let parsed = parse_label(&payload.label)?;
        Some(Self {
            id,
            timestamp,
            crop: parsed.crop,
            disease: parsed.disease,
            confidence: payload.confidence,
            image,
            raw: payload.raw.clone(),
        })
    }

    /// Payload to re-render this record without a network call. Prefers the
    /// stored response; rebuilds a label from crop and disease otherwise.
    pub fn replay_payload(&self) -> PredictionPayload {
        let stored = PredictionPayload::from_value(self.raw.clone());
        if !stored.label.is_empty() {
            return stored;
        }

        let label = format!(
            "{}{}{}",
            self.crop.replace(' ', "_"),
            super::label::DELIMITER,
            self.disease.replace(' ', "_")
        );
        PredictionPayload {
            raw: serde_json::json!({ "class": label, "confidence": self.confidence }),
            label,
            confidence: self.confidence,
        }
    }
}

fn nan() -> f64 {
    f64::NAN
}

// JSON has no NaN; serde_json writes it as `null`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug)]
pub struct HistoryStore<S> {
    backend: S,
    records: Vec<PredictionRecord>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Read the persisted history. Any failure yields an empty history.
    pub fn load(backend: S) -> Self {
        let records = read_records(&backend).unwrap_or_else(|err| {
            warn!("discarding persisted history: {err}");
            Vec::new()
        });
        debug!(count = records.len(), "history loaded");
        Self { backend, records }
    }

    /// Re-read from the backend, replacing the in-memory copy.
    pub fn reload(&mut self) {
        self.records = read_records(&self.backend).unwrap_or_else(|err| {
            warn!("discarding persisted history: {err}");
            Vec::new()
        });
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest id that is at least `candidate` and above every stored id.
    pub fn next_id(&self, candidate: i64) -> i64 {
        self.records
            .iter()
            .map(|r| r.id.saturating_add(1))
            .fold(candidate, i64::max)
    }

    /// Prepend, evict beyond [`HISTORY_LIMIT`], persist.
    pub fn append(&mut self, mut record: PredictionRecord) {
        if self.records.iter().any(|r| r.id == record.id) {
            record.id = self.next_id(record.id);
        }
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
        self.persist();
    }

    /// Drop every record, in memory and in the backend.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(err) = self.backend.remove(HISTORY_KEY) {
            warn!("failed to clear persisted history: {err}");
        }
    }

    fn persist(&self) {
        let outcome = serde_json::to_string(&self.records)
            .map_err(StorageError::Encode)
            .and_then(|json| self.backend.write(HISTORY_KEY, &json));
        if let Err(err) = outcome {
            warn!("failed to persist history: {err}");
        }
    }
}

fn read_records<S: KeyValueStore>(backend: &S) -> Result<Vec<PredictionRecord>, StorageError> {
    let Some(raw) = backend.read(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };
    let mut records: Vec<PredictionRecord> =
        serde_json::from_str(&raw).map_err(StorageError::Decode)?;
    records.truncate(HISTORY_LIMIT);
    Ok(records)
}
