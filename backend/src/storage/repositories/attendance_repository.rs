//! Attendance snapshots, one document per (date, section) in the `attendance`
//! collection, addressed by [`snapshot_key`].
//!
//! ```json
//! {
//!   "date": "2024-05-01",
//!   "section": "A",
//!   "subject": "Math",
//!   "teacherId": "t1",
//!   "records": { "s1": { "present": true }, "s2": { "present": false } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::models::{snapshot_key, AttendanceSnapshot};
use crate::storage::collections::ATTENDANCE;
use crate::storage::traits::{DocumentStore, Fields, StoreError, StoreResult};

#[derive(Serialize, Deserialize)]
struct SnapshotDocument {
    date: String,
    section: String,
    #[serde(default)]
    subject: String,
    #[serde(rename = "teacherId", default)]
    teacher_id: String,
    #[serde(default)]
    records: BTreeMap<String, RecordEntry>,
}

#[derive(Serialize, Deserialize)]
struct RecordEntry {
    #[serde(default)]
    present: bool,
}

#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<dyn DocumentStore>,
}

impl AttendanceRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The snapshot recorded for (date, section), if any
    pub async fn get(&self, date: &str, section: &str) -> StoreResult<Option<AttendanceSnapshot>> {
        let key = snapshot_key(date, section);
        let Some(doc) = self.store.get(ATTENDANCE, &key).await? else {
            return Ok(None);
        };

        let stored: SnapshotDocument =
            serde_json::from_value(Value::Object(doc.fields)).map_err(|e| StoreError::Malformed {
                collection: ATTENDANCE.to_string(),
                id: key,
                reason: e.to_string(),
            })?;

        Ok(Some(AttendanceSnapshot {
            date: stored.date,
            section: stored.section,
            subject: stored.subject,
            teacher_id: stored.teacher_id,
            records: stored
                .records
                .into_iter()
                .map(|(student_id, entry)| (student_id, entry.present))
                .collect(),
        }))
    }

    /// Replace whatever is stored for the snapshot's (date, section) with the
    /// snapshot itself. Returns the document key.
    pub async fn overwrite(&self, snapshot: &AttendanceSnapshot) -> StoreResult<String> {
        let key = snapshot.key();
        let stored = SnapshotDocument {
            date: snapshot.date.clone(),
            section: snapshot.section.clone(),
            subject: snapshot.subject.clone(),
            teacher_id: snapshot.teacher_id.clone(),
            records: snapshot
                .records
                .iter()
                .map(|(student_id, present)| (student_id.clone(), RecordEntry { present: *present }))
                .collect(),
        };

        let fields = match serde_json::to_value(stored)? {
            Value::Object(fields) => fields,
            _ => Fields::new(),
        };

        self.store.set(ATTENDANCE, &key, fields).await?;
        Ok(key)
    }
}
