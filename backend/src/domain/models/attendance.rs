use std::collections::BTreeMap;

/// Document id of the snapshot for a (date, section) pair.
///
/// The key is deterministic, so saving the same pair twice addresses the same
/// document and the second save replaces the first.
pub fn snapshot_key(date: &str, section: &str) -> String {
    format!("date-{}_{}", date, section)
}

/// The persisted attendance record for one (date, section) pair
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSnapshot {
    pub date: String,
    pub section: String,
    pub subject: String,
    pub teacher_id: String,
    /// Student id -> present
    pub records: BTreeMap<String, bool>,
}

impl AttendanceSnapshot {
    pub fn key(&self) -> String {
        snapshot_key(&self.date, &self.section)
    }

    /// Presence recorded for `student_id`; students missing from the
    /// snapshot count as absent
    pub fn is_present(&self, student_id: &str) -> bool {
        self.records.get(student_id).copied().unwrap_or(false)
    }
}

/// One editable line of the roster view
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub student_id: String,
    pub name: String,
    pub present: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_key_format() {
        assert_eq!(snapshot_key("2024-05-01", "A"), "date-2024-05-01_A");
        assert_eq!(snapshot_key("2024-05-01", "Grade 7"), "date-2024-05-01_Grade 7");
    }

    #[test]
    fn test_missing_students_are_absent() {
        let mut records = BTreeMap::new();
        records.insert("s1".to_string(), true);
        let snapshot = AttendanceSnapshot {
            date: "2024-05-01".to_string(),
            section: "A".to_string(),
            subject: "Math".to_string(),
            teacher_id: "t1".to_string(),
            records,
        };

        assert!(snapshot.is_present("s1"));
        assert!(!snapshot.is_present("s2"));
        assert_eq!(snapshot.key(), "date-2024-05-01_A");
    }
}
