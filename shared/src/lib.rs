//! Wire types shared between the attendance backend and its clients.
//!
//! Everything here is plain data: the REST layer maps these DTOs to and from
//! the backend's domain models, and clients deserialize them as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A teacher account as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    /// Display name
    pub name: String,
    /// Names of the sections this teacher is assigned to
    pub sections: Vec<String>,
    /// Subjects this teacher teaches, in the order they were entered
    pub subjects: Vec<String>,
}

/// A student account as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    /// Display name
    pub name: String,
    /// Name of the section the student belongs to
    pub section: String,
}

/// A class grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<String>,
    pub subjects: Vec<String>,
}

/// Partial update; fields left as `None` keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub sections: Option<Vec<String>>,
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub section: String,
}

/// Partial update; fields left as `None` keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSectionRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSectionRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherListResponse {
    pub teachers: Vec<Teacher>,
}

/// Query string of `GET /api/students`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentListQuery {
    /// Only students in this section
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionListResponse {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherResponse {
    pub teacher: Teacher,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResponse {
    pub section: Section,
    pub success_message: String,
}

/// Presence entry stored per student inside an attendance snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub present: bool,
}

/// One recorded attendance session for a (date, section) pair.
///
/// Field names follow the stored document shape, so `teacher_id` travels as
/// `teacherId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    pub section: String,
    pub subject: String,
    #[serde(rename = "teacherId")]
    pub teacher_id: String,
    /// Student id -> presence
    pub records: BTreeMap<String, PresenceRecord>,
}

/// One editable line of the roster view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Student account id
    pub id: String,
    pub name: String,
    pub present: bool,
}

/// Read-only projection of an attendance session for the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSessionView {
    pub session_id: String,
    pub teachers: Vec<Teacher>,
    pub sections: Vec<Section>,
    pub selected_teacher: Option<String>,
    /// Subject options of the selected teacher
    pub subjects: Vec<String>,
    pub selected_subject: Option<String>,
    pub section: Option<String>,
    pub date: Option<String>,
    pub rows: Vec<RosterRow>,
    /// True when the rows match what was last saved from this session
    pub persisted: bool,
    /// True when every save precondition holds
    pub can_save: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectTeacherRequest {
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectSubjectRequest {
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectSectionRequest {
    pub section: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectDateRequest {
    /// Calendar day, `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAttendanceResponse {
    /// Composite document key the snapshot was written under
    pub snapshot_id: String,
    pub snapshot: AttendanceSnapshot,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body returned alongside every non-2xx status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_document_field_names() {
        let mut records = BTreeMap::new();
        records.insert("s1".to_string(), PresenceRecord { present: true });
        let snapshot = AttendanceSnapshot {
            date: "2024-05-01".to_string(),
            section: "A".to_string(),
            subject: "Math".to_string(),
            teacher_id: "t1".to_string(),
            records,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["teacherId"], "t1");
        assert_eq!(value["records"]["s1"]["present"], true);
        assert!(value.get("teacher_id").is_none());
    }

    #[test]
    fn test_create_teacher_request_sections_default_to_empty() {
        let request: CreateTeacherRequest =
            serde_json::from_str(r#"{"name":"Ms. Rivera","subjects":["Math"]}"#).unwrap();
        assert!(request.sections.is_empty());
        assert_eq!(request.subjects, vec!["Math".to_string()]);
    }
}
