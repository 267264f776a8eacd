use crate::domain::commands::attendance::SaveAttendanceResult;
use crate::domain::models::{AttendanceSnapshot as DomainSnapshot, RosterRow as DomainRow};
use crate::domain::SessionView;
use crate::io::rest::mappers::{AccountMapper, SectionMapper};
use shared::{
    AttendanceSessionView, AttendanceSnapshot as SharedSnapshot, PresenceRecord,
    RosterRow as SharedRow, SaveAttendanceResponse,
};

/// Mapper between attendance DTOs and the domain session and snapshot types.
pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_snapshot_dto(domain: DomainSnapshot) -> SharedSnapshot {
        SharedSnapshot {
            date: domain.date,
            section: domain.section,
            subject: domain.subject,
            teacher_id: domain.teacher_id,
            records: domain
                .records
                .into_iter()
                .map(|(student_id, present)| (student_id, PresenceRecord { present }))
                .collect(),
        }
    }

    pub fn to_row_dto(domain: DomainRow) -> SharedRow {
        SharedRow {
            id: domain.student_id,
            name: domain.name,
            present: domain.present,
        }
    }

    pub fn to_session_view_dto(view: SessionView) -> AttendanceSessionView {
        AttendanceSessionView {
            session_id: view.session_id,
            teachers: view
                .teachers
                .into_iter()
                .map(AccountMapper::to_teacher_dto)
                .collect(),
            sections: view.sections.into_iter().map(SectionMapper::to_dto).collect(),
            selected_teacher: view.selected_teacher,
            subjects: view.subjects,
            selected_subject: view.selected_subject,
            section: view.section,
            date: view.date,
            rows: view.rows.into_iter().map(Self::to_row_dto).collect(),
            persisted: view.persisted,
            can_save: view.can_save,
        }
    }

    pub fn to_save_response_dto(result: SaveAttendanceResult) -> SaveAttendanceResponse {
        SaveAttendanceResponse {
            snapshot_id: result.snapshot_id,
            snapshot: Self::to_snapshot_dto(result.snapshot),
            success_message: result.success_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_snapshot_records_become_presence_objects() {
        let mut records = BTreeMap::new();
        records.insert("s1".to_string(), true);
        records.insert("s2".to_string(), false);

        let dto = AttendanceMapper::to_snapshot_dto(DomainSnapshot {
            date: "2024-05-01".to_string(),
            section: "A".to_string(),
            subject: "Math".to_string(),
            teacher_id: "t1".to_string(),
            records,
        });

        assert_eq!(dto.teacher_id, "t1");
        assert_eq!(dto.records["s1"], PresenceRecord { present: true });
        assert_eq!(dto.records["s2"], PresenceRecord { present: false });
    }
}
