use tracing::{info, warn};

use super::attendance_session::ComposeTicket;
use super::commands::attendance::SaveAttendanceResult;
use super::error::DomainResult;
use super::models::{AttendanceSnapshot, RosterRow, Section, Student, Teacher};
use crate::storage::{AccountRepository, AttendanceRepository, SectionRepository};

/// Store-facing half of attendance recording: loads options, composes roster
/// rows and writes snapshots. Session state lives in
/// [`super::attendance_session::AttendanceSession`].
#[derive(Clone)]
pub struct AttendanceComposer {
    accounts: AccountRepository,
    sections: SectionRepository,
    attendance: AttendanceRepository,
}

impl AttendanceComposer {
    pub fn new(
        accounts: AccountRepository,
        sections: SectionRepository,
        attendance: AttendanceRepository,
    ) -> Self {
        Self {
            accounts,
            sections,
            attendance,
        }
    }

    pub async fn load_teacher_options(&self) -> DomainResult<Vec<Teacher>> {
        Ok(self.accounts.list_teachers().await?)
    }

    pub async fn load_section_options(&self) -> DomainResult<Vec<Section>> {
        Ok(self.sections.list().await?)
    }

    /// Read the section roster and any prior snapshot for the ticket's
    /// (date, section), then merge them into rows
    pub async fn compose(&self, ticket: &ComposeTicket) -> DomainResult<Vec<RosterRow>> {
        info!(
            "Composing roster for section {} on {} (seq {})",
            ticket.section, ticket.date, ticket.seq
        );

        let (students, prior) = tokio::try_join!(
            self.accounts.list_students_in_section(&ticket.section),
            self.attendance.get(&ticket.date, &ticket.section),
        )?;

        let rows = merge_roster(students, prior.as_ref());
        info!(
            "Composed {} rows (prior snapshot: {})",
            rows.len(),
            prior.is_some()
        );
        Ok(rows)
    }

    /// Overwrite the snapshot stored for (date, section)
    pub async fn save(&self, snapshot: AttendanceSnapshot) -> DomainResult<SaveAttendanceResult> {
        info!(
            "Saving attendance for section {} on {}: {} records",
            snapshot.section,
            snapshot.date,
            snapshot.records.len()
        );

        let snapshot_id = self.attendance.overwrite(&snapshot).await.map_err(|e| {
            warn!("Failed to save attendance {}: {}", snapshot.key(), e);
            e
        })?;

        let success_message = format!(
            "Attendance saved for section {} on {}",
            snapshot.section, snapshot.date
        );

        Ok(SaveAttendanceResult {
            snapshot_id,
            snapshot,
            success_message,
        })
    }

    pub async fn snapshot(&self, date: &str, section: &str) -> DomainResult<Option<AttendanceSnapshot>> {
        Ok(self.attendance.get(date, section).await?)
    }
}

/// One row per student in roster order. Presence comes from `prior` when the
/// student has an entry there; everyone else starts absent.
pub fn merge_roster(students: Vec<Student>, prior: Option<&AttendanceSnapshot>) -> Vec<RosterRow> {
    students
        .into_iter()
        .map(|student| RosterRow {
            present: prior.map_or(false, |snapshot| snapshot.is_present(&student.id)),
            student_id: student.id,
            name: student.name,
        })
        .collect()
}
