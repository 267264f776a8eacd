//! In-memory state of one attendance-recording session.
//!
//! The session holds the loaded options, the current selections and the
//! editable roster rows. It never touches the store: operations that need a
//! read or a write hand back a ticket describing the work, and the caller
//! reports the outcome back with [`AttendanceSession::apply_compose`] or
//! [`AttendanceSession::mark_persisted`].
//!
//! Every selection of a section or date issues a new compose sequence number.
//! A compose result is applied only when its number is still the latest one,
//! so a slow read for an old selection can never overwrite the rows of a
//! newer one.

use std::collections::BTreeMap;

use super::error::ValidationError;
use super::models::{AttendanceSnapshot, RosterRow, Section, Teacher};
use super::validation::{clean_date, clean_section};

/// A roster read to perform for the selection current at `seq`
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeTicket {
    pub seq: u64,
    pub section: String,
    pub date: String,
}

/// A snapshot built from the rows as they were at `revision`
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    pub revision: u64,
    pub snapshot: AttendanceSnapshot,
}

/// Read-only projection of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session_id: String,
    pub teachers: Vec<Teacher>,
    pub sections: Vec<Section>,
    pub selected_teacher: Option<String>,
    pub subjects: Vec<String>,
    pub selected_subject: Option<String>,
    pub section: Option<String>,
    pub date: Option<String>,
    pub rows: Vec<RosterRow>,
    pub persisted: bool,
    pub can_save: bool,
}

#[derive(Debug, Clone)]
pub struct AttendanceSession {
    id: String,
    teachers: Vec<Teacher>,
    sections: Vec<Section>,
    selected_teacher: Option<String>,
    selected_subject: Option<String>,
    section: Option<String>,
    date: Option<String>,
    rows: Vec<RosterRow>,
    persisted: bool,
    compose_seq: u64,
    /// Bumped on every change to `rows`
    revision: u64,
}

impl AttendanceSession {
    pub fn new(id: String, teachers: Vec<Teacher>, sections: Vec<Section>) -> Self {
        Self {
            id,
            teachers,
            sections,
            selected_teacher: None,
            selected_subject: None,
            section: None,
            date: None,
            rows: Vec::new(),
            persisted: false,
            compose_seq: 0,
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Subjects of the selected teacher; empty when none is selected
    pub fn subject_options(&self) -> &[String] {
        self.selected_teacher
            .as_deref()
            .and_then(|id| self.teachers.iter().find(|t| t.id == id))
            .map(|t| t.subjects.as_slice())
            .unwrap_or(&[])
    }

    /// Select a teacher from the loaded options, or clear the selection.
    /// The subject selection is reset whenever the teacher changes.
    pub fn select_teacher(&mut self, teacher_id: Option<&str>) -> Result<(), ValidationError> {
        if let Some(id) = teacher_id {
            if !self.teachers.iter().any(|t| t.id == id) {
                return Err(ValidationError::UnknownTeacher(id.to_string()));
            }
        }

        if self.selected_teacher.as_deref() == teacher_id {
            return Ok(());
        }

        self.selected_teacher = teacher_id.map(str::to_string);
        self.selected_subject = None;
        Ok(())
    }

    pub fn select_subject(&mut self, subject: Option<&str>) -> Result<(), ValidationError> {
        let Some(subject) = subject else {
            self.selected_subject = None;
            return Ok(());
        };

        if self.selected_teacher.is_none() {
            return Err(ValidationError::NoTeacherSelected);
        }
        let subject = subject.trim();
        if !self.subject_options().iter().any(|s| s == subject) {
            return Err(ValidationError::SubjectNotOffered(subject.to_string()));
        }

        self.selected_subject = Some(subject.to_string());
        Ok(())
    }

    /// Change the section. Unsaved rows are discarded; a ticket is returned
    /// once both section and date are set.
    pub fn select_section(
        &mut self,
        section: Option<&str>,
    ) -> Result<Option<ComposeTicket>, ValidationError> {
        self.section = section.map(clean_section).transpose()?;
        Ok(self.recompose())
    }

    /// Change the date. Same rules as [`Self::select_section`].
    pub fn select_date(
        &mut self,
        date: Option<&str>,
    ) -> Result<Option<ComposeTicket>, ValidationError> {
        self.date = date.map(clean_date).transpose()?;
        Ok(self.recompose())
    }

    fn recompose(&mut self) -> Option<ComposeTicket> {
        self.compose_seq += 1;
        self.replace_rows(Vec::new());

        match (&self.section, &self.date) {
            (Some(section), Some(date)) => Some(ComposeTicket {
                seq: self.compose_seq,
                section: section.clone(),
                date: date.clone(),
            }),
            _ => None,
        }
    }

    /// Install composed rows. Returns false, leaving the session untouched,
    /// when a later selection has superseded the ticket.
    pub fn apply_compose(&mut self, seq: u64, rows: Vec<RosterRow>) -> bool {
        if seq != self.compose_seq {
            return false;
        }
        self.replace_rows(rows);
        true
    }

    /// Flip one row's presence flag and return the new value
    pub fn toggle(&mut self, student_id: &str) -> Option<bool> {
        let row = self.rows.iter_mut().find(|r| r.student_id == student_id)?;
        row.present = !row.present;
        let present = row.present;

        self.revision += 1;
        self.persisted = false;
        Some(present)
    }

    /// Fields still missing before a save may happen, in display order
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.section.is_none() {
            missing.push("section");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.selected_teacher.is_none() {
            missing.push("teacher");
        }
        if self.selected_subject.is_none() {
            missing.push("subject");
        }
        missing
    }

    pub fn can_save(&self) -> bool {
        self.missing_fields().is_empty() && !self.rows.is_empty()
    }

    /// Build the snapshot to write from every current row
    pub fn prepare_save(&self) -> Result<SaveTicket, ValidationError> {
        let (Some(section), Some(date), Some(teacher_id), Some(subject)) = (
            &self.section,
            &self.date,
            &self.selected_teacher,
            &self.selected_subject,
        ) else {
            return Err(ValidationError::IncompleteSelection(self.missing_fields()));
        };

        if self.rows.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }

        let records: BTreeMap<String, bool> = self
            .rows
            .iter()
            .map(|row| (row.student_id.clone(), row.present))
            .collect();

        Ok(SaveTicket {
            revision: self.revision,
            snapshot: AttendanceSnapshot {
                date: date.clone(),
                section: section.clone(),
                subject: subject.clone(),
                teacher_id: teacher_id.clone(),
                records,
            },
        })
    }

    /// Record a successful save. Ignored when the rows changed after the
    /// ticket was prepared.
    pub fn mark_persisted(&mut self, revision: u64) -> bool {
        if revision != self.revision {
            return false;
        }
        self.persisted = true;
        true
    }

    fn replace_rows(&mut self, rows: Vec<RosterRow>) {
        self.rows = rows;
        self.revision += 1;
        self.persisted = false;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            teachers: self.teachers.clone(),
            sections: self.sections.clone(),
            selected_teacher: self.selected_teacher.clone(),
            subjects: self.subject_options().to_vec(),
            selected_subject: self.selected_subject.clone(),
            section: self.section.clone(),
            date: self.date.clone(),
            rows: self.rows.clone(),
            persisted: self.persisted,
            can_save: self.can_save(),
        }
    }
}
