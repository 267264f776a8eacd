use tracing::{info, warn};

use super::commands::teachers::{CreateTeacherCommand, UpdateTeacherCommand};
use super::error::{DomainError, DomainResult};
use super::models::{Account, Teacher};
use super::validation::{clean_name, clean_sections, clean_subjects};
use crate::storage::AccountRepository;

/// Service for managing teacher accounts
#[derive(Clone)]
pub struct TeacherService {
    accounts: AccountRepository,
}

impl TeacherService {
    pub fn new(accounts: AccountRepository) -> Self {
        Self { accounts }
    }

    pub async fn list_teachers(&self) -> DomainResult<Vec<Teacher>> {
        info!("Listing all teachers");
        let teachers = self.accounts.list_teachers().await?;
        info!("Found {} teachers", teachers.len());
        Ok(teachers)
    }

    /// A teacher by id; student accounts with that id count as not found
    pub async fn get_teacher(&self, teacher_id: &str) -> DomainResult<Teacher> {
        info!("Getting teacher: {}", teacher_id);

        match self.accounts.get(teacher_id).await?.and_then(Account::into_teacher) {
            Some(teacher) => Ok(teacher),
            None => {
                warn!("Teacher not found: {}", teacher_id);
                Err(DomainError::not_found("Teacher", teacher_id))
            }
        }
    }

    pub async fn create_teacher(&self, command: CreateTeacherCommand) -> DomainResult<Teacher> {
        info!("Creating teacher: name={}", command.name);

        let draft = Teacher {
            id: String::new(),
            name: clean_name(&command.name)?,
            sections: clean_sections(command.sections),
            subjects: clean_subjects(command.subjects)?,
        };

        let teacher = self.accounts.create_teacher(&draft).await?;

        info!("Created teacher: {} with ID: {}", teacher.name, teacher.id);
        Ok(teacher)
    }

    pub async fn update_teacher(
        &self,
        teacher_id: &str,
        command: UpdateTeacherCommand,
    ) -> DomainResult<Teacher> {
        info!("Updating teacher: {}", teacher_id);

        let mut teacher = self.get_teacher(teacher_id).await?;

        if let Some(name) = command.name {
            teacher.name = clean_name(&name)?;
        }
        if let Some(sections) = command.sections {
            teacher.sections = clean_sections(sections);
        }
        if let Some(subjects) = command.subjects {
            teacher.subjects = clean_subjects(subjects)?;
        }

        self.accounts
            .update_teacher(&teacher)
            .await
            .map_err(|e| DomainError::from_write(e, "Teacher", teacher_id))?;

        info!("Updated teacher: {} with ID: {}", teacher.name, teacher.id);
        Ok(teacher)
    }

    /// Delete a teacher. Attendance snapshots that name this teacher are left
    /// as they are.
    pub async fn delete_teacher(&self, teacher_id: &str) -> DomainResult<()> {
        info!("Deleting teacher: {}", teacher_id);

        let teacher = self.get_teacher(teacher_id).await?;
        self.accounts.delete(teacher_id).await?;

        info!("Deleted teacher: {} with ID: {}", teacher.name, teacher.id);
        Ok(())
    }
}
