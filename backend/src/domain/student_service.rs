use tracing::{info, warn};

use super::commands::students::{CreateStudentCommand, UpdateStudentCommand};
use super::error::{DomainError, DomainResult};
use super::models::{Account, Student};
use super::validation::{clean_name, clean_section};
use crate::storage::AccountRepository;

/// Service for managing student accounts
#[derive(Clone)]
pub struct StudentService {
    accounts: AccountRepository,
}

impl StudentService {
    pub fn new(accounts: AccountRepository) -> Self {
        Self { accounts }
    }

    /// All students, or only those whose section name is `section`
    pub async fn list_students(&self, section: Option<&str>) -> DomainResult<Vec<Student>> {
        let students = match section {
            Some(section) => {
                info!("Listing students in section {}", section);
                self.accounts.list_students_in_section(section).await?
            }
            None => {
                info!("Listing all students");
                self.accounts.list_students().await?
            }
        };

        info!("Found {} students", students.len());
        Ok(students)
    }

    pub async fn get_student(&self, student_id: &str) -> DomainResult<Student> {
        info!("Getting student: {}", student_id);

        match self.accounts.get(student_id).await?.and_then(Account::into_student) {
            Some(student) => Ok(student),
            None => {
                warn!("Student not found: {}", student_id);
                Err(DomainError::not_found("Student", student_id))
            }
        }
    }

    /// Create a student. The section is stored by name and is not checked
    /// against existing sections.
    pub async fn create_student(&self, command: CreateStudentCommand) -> DomainResult<Student> {
        info!(
            "Creating student: name={}, section={}",
            command.name, command.section
        );

        let draft = Student {
            id: String::new(),
            name: clean_name(&command.name)?,
            section: clean_section(&command.section)?,
        };

        let student = self.accounts.create_student(&draft).await?;

        info!("Created student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    pub async fn update_student(
        &self,
        student_id: &str,
        command: UpdateStudentCommand,
    ) -> DomainResult<Student> {
        info!("Updating student: {}", student_id);

        let mut student = self.get_student(student_id).await?;

        if let Some(name) = command.name {
            student.name = clean_name(&name)?;
        }
        if let Some(section) = command.section {
            student.section = clean_section(&section)?;
        }

        self.accounts
            .update_student(&student)
            .await
            .map_err(|e| DomainError::from_write(e, "Student", student_id))?;

        info!("Updated student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    pub async fn delete_student(&self, student_id: &str) -> DomainResult<()> {
        info!("Deleting student: {}", student_id);

        let student = self.get_student(student_id).await?;
        self.accounts.delete(student_id).await?;

        info!("Deleted student: {} with ID: {}", student.name, student.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use crate::storage::test_utils::TestHelper;

    #[tokio::test]
    async fn test_create_student_trims_input() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());

        let student = service
            .create_student(CreateStudentCommand {
                name: " Alice ".to_string(),
                section: " A ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(student.name, "Alice");
        assert_eq!(student.section, "A");
        assert_eq!(service.get_student(&student.id).await.unwrap(), student);
    }

    #[tokio::test]
    async fn test_create_student_requires_section() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());

        let result = service
            .create_student(CreateStudentCommand {
                name: "Alice".to_string(),
                section: "  ".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::EmptySection))
        ));
        assert_eq!(helper.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_create_student_rejects_overlong_section() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());

        let result = service
            .create_student(CreateStudentCommand {
                name: "Alice".to_string(),
                section: "S".repeat(101),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::NameTooLong { .. }))
        ));
        assert_eq!(helper.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_list_students_with_and_without_filter() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());
        helper.add_student("Bob", "A").await;
        helper.add_student("Alice", "A").await;
        helper.add_student("Carol", "B").await;
        helper.add_teacher("Ms. Rivera", &["Math"]).await;

        assert_eq!(service.list_students(None).await.unwrap().len(), 3);

        let in_a = service.list_students(Some("A")).await.unwrap();
        let names: Vec<_> = in_a.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_move_student_between_sections() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());
        let student = helper.add_student("Alice", "A").await;

        service
            .update_student(
                &student.id,
                UpdateStudentCommand {
                    section: Some("B".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(service.list_students(Some("A")).await.unwrap().is_empty());
        assert_eq!(service.list_students(Some("B")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_of_student_deleted_meanwhile_is_not_found() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());
        let student = helper.add_student("Alice", "A").await;
        helper.store.delete_before_update(true);

        let result = service
            .update_student(
                &student.id,
                UpdateStudentCommand {
                    name: Some("Alicia".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity: "Student", .. })
        ));
    }

    #[tokio::test]
    async fn test_student_service_does_not_touch_teachers() {
        let helper = TestHelper::new();
        let service = StudentService::new(helper.accounts.clone());
        let teacher = helper.add_teacher("Ms. Rivera", &["Math"]).await;

        assert!(matches!(
            service.delete_student(&teacher.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(helper.accounts.list_teachers().await.unwrap().len(), 1);
    }
}
