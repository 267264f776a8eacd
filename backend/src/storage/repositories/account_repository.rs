//! Teachers and students, both stored in the `users` collection and told
//! apart by their `role` field.
//!
//! ```json
//! { "role": "teacher", "name": "Ms. Rivera", "sections": ["A", "B"], "subjects": ["Math"] }
//! { "role": "student", "name": "Alice", "section": "A" }
//! ```
//!
//! Older teacher documents carry their section list under `section` instead of
//! `sections`; both shapes are read, only `sections` is written.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::{Account, Role, Student, Teacher};
use crate::storage::collections::USERS;
use crate::storage::traits::{Document, DocumentStore, Fields, StoreError, StoreResult};

#[derive(Deserialize)]
struct UserDocument {
    role: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    section: Option<SectionField>,
    #[serde(default)]
    sections: Option<Vec<String>>,
    #[serde(default)]
    subjects: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionField {
    One(String),
    Many(Vec<String>),
}

/// Repository for the `users` collection
#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<dyn DocumentStore>,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All teachers, ordered by name
    pub async fn list_teachers(&self) -> StoreResult<Vec<Teacher>> {
        let accounts = self.find(Role::Teacher, "role", json!(Role::Teacher.as_str())).await?;
        Ok(accounts.into_iter().filter_map(Account::into_teacher).collect())
    }

    /// All students, ordered by name
    pub async fn list_students(&self) -> StoreResult<Vec<Student>> {
        let accounts = self.find(Role::Student, "role", json!(Role::Student.as_str())).await?;
        Ok(accounts.into_iter().filter_map(Account::into_student).collect())
    }

    /// Students whose `section` equals `section`, ordered by name
    pub async fn list_students_in_section(&self, section: &str) -> StoreResult<Vec<Student>> {
        let accounts = self.find(Role::Student, "section", json!(section)).await?;
        Ok(accounts.into_iter().filter_map(Account::into_student).collect())
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<Account>> {
        match self.store.get(USERS, id).await? {
            Some(doc) => Ok(Some(Self::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Store a new teacher under a store-assigned id, ignoring `teacher.id`
    pub async fn create_teacher(&self, teacher: &Teacher) -> StoreResult<Teacher> {
        let id = self.store.create(USERS, Self::teacher_fields(teacher)).await?;
        Ok(Teacher {
            id,
            ..teacher.clone()
        })
    }

    /// Store a new student under a store-assigned id, ignoring `student.id`
    pub async fn create_student(&self, student: &Student) -> StoreResult<Student> {
        let id = self.store.create(USERS, Self::student_fields(student)).await?;
        Ok(Student {
            id,
            ..student.clone()
        })
    }

    /// Write every field of an existing teacher
    pub async fn update_teacher(&self, teacher: &Teacher) -> StoreResult<()> {
        self.store
            .update(USERS, &teacher.id, Self::teacher_fields(teacher))
            .await
    }

    /// Write every field of an existing student
    pub async fn update_student(&self, student: &Student) -> StoreResult<()> {
        self.store
            .update(USERS, &student.id, Self::student_fields(student))
            .await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(USERS, id).await
    }

    /// Query by one field, keep accounts of `role`, skip documents that do
    /// not decode
    async fn find(&self, role: Role, field: &str, value: Value) -> StoreResult<Vec<Account>> {
        let documents = self.store.find_by_field(USERS, field, &value).await?;

        let mut accounts: Vec<Account> = documents
            .into_iter()
            .filter_map(|doc| match Self::from_document(doc) {
                Ok(account) => Some(account),
                Err(e) => {
                    warn!("Skipping unreadable user document: {}", e);
                    None
                }
            })
            .filter(|account| account.role() == role)
            .collect();

        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(accounts)
    }

    fn from_document(doc: Document) -> StoreResult<Account> {
        let malformed = |reason: String| StoreError::Malformed {
            collection: USERS.to_string(),
            id: doc.id.clone(),
            reason,
        };

        let user: UserDocument = serde_json::from_value(Value::Object(doc.fields.clone()))
            .map_err(|e| malformed(e.to_string()))?;
        let role: Role = user.role.parse().map_err(malformed)?;

        let account = match role {
            Role::Teacher => {
                let legacy_sections = match user.section {
                    Some(SectionField::Many(names)) => Some(names),
                    _ => None,
                };
                Account::Teacher(Teacher {
                    id: doc.id,
                    name: user.name,
                    sections: user.sections.or(legacy_sections).unwrap_or_default(),
                    subjects: user.subjects,
                })
            }
            Role::Student => {
                let section = match user.section {
                    Some(SectionField::One(name)) => name,
                    Some(SectionField::Many(_)) => {
                        return Err(malformed("student section must be a single name".to_string()))
                    }
                    None => String::new(),
                };
                Account::Student(Student {
                    id: doc.id,
                    name: user.name,
                    section,
                })
            }
        };

        Ok(account)
    }

    fn teacher_fields(teacher: &Teacher) -> Fields {
        Self::object(json!({
            "role": Role::Teacher.as_str(),
            "name": teacher.name,
            "sections": teacher.sections,
            "subjects": teacher.subjects,
        }))
    }

    fn student_fields(student: &Student) -> Fields {
        Self::object(json!({
            "role": Role::Student.as_str(),
            "name": student.name,
            "section": student.section,
        }))
    }

    fn object(value: Value) -> Fields {
        match value {
            Value::Object(fields) => fields,
            _ => Fields::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("fields must be an object"),
        }
    }

    fn setup() -> (MemoryDocumentStore, AccountRepository) {
        let store = MemoryDocumentStore::new();
        let repo = AccountRepository::new(Arc::new(store.clone()));
        (store, repo)
    }

    fn student(name: &str, section: &str) -> Student {
        Student {
            id: String::new(),
            name: name.to_string(),
            section: section.to_string(),
        }
    }

    fn teacher(name: &str, subjects: &[&str]) -> Teacher {
        Teacher {
            id: String::new(),
            name: name.to_string(),
            sections: Vec::new(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_round_trips() {
        let (_, repo) = setup();

        let mut draft = teacher("Ms. Rivera", &["Math", "Science"]);
        draft.sections = vec!["A".to_string()];
        let created = repo.create_teacher(&draft).await.unwrap();

        assert!(!created.id.is_empty());
        let loaded = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, Account::Teacher(created));
    }

    #[tokio::test]
    async fn test_list_by_role_sorted_by_name() {
        let (_, repo) = setup();
        repo.create_student(&student("Bob", "A")).await.unwrap();
        repo.create_student(&student("Alice", "B")).await.unwrap();
        repo.create_teacher(&teacher("Mr. Chen", &["English"]))
            .await
            .unwrap();

        let students = repo.list_students().await.unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);

        let teachers = repo.list_teachers().await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].subjects, vec!["English".to_string()]);
    }

    #[tokio::test]
    async fn test_students_in_section_filters_by_name() {
        let (_, repo) = setup();
        repo.create_student(&student("Alice", "A")).await.unwrap();
        repo.create_student(&student("Bob", "A")).await.unwrap();
        repo.create_student(&student("Carol", "B")).await.unwrap();

        let in_a = repo.list_students_in_section("A").await.unwrap();
        assert_eq!(in_a.len(), 2);
        assert!(in_a.iter().all(|s| s.section == "A"));
        assert!(repo.list_students_in_section("Z").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_legacy_teacher_section_array() {
        let (store, repo) = setup();
        store
            .set(
                USERS,
                "t-legacy",
                fields(json!({
                    "role": "teacher",
                    "name": "Legacy",
                    "section": ["A", "C"],
                    "subjects": ["History"],
                })),
            )
            .await
            .unwrap();

        let teacher = repo.get("t-legacy").await.unwrap().unwrap().into_teacher().unwrap();
        assert_eq!(teacher.sections, vec!["A".to_string(), "C".to_string()]);

        // A legacy teacher never shows up in a section roster
        assert!(repo.list_students_in_section("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_documents_are_skipped_in_lists() {
        let (store, repo) = setup();
        store
            .set(USERS, "odd", fields(json!({"role": "janitor", "name": "X"})))
            .await
            .unwrap();
        repo.create_student(&student("Alice", "A")).await.unwrap();

        assert_eq!(repo.list_students().await.unwrap().len(), 1);
        assert!(matches!(
            repo.get("odd").await,
            Err(StoreError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_rewrites_teacher_fields() {
        let (store, repo) = setup();
        let mut created = repo
            .create_teacher(&teacher("Ms. Rivera", &["Math"]))
            .await
            .unwrap();

        created.subjects.push("Art".to_string());
        repo.update_teacher(&created).await.unwrap();

        let doc = store.get(USERS, &created.id).await.unwrap().unwrap();
        assert_eq!(doc.fields["subjects"], json!(["Math", "Art"]));
        assert_eq!(doc.str_field("role"), Some("teacher"));
    }
}
