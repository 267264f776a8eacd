use crate::storage::StoreError;

/// Input rejected before any store call is made
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot exceed {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },
    #[error("Section name cannot be empty")]
    EmptySection,
    #[error("A teacher needs at least one subject")]
    NoSubjects,
    #[error("Date must be a calendar day in YYYY-MM-DD format: '{0}'")]
    InvalidDate(String),
    #[error("Unknown teacher: {0}")]
    UnknownTeacher(String),
    #[error("Subject '{0}' is not taught by the selected teacher")]
    SubjectNotOffered(String),
    #[error("Please select a teacher first")]
    NoTeacherSelected,
    #[error("Please complete all fields: missing {}", .0.join(", "))]
    IncompleteSelection(Vec<&'static str>),
    #[error("There are no students to record attendance for")]
    EmptyRoster,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("document store failure: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Failure of a write to an entity that was read just before. A document
    /// deleted in between is reported as not found.
    pub fn from_write(error: StoreError, entity: &'static str, id: &str) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::not_found(entity, id),
            other => DomainError::Store(other),
        }
    }
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;
