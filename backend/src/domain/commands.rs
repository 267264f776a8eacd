//! Domain-level command types.
//!
//! Services take these instead of the public DTOs from the `shared` crate;
//! the REST layer does the mapping.

pub mod teachers {
    #[derive(Debug, Clone)]
    pub struct CreateTeacherCommand {
        pub name: String,
        pub sections: Vec<String>,
        pub subjects: Vec<String>,
    }

    /// Fields left as `None` keep their stored value
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTeacherCommand {
        pub name: Option<String>,
        pub sections: Option<Vec<String>>,
        pub subjects: Option<Vec<String>>,
    }
}

pub mod students {
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub section: String,
    }

    /// Fields left as `None` keep their stored value
    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub name: Option<String>,
        pub section: Option<String>,
    }
}

pub mod attendance {
    use crate::domain::models::AttendanceSnapshot;

    /// Outcome of a successful save
    #[derive(Debug, Clone)]
    pub struct SaveAttendanceResult {
        pub snapshot_id: String,
        pub snapshot: AttendanceSnapshot,
        pub success_message: String,
    }
}
