//! # Domain Module
//!
//! Business logic for recording class attendance.
//!
//! The services here validate input and drive the storage repositories. They
//! know nothing about HTTP; the REST layer maps requests onto the command
//! types in [`commands`] and maps [`error::DomainError`] onto status codes.
//!
//! ## Module Organization
//!
//! - **teacher_service / student_service / section_service**: single-entity
//!   management of accounts and sections
//! - **attendance_session**: in-memory state of one recording session
//!   (selections, roster rows, compose sequence numbers)
//! - **attendance_composer**: the store reads and writes behind a session
//! - **attendance_service**: registry of open sessions and the operations
//!   the REST layer calls
//! - **validation**: input cleaning shared by the services
//!
//! ## Business Rules
//!
//! - Names are trimmed, non-empty and at most 100 characters
//! - A teacher teaches at least one subject
//! - Accounts reference sections by name; nothing cascades on rename or delete
//! - One attendance snapshot per (date, section); saving again overwrites it
//! - A save is refused, with nothing written, until section, date, teacher
//!   and subject are chosen and the roster is non-empty

pub mod attendance_composer;
pub mod attendance_service;
pub mod attendance_session;
pub mod commands;
pub mod error;
pub mod models;
pub mod section_service;
pub mod student_service;
pub mod teacher_service;
pub mod validation;

pub use attendance_composer::AttendanceComposer;
pub use attendance_service::AttendanceService;
pub use attendance_session::{AttendanceSession, SessionView};
pub use error::{DomainError, DomainResult, ValidationError};
pub use section_service::SectionService;
pub use student_service::StudentService;
pub use teacher_service::TeacherService;
