// Repository modules
pub mod account_repository;
pub mod attendance_repository;
pub mod section_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use attendance_repository::AttendanceRepository;
pub use section_repository::SectionRepository;
