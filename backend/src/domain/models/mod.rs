pub mod account;
pub mod attendance;
pub mod section;

pub use account::{Account, Role, Student, Teacher};
pub use attendance::{snapshot_key, AttendanceSnapshot, RosterRow};
pub use section::Section;
