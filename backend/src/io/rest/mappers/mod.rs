pub mod account_mapper;
pub mod attendance_mapper;
pub mod section_mapper;

pub use account_mapper::AccountMapper;
pub use attendance_mapper::AttendanceMapper;
pub use section_mapper::SectionMapper;
