use crate::domain::commands::students::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::commands::teachers::{CreateTeacherCommand, UpdateTeacherCommand};
use crate::domain::models::{Student as DomainStudent, Teacher as DomainTeacher};
use shared::{
    CreateStudentRequest, CreateTeacherRequest, Student as SharedStudent, StudentListResponse,
    StudentResponse, Teacher as SharedTeacher, TeacherListResponse, TeacherResponse,
    UpdateStudentRequest, UpdateTeacherRequest,
};

/// Mapper between the shared account DTOs and domain teachers and students.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_teacher_dto(domain: DomainTeacher) -> SharedTeacher {
        SharedTeacher {
            id: domain.id,
            name: domain.name,
            sections: domain.sections,
            subjects: domain.subjects,
        }
    }

    pub fn to_student_dto(domain: DomainStudent) -> SharedStudent {
        SharedStudent {
            id: domain.id,
            name: domain.name,
            section: domain.section,
        }
    }

    pub fn to_teacher_list_dto(teachers: Vec<DomainTeacher>) -> TeacherListResponse {
        TeacherListResponse {
            teachers: teachers.into_iter().map(Self::to_teacher_dto).collect(),
        }
    }

    pub fn to_student_list_dto(students: Vec<DomainStudent>) -> StudentListResponse {
        StudentListResponse {
            students: students.into_iter().map(Self::to_student_dto).collect(),
        }
    }

    pub fn to_teacher_response_dto(domain: DomainTeacher, message: &str) -> TeacherResponse {
        TeacherResponse {
            teacher: Self::to_teacher_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_student_response_dto(domain: DomainStudent, message: &str) -> StudentResponse {
        StudentResponse {
            student: Self::to_student_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_create_teacher_command(request: CreateTeacherRequest) -> CreateTeacherCommand {
        CreateTeacherCommand {
            name: request.name,
            sections: request.sections,
            subjects: request.subjects,
        }
    }

    pub fn to_update_teacher_command(request: UpdateTeacherRequest) -> UpdateTeacherCommand {
        UpdateTeacherCommand {
            name: request.name,
            sections: request.sections,
            subjects: request.subjects,
        }
    }

    pub fn to_create_student_command(request: CreateStudentRequest) -> CreateStudentCommand {
        CreateStudentCommand {
            name: request.name,
            section: request.section,
        }
    }

    pub fn to_update_student_command(request: UpdateStudentRequest) -> UpdateStudentCommand {
        UpdateStudentCommand {
            name: request.name,
            section: request.section,
        }
    }
}
