use crate::domain::models::Section as DomainSection;
use shared::{Section as SharedSection, SectionListResponse, SectionResponse};

/// Mapper between shared Section DTOs and domain sections.
pub struct SectionMapper;

impl SectionMapper {
    pub fn to_dto(domain: DomainSection) -> SharedSection {
        SharedSection {
            id: domain.id,
            name: domain.name,
        }
    }

    pub fn to_section_list_dto(sections: Vec<DomainSection>) -> SectionListResponse {
        SectionListResponse {
            sections: sections.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_section_response_dto(domain: DomainSection, message: &str) -> SectionResponse {
        SectionResponse {
            section: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
