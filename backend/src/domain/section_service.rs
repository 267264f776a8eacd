use tracing::{info, warn};

use super::error::{DomainError, DomainResult};
use super::models::Section;
use super::validation::clean_name;
use crate::storage::SectionRepository;

/// Service for managing sections.
///
/// Accounts point at sections by name, so renaming or deleting a section
/// leaves those accounts pointing at the old name.
#[derive(Clone)]
pub struct SectionService {
    sections: SectionRepository,
}

impl SectionService {
    pub fn new(sections: SectionRepository) -> Self {
        Self { sections }
    }

    pub async fn list_sections(&self) -> DomainResult<Vec<Section>> {
        info!("Listing all sections");
        let sections = self.sections.list().await?;
        info!("Found {} sections", sections.len());
        Ok(sections)
    }

    pub async fn get_section(&self, section_id: &str) -> DomainResult<Section> {
        info!("Getting section: {}", section_id);

        match self.sections.get(section_id).await? {
            Some(section) => Ok(section),
            None => {
                warn!("Section not found: {}", section_id);
                Err(DomainError::not_found("Section", section_id))
            }
        }
    }

    pub async fn create_section(&self, name: &str) -> DomainResult<Section> {
        let name = clean_name(name)?;
        info!("Creating section: {}", name);

        let section = self.sections.create(&name).await?;

        info!("Created section: {} with ID: {}", section.name, section.id);
        Ok(section)
    }

    pub async fn rename_section(&self, section_id: &str, name: &str) -> DomainResult<Section> {
        let name = clean_name(name)?;
        info!("Renaming section {} to {}", section_id, name);

        let mut section = self.get_section(section_id).await?;
        self.sections
            .rename(section_id, &name)
            .await
            .map_err(|e| DomainError::from_write(e, "Section", section_id))?;
        section.name = name;

        Ok(section)
    }

    pub async fn delete_section(&self, section_id: &str) -> DomainResult<()> {
        info!("Deleting section: {}", section_id);

        let section = self.get_section(section_id).await?;
        self.sections.delete(section_id).await?;

        info!("Deleted section: {} with ID: {}", section.name, section.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use crate::storage::test_utils::TestHelper;

    #[tokio::test]
    async fn test_section_lifecycle() {
        let helper = TestHelper::new();
        let service = SectionService::new(helper.sections.clone());

        let section = service.create_section(" A ").await.unwrap();
        assert_eq!(section.name, "A");

        let renamed = service.rename_section(&section.id, "A1").await.unwrap();
        assert_eq!(renamed.name, "A1");
        assert_eq!(service.get_section(&section.id).await.unwrap().name, "A1");

        service.delete_section(&section.id).await.unwrap();
        assert!(service.list_sections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_section_rejects_blank_name() {
        let helper = TestHelper::new();
        let service = SectionService::new(helper.sections.clone());

        assert!(matches!(
            service.create_section("   ").await,
            Err(DomainError::Validation(ValidationError::EmptyName))
        ));
        assert_eq!(helper.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_rename_missing_section() {
        let helper = TestHelper::new();
        let service = SectionService::new(helper.sections.clone());

        assert!(matches!(
            service.rename_section("ghost", "B").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_rename_of_section_deleted_meanwhile_is_not_found() {
        let helper = TestHelper::new();
        let service = SectionService::new(helper.sections.clone());
        let section = helper.add_section("A").await;
        helper.store.delete_before_update(true);

        assert!(matches!(
            service.rename_section(&section.id, "B").await,
            Err(DomainError::NotFound { entity: "Section", .. })
        ));
    }

    #[tokio::test]
    async fn test_rename_does_not_rewrite_students() {
        let helper = TestHelper::new();
        let service = SectionService::new(helper.sections.clone());
        let section = helper.add_section("A").await;
        helper.add_student("Alice", "A").await;

        service.rename_section(&section.id, "B").await.unwrap();

        assert_eq!(
            helper.accounts.list_students_in_section("A").await.unwrap().len(),
            1
        );
        assert!(helper
            .accounts
            .list_students_in_section("B")
            .await
            .unwrap()
            .is_empty());
    }
}
