//! Input normalization shared by the entity services and attendance sessions.

use chrono::NaiveDate;

use super::error::ValidationError;

pub const MAX_NAME_LENGTH: usize = 100;

/// Trimmed display name, non-empty and at most [`MAX_NAME_LENGTH`] characters
pub fn clean_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }

    Ok(trimmed.to_string())
}

/// Trimmed section name, non-empty and at most [`MAX_NAME_LENGTH`]
/// characters like the section entities it refers to
pub fn clean_section(section: &str) -> Result<String, ValidationError> {
    let trimmed = section.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptySection);
    }
    clean_name(trimmed)
}

/// Trim every entry, drop blanks and repeats, keep first-seen order
fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !cleaned.iter().any(|v| v == trimmed) {
            cleaned.push(trimmed.to_string());
        }
    }
    cleaned
}

/// Subject list for a teacher; at least one subject must survive cleaning
pub fn clean_subjects(subjects: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let cleaned = clean_list(subjects);
    if cleaned.is_empty() {
        return Err(ValidationError::NoSubjects);
    }
    Ok(cleaned)
}

/// Section list for a teacher; may be empty
pub fn clean_sections(sections: Vec<String>) -> Vec<String> {
    clean_list(sections)
}

/// A calendar day in `YYYY-MM-DD` form, returned zero-padded
pub fn clean_date(date: &str) -> Result<String, ValidationError> {
    let trimmed = date.trim();
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(date.to_string()));
    }

    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}
