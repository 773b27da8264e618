use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Rejects empty and whitespace-only values.
    pub fn require(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Checks every `(field, value)` pair and reports all empty fields at once.
    pub fn require_all(fields: &[(&str, &str)]) -> Result<(), AppError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(format!(
                "Required fields are missing: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn validate_cultural_group(group: &str, known_groups: &[String]) -> Result<(), AppError> {
        Self::require("Cultural group", group)?;

        if known_groups.is_empty() {
            return Ok(());
        }
        if !known_groups.iter().any(|known| known == group) {
            return Err(AppError::ValidationError(format!(
                "Unknown cultural group '{}'",
                group
            )));
        }
        Ok(())
    }
}
