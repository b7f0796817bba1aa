use std::fmt::Debug;

const MAX_NAME_LENGTH: usize = 255;

/// Name of a cocktail, material or shop.
///
/// Always trimmed and non-empty: an empty name is what the lookup endpoints
/// hand back for records that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName(String);

impl EntityName{
    pub fn parse(name: String) -> Result<EntityName, String>{
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err("name must not be empty".to_string());
        }

        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(format!("{} is longer than {} characters", trimmed, MAX_NAME_LENGTH));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
