use crate::error::ValidationError;

/// Upper bound on description length, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// A validated free-text app description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Accepts 1..=2000 characters. Whitespace-only input counts as empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let actual = raw.chars().count();
        if actual > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_CHARS,
                actual,
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
