//! Attendee display name.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AttendeeName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttendeeNameError {
    /// The name is shorter than the minimum length.
    #[error("name must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// The name an attendee registers under.
///
/// Stored exactly as given; it must be at least [`AttendeeName::MIN_LENGTH`]
/// characters long, whitespace included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AttendeeName(String);

impl AttendeeName {
    /// Minimum number of characters in a name.
    pub const MIN_LENGTH: usize = 4;

    /// Parse an `AttendeeName` from a string.
    ///
    /// # Errors
    ///
    /// Returns `AttendeeNameError::TooShort` if the input has fewer than
    /// [`Self::MIN_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, AttendeeNameError> {
        if s.chars().count() < Self::MIN_LENGTH {
            return Err(AttendeeNameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `query` occurs in the name (case-sensitive).
    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.0.contains(query)
    }
}

impl fmt::Display for AttendeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AttendeeName {
    type Error = AttendeeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AttendeeName> for String {
    fn from(name: AttendeeName) -> Self {
        name.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for AttendeeName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AttendeeName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for AttendeeName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_length() {
        assert!(AttendeeName::parse("Bob").is_err());
        assert!(AttendeeName::parse("Bobo").is_ok());
        assert_eq!(
            AttendeeName::parse("abc"),
            Err(AttendeeNameError::TooShort { min: 4 })
        );
    }

    #[test]
    fn test_whitespace_is_kept_and_counted() {
        assert_eq!(AttendeeName::parse("Bob ").unwrap().as_str(), "Bob ");
        assert_eq!(AttendeeName::parse(" Alice ").unwrap().as_str(), " Alice ");
        assert!(AttendeeName::parse(" ab").is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(AttendeeName::parse("Zoë").is_err());
        assert!(AttendeeName::parse("José").is_ok());
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let name = AttendeeName::parse("Alice Smith").unwrap();
        assert!(name.contains("lice"));
        assert!(name.contains("Smith"));
        assert!(!name.contains("alicia"));
        assert!(!name.contains("smith"));
    }
}
