use std::fmt::{Display, Formatter};

use crate::DomainError;

pub const THUMBNAIL_SUFFIX: &str = "_thumb.jpg";

/// Caller-supplied identifier of a caption request. Used verbatim in the
/// thumbnail file name, so it may not name anything outside the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryId(String);

impl QueryId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyQueryId);
        }
        if value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
            return Err(DomainError::UnsafeQueryId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thumbnail_name(&self) -> ThumbnailName {
        ThumbnailName(format!("{}{THUMBNAIL_SUFFIX}", self.0))
    }
}

impl Display for QueryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailName(String);

impl ThumbnailName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for ThumbnailName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_name_appends_suffix() {
        let id = QueryId::new("q-42").expect("id");
        assert_eq!(id.thumbnail_name().as_str(), "q-42_thumb.jpg");
    }

    #[test]
    fn query_id_must_not_be_blank() {
        assert_eq!(QueryId::new(""), Err(DomainError::EmptyQueryId));
        assert_eq!(QueryId::new("   "), Err(DomainError::EmptyQueryId));
    }

    #[test]
    fn query_id_rejects_path_escapes() {
        for value in ["..", ".", "a/b", "..\\evil", "nul\0byte"] {
            assert!(
                matches!(QueryId::new(value), Err(DomainError::UnsafeQueryId(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn query_id_keeps_value_verbatim() {
        let id = QueryId::new(" spaced id.v2 ").expect("id");
        assert_eq!(id.as_str(), " spaced id.v2 ");
    }
}
