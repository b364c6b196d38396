// src/domain/article/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(pub i64);

impl ArticleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "article id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ArticleId> for i64 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the article proposal came from. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("source url cannot be empty".into()));
        }
        if value.len() > 500 {
            return Err(DomainError::Validation(
                "source url must be at most 500 characters".into(),
            ));
        }
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(DomainError::Validation(
                "source url must be an http(s) url".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SourceUrl> for String {
    fn from(value: SourceUrl) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("title cannot be empty".into()));
        }
        if value.len() > 255 {
            return Err(DomainError::Validation(
                "title must be at most 255 characters".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleTitle> for String {
    fn from(value: ArticleTitle) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDescription(String);

impl ArticleDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "description cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ArticleDescription> for String {
    fn from(value: ArticleDescription) -> Self {
        value.0
    }
}

/// Full text body of a written version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionContent(String);

impl VersionContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("content cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<VersionContent> for String {
    fn from(value: VersionContent) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_url_requires_http_scheme() {
        assert!(SourceUrl::new("https://example.com/post/1").is_ok());
        assert!(SourceUrl::new("ftp://example.com").is_err());
        assert!(SourceUrl::new("").is_err());
        assert!(SourceUrl::new(format!("https://{}", "a".repeat(500))).is_err());
    }

    #[test]
    fn title_is_bounded() {
        assert!(ArticleTitle::new("a title").is_ok());
        assert!(ArticleTitle::new("  ").is_err());
        assert!(ArticleTitle::new("a".repeat(256)).is_err());
    }

    #[test]
    fn content_cannot_be_blank() {
        assert!(VersionContent::new("Hello").is_ok());
        assert!(VersionContent::new(" \n").is_err());
    }
}
