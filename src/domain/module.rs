// src/domain/module.rs
use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(pub i64);

impl ModuleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("module id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ModuleId> for i64 {
    fn from(value: ModuleId) -> Self {
        value.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("module name cannot be empty".into()));
        }
        if value.len() > 100 {
            return Err(DomainError::Validation(
                "module name must be at most 100 characters".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ModuleName> for String {
    fn from(value: ModuleName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSlug(String);

impl ModuleSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("module slug cannot be empty".into()));
        }
        if value.len() > 120 {
            return Err(DomainError::Validation(
                "module slug must be at most 120 characters".into(),
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::Validation(
                "module slug may contain only lowercase letters, digits and hyphens".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ModuleSlug> for String {
    fn from(value: ModuleSlug) -> Self {
        value.0
    }
}

/// A category an article can be tagged with. The article association is a
/// plain join table; neither side owns the other.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub name: ModuleName,
    pub slug: ModuleSlug,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub name: ModuleName,
    pub slug: ModuleSlug,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ModuleUpdate {
    pub id: ModuleId,
    pub name: Option<ModuleName>,
    pub slug: Option<ModuleSlug>,
    pub active: Option<bool>,
}

impl ModuleUpdate {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            active: None,
        }
    }

    pub fn with_name(mut self, name: ModuleName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: ModuleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn insert(&self, module: NewModule) -> DomainResult<Module>;

    async fn update(&self, update: ModuleUpdate) -> DomainResult<Module>;

    async fn find_by_id(&self, id: ModuleId) -> DomainResult<Option<Module>>;

    async fn find_by_slug(&self, slug: &ModuleSlug) -> DomainResult<Option<Module>>;

    /// Resolve a set of module ids; ids with no matching module are simply
    /// absent from the result, callers detect the gap themselves.
    async fn find_by_ids(&self, ids: &[ModuleId]) -> DomainResult<Vec<Module>>;

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Module>>;
}
