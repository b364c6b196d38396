// src/application/dto.rs
use crate::domain::{
    article::{Article, ArticleStatus, ArticleVersion},
    module::Module,
    user::{Capability, Role, User, UserId},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize)]
pub struct ModuleDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Module> for ModuleDto {
    fn from(module: Module) -> Self {
        Self {
            id: module.id.into(),
            name: module.name.into(),
            slug: module.slug.into(),
            active: module.active,
            created_at: module.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleVersionDto {
    pub id: i64,
    pub version_number: i32,
    pub content: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<ArticleVersion> for ArticleVersionDto {
    fn from(version: ArticleVersion) -> Self {
        Self {
            id: version.id,
            version_number: version.version_number,
            content: version.content.into(),
            created_at: version.created_at,
        }
    }
}

/// Version row without its content, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleVersionSummaryDto {
    pub id: i64,
    pub version_number: i32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<ArticleVersion> for ArticleVersionSummaryDto {
    fn from(version: ArticleVersion) -> Self {
        Self {
            id: version.id,
            version_number: version.version_number,
            created_at: version.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDto {
    pub id: i64,
    pub source_url: String,
    pub original_title: String,
    pub original_description: String,
    pub suggested_title: Option<String>,
    pub suggested_description: Option<String>,
    pub score: Option<i32>,
    pub status: ArticleStatus,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<ModuleDto>,
}

impl ArticleDto {
    pub fn from_parts(article: Article, modules: Vec<Module>) -> Self {
        Self {
            id: article.id.into(),
            source_url: article.source_url.into(),
            original_title: article.original_title.into(),
            original_description: article.original_description.into(),
            suggested_title: article.suggested_title,
            suggested_description: article.suggested_description,
            score: article.score,
            status: article.status,
            created_at: article.created_at,
            updated_at: article.updated_at,
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full article view with its version history, as returned by the detail
/// endpoint and the write callback.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetailDto {
    #[serde(flatten)]
    pub article: ArticleDto,
    pub latest_version: Option<ArticleVersionDto>,
    pub versions: Vec<ArticleVersionSummaryDto>,
}

impl ArticleDetailDto {
    pub fn from_parts(
        article: Article,
        modules: Vec<Module>,
        versions: Vec<ArticleVersion>,
    ) -> Self {
        let latest_version = versions
            .iter()
            .max_by_key(|version| version.version_number)
            .cloned()
            .map(Into::into);
        let mut summaries: Vec<ArticleVersionSummaryDto> =
            versions.into_iter().map(Into::into).collect();
        summaries.sort_by_key(|version| version.version_number);

        Self {
            article: ArticleDto::from_parts(article, modules),
            latest_version,
            versions: summaries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.to_string(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if total == 0 || page_size == 0 {
            0
        } else {
            ((total - 1) / page_size as u64 + 1) as u32
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}

pub mod serde_time {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    #[allow(dead_code)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
