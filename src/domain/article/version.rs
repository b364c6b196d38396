// src/domain/article/version.rs
use crate::domain::article::value_objects::{ArticleId, VersionContent};
use chrono::{DateTime, Utc};

/// An immutable snapshot of an article's written content. Version numbers
/// for one article form a contiguous sequence starting at 1.
#[derive(Debug, Clone)]
pub struct ArticleVersion {
    pub id: i64,
    pub article_id: ArticleId,
    pub content: VersionContent,
    pub version_number: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticleVersion {
    pub article_id: ArticleId,
    pub content: VersionContent,
    pub version_number: i32,
    pub created_at: DateTime<Utc>,
}
