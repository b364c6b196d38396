// src/infrastructure/repositories/postgres_version.rs
use super::error::map_sqlx;
use crate::domain::article::{
    ArticleId, ArticleVersion, ArticleVersionRepository, VersionContent,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresArticleVersionRepository {
    pool: PgPool,
}

impl PostgresArticleVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleVersionRow {
    pub(super) id: i64,
    pub(super) article_id: i64,
    pub(super) content: String,
    pub(super) version_number: i32,
    pub(super) created_at: DateTime<Utc>,
}

impl TryFrom<ArticleVersionRow> for ArticleVersion {
    type Error = DomainError;

    fn try_from(row: ArticleVersionRow) -> Result<Self, Self::Error> {
        Ok(ArticleVersion {
            id: row.id,
            article_id: ArticleId::new(row.article_id)?,
            content: VersionContent::new(row.content)?,
            version_number: row.version_number,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ArticleVersionRepository for PostgresArticleVersionRepository {
    async fn max_version_number(&self, article_id: ArticleId) -> DomainResult<i32> {
        let max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version_number) FROM article_versions WHERE article_id = $1",
        )
        .bind(i64::from(article_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(max.unwrap_or(0))
    }

    async fn count_for_article(&self, article_id: ArticleId) -> DomainResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM article_versions WHERE article_id = $1")
                .bind(i64::from(article_id))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(count as u64)
    }

    async fn latest(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>> {
        let row = sqlx::query_as::<_, ArticleVersionRow>(
            "SELECT id, article_id, content, version_number, created_at
             FROM article_versions
             WHERE article_id = $1
             ORDER BY version_number DESC
             LIMIT 1",
        )
        .bind(i64::from(article_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ArticleVersion::try_from).transpose()
    }

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleVersion>> {
        let rows = sqlx::query_as::<_, ArticleVersionRow>(
            "SELECT id, article_id, content, version_number, created_at
             FROM article_versions
             WHERE article_id = $1
             ORDER BY version_number ASC",
        )
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ArticleVersion::try_from).collect()
    }
}
