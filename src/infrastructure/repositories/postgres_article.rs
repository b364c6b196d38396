// src/infrastructure/repositories/postgres_article.rs
use super::error::map_sqlx;
use super::postgres_version::ArticleVersionRow;
use crate::domain::article::{
    Article, ArticleDescription, ArticleId, ArticleListFilter, ArticleReadRepository,
    ArticleStatus, ArticleTitle, ArticleUpdate, ArticleVersion, ArticleWriteRepository,
    NewArticle, NewArticleVersion, SourceUrl,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::module::ModuleId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, source_url, original_title, original_description, \
     suggested_title, suggested_description, score, status, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    source_url: String,
    original_title: String,
    original_description: String,
    suggested_title: Option<String>,
    suggested_description: Option<String>,
    score: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            source_url: SourceUrl::new(row.source_url)?,
            original_title: ArticleTitle::new(row.original_title)?,
            original_description: ArticleDescription::new(row.original_description)?,
            suggested_title: row.suggested_title,
            suggested_description: row.suggested_description,
            score: row.score,
            status: row.status.parse::<ArticleStatus>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn push_update_clauses<'a>(builder: &mut QueryBuilder<'a, Postgres>, update: &'a ArticleUpdate) {
    builder.push("UPDATE articles SET updated_at = ");
    builder.push_bind(update.updated_at);

    if let Some(title) = &update.suggested_title {
        builder.push(", suggested_title = ");
        builder.push_bind(title.as_str());
    }
    if let Some(description) = &update.suggested_description {
        builder.push(", suggested_description = ");
        builder.push_bind(description.as_str());
    }
    if let Some(score) = update.score {
        builder.push(", score = ");
        builder.push_bind(score);
    }
    if let Some(status) = update.status {
        builder.push(", status = ");
        builder.push_bind(status.as_str());
    }

    builder.push(" WHERE id = ");
    builder.push_bind(i64::from(update.id));
    builder.push(" RETURNING ");
    builder.push(ARTICLE_COLUMNS);
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle, module_ids: &[ModuleId]) -> DomainResult<Article> {
        let NewArticle {
            source_url,
            original_title,
            original_description,
            status,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles (source_url, original_title, original_description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, source_url, original_title, original_description,
                       suggested_title, suggested_description, score, status, created_at, updated_at",
        )
        .bind(source_url.as_str())
        .bind(original_title.as_str())
        .bind(original_description.as_str())
        .bind(status.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for module_id in module_ids {
            sqlx::query("INSERT INTO article_modules (article_id, module_id) VALUES ($1, $2)")
                .bind(row.id)
                .bind(i64::from(*module_id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("");
        push_update_clauses(&mut builder, &update);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row.ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        Article::try_from(row)
    }

    async fn record_written_content(
        &self,
        update: ArticleUpdate,
        version: NewArticleVersion,
    ) -> DomainResult<(Article, ArticleVersion)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let version_row = sqlx::query_as::<_, ArticleVersionRow>(
            "INSERT INTO article_versions (article_id, content, version_number, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, article_id, content, version_number, created_at",
        )
        .bind(i64::from(version.article_id))
        .bind(version.content.as_str())
        .bind(version.version_number)
        .bind(version.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("");
        push_update_clauses(&mut builder, &update);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        let row = maybe_row.ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok((
            Article::try_from(row)?,
            ArticleVersion::try_from(version_row)?,
        ))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &'a ArticleListFilter,
        pattern: Option<&'a str>,
    ) {
        let mut has_where = false;
        let mut push_connector = |builder: &mut QueryBuilder<'a, Postgres>| {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
                has_where = true;
            }
        };

        if let Some(status) = filter.status {
            push_connector(builder);
            builder.push("a.status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(module_id) = filter.module_id {
            push_connector(builder);
            builder.push(
                "EXISTS (SELECT 1 FROM article_modules am \
                 WHERE am.article_id = a.id AND am.module_id = ",
            );
            builder.push_bind(i64::from(module_id));
            builder.push(")");
        }

        if let Some(pattern) = pattern {
            push_connector(builder);
            builder.push("(a.original_title ILIKE ");
            builder.push_bind(pattern);
            builder.push(" OR a.suggested_title ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, source_url, original_title, original_description,
                    suggested_title, suggested_description, score, status, created_at, updated_at
             FROM articles WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));
        let pattern = pattern.as_deref();

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        Self::apply_conditions(&mut count_builder, filter, pattern);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT a.id, a.source_url, a.original_title, a.original_description,
                    a.suggested_title, a.suggested_description, a.score, a.status,
                    a.created_at, a.updated_at
             FROM articles a",
        );
        Self::apply_conditions(&mut builder, filter, pattern);
        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((articles, total as u64))
    }
}
