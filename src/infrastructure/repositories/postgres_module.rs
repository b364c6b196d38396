// src/infrastructure/repositories/postgres_module.rs
use super::error::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::module::{
    Module, ModuleId, ModuleName, ModuleRepository, ModuleSlug, ModuleUpdate, NewModule,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresModuleRepository {
    pool: PgPool,
}

impl PostgresModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ModuleRow {
    id: i64,
    name: String,
    slug: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ModuleRow> for Module {
    type Error = DomainError;

    fn try_from(row: ModuleRow) -> Result<Self, Self::Error> {
        Ok(Module {
            id: ModuleId::new(row.id)?,
            name: ModuleName::new(row.name)?,
            slug: ModuleSlug::new(row.slug)?,
            active: row.active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ModuleRepository for PostgresModuleRepository {
    async fn insert(&self, module: NewModule) -> DomainResult<Module> {
        let row = sqlx::query_as::<_, ModuleRow>(
            "INSERT INTO modules (name, slug, active, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, slug, active, created_at",
        )
        .bind(module.name.as_str())
        .bind(module.slug.as_str())
        .bind(module.active)
        .bind(module.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Module::try_from(row)
    }

    async fn update(&self, update: ModuleUpdate) -> DomainResult<Module> {
        if update.name.is_none() && update.slug.is_none() && update.active.is_none() {
            return self
                .find_by_id(update.id)
                .await?
                .ok_or_else(|| DomainError::NotFound("module not found".into()));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE modules SET ");
        let mut first = true;
        let mut push_clause = |builder: &mut QueryBuilder<Postgres>, column: &str| {
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push(column);
            builder.push(" = ");
        };

        if let Some(name) = &update.name {
            push_clause(&mut builder, "name");
            builder.push_bind(name.as_str().to_owned());
        }
        if let Some(slug) = &update.slug {
            push_clause(&mut builder, "slug");
            builder.push_bind(slug.as_str().to_owned());
        }
        if let Some(active) = update.active {
            push_clause(&mut builder, "active");
            builder.push_bind(active);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING id, name, slug, active, created_at");

        let maybe_row = builder
            .build_query_as::<ModuleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row.ok_or_else(|| DomainError::NotFound("module not found".into()))?;
        Module::try_from(row)
    }

    async fn find_by_id(&self, id: ModuleId) -> DomainResult<Option<Module>> {
        let row = sqlx::query_as::<_, ModuleRow>(
            "SELECT id, name, slug, active, created_at FROM modules WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Module::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ModuleSlug) -> DomainResult<Option<Module>> {
        let row = sqlx::query_as::<_, ModuleRow>(
            "SELECT id, name, slug, active, created_at FROM modules WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Module::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[ModuleId]) -> DomainResult<Vec<Module>> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let rows = sqlx::query_as::<_, ModuleRow>(
            "SELECT id, name, slug, active, created_at FROM modules WHERE id = ANY($1)",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Module::try_from).collect()
    }

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Module>> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            "SELECT m.id, m.name, m.slug, m.active, m.created_at
             FROM modules m
             INNER JOIN article_modules am ON am.module_id = m.id
             WHERE am.article_id = $1
             ORDER BY m.id",
        )
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Module::try_from).collect()
    }
}
