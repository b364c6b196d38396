// src/application/queries/modules.rs
use super::articles::{ArticleQueryService, normalize_page};
use crate::{
    application::{
        dto::{ArticleDto, PaginatedResult},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleListFilter, ArticleReadRepository},
        module::{ModuleId, ModuleRepository},
    },
};
use std::sync::Arc;

pub struct ModuleArticlesQuery {
    pub module_id: i64,
    pub page: u32,
    pub limit: u32,
}

pub struct ModuleQueryService {
    module_repo: Arc<dyn ModuleRepository>,
    read_repo: Arc<dyn ArticleReadRepository>,
    article_queries: Arc<ArticleQueryService>,
}

impl ModuleQueryService {
    pub fn new(
        module_repo: Arc<dyn ModuleRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        article_queries: Arc<ArticleQueryService>,
    ) -> Self {
        Self {
            module_repo,
            read_repo,
            article_queries,
        }
    }

    pub async fn list_module_articles(
        &self,
        query: ModuleArticlesQuery,
    ) -> ApplicationResult<PaginatedResult<ArticleDto>> {
        let module_id = ModuleId::new(query.module_id)?;
        self.module_repo
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("module not found"))?;

        let filter = ArticleListFilter {
            module_id: Some(module_id),
            ..ArticleListFilter::default()
        };
        let (page, limit) = normalize_page(query.page, query.limit);

        let (articles, total) = self.read_repo.list_page(&filter, page, limit).await?;
        let items = self.article_queries.with_modules(articles).await?;

        Ok(PaginatedResult::new(items, total, page, limit))
    }
}
