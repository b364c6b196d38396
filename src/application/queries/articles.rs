// src/application/queries/articles.rs
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleDto, PaginatedResult},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            Article, ArticleId, ArticleListFilter, ArticleReadRepository, ArticleStatus,
            ArticleVersionRepository,
        },
        module::{ModuleId, ModuleRepository},
    },
};
use std::sync::Arc;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub struct ListArticlesQuery {
    pub status: Option<String>,
    pub module_id: Option<i64>,
    pub q: Option<String>,
    pub page: u32,
    pub limit: u32,
}

pub struct GetArticleQuery {
    pub id: i64,
}

pub struct ArticleQueryService {
    read_repo: Arc<dyn ArticleReadRepository>,
    version_repo: Arc<dyn ArticleVersionRepository>,
    module_repo: Arc<dyn ModuleRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
        module_repo: Arc<dyn ModuleRepository>,
    ) -> Self {
        Self {
            read_repo,
            version_repo,
            module_repo,
        }
    }

    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<PaginatedResult<ArticleDto>> {
        let status = match query.status.as_deref() {
            Some(raw) => Some(
                raw.parse::<ArticleStatus>()
                    .map_err(ApplicationError::from)?,
            ),
            None => None,
        };
        let module_id = match query.module_id {
            Some(raw) => Some(ModuleId::new(raw)?),
            None => None,
        };

        let filter = ArticleListFilter {
            status,
            module_id,
            search: query.q.filter(|q| !q.trim().is_empty()),
        };
        let (page, limit) = normalize_page(query.page, query.limit);

        let (articles, total) = self.read_repo.list_page(&filter, page, limit).await?;
        let items = self.with_modules(articles).await?;

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    pub async fn get_article(&self, query: GetArticleQuery) -> ApplicationResult<ArticleDetailDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let modules = self.module_repo.list_for_article(id).await?;
        let versions = self.version_repo.list_for_article(id).await?;

        Ok(ArticleDetailDto::from_parts(article, modules, versions))
    }

    pub(crate) async fn with_modules(
        &self,
        articles: Vec<Article>,
    ) -> ApplicationResult<Vec<ArticleDto>> {
        let mut items = Vec::with_capacity(articles.len());
        for article in articles {
            let modules = self.module_repo.list_for_article(article.id).await?;
            items.push(ArticleDto::from_parts(article, modules));
        }
        Ok(items)
    }
}

pub(crate) fn normalize_page(page: u32, limit: u32) -> (u32, u32) {
    let page = page.max(1);
    let limit = if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    };
    (page, limit)
}
