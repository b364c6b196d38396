// src/domain/article/repository.rs
use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::status::ArticleStatus;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::article::version::{ArticleVersion, NewArticleVersion};
use crate::domain::errors::DomainResult;
use crate::domain::module::ModuleId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ArticleListFilter {
    pub status: Option<ArticleStatus>,
    pub module_id: Option<ModuleId>,
    pub search: Option<String>,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle, module_ids: &[ModuleId]) -> DomainResult<Article>;

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;

    /// Persist a new content version together with the article-row changes
    /// from the write callback. Both commit or neither does. Fails with
    /// `DomainError::DuplicateVersionNumber` when a concurrent writer
    /// already claimed the version number.
    async fn record_written_content(
        &self,
        update: ArticleUpdate,
        version: NewArticleVersion,
    ) -> DomainResult<(Article, ArticleVersion)>;

    /// Deletes the article. Versions and module links cascade.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;

    /// One page of articles plus the total count for the filter, newest
    /// first. `page` is 1-based.
    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Article>, u64)>;
}

/// Read side of the version store. Version creation goes through
/// [`ArticleWriteRepository::record_written_content`] so the version row and
/// the article row always change together.
#[async_trait]
pub trait ArticleVersionRepository: Send + Sync {
    /// Highest version number currently persisted for the article, or 0.
    /// Always computed from durable storage, never cached.
    async fn max_version_number(&self, article_id: ArticleId) -> DomainResult<i32>;

    async fn count_for_article(&self, article_id: ArticleId) -> DomainResult<u64>;

    async fn latest(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>>;

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleVersion>>;
}
