// tests/support/memory.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plume_core::domain::article::{
    Article, ArticleId, ArticleListFilter, ArticleReadRepository, ArticleStatus, ArticleUpdate,
    ArticleVersion, ArticleVersionRepository, ArticleWriteRepository, NewArticle,
    NewArticleVersion,
};
use plume_core::domain::errors::{DomainError, DomainResult};
use plume_core::domain::module::{
    Module, ModuleId, ModuleRepository, ModuleSlug, ModuleUpdate, NewModule,
};
use plume_core::domain::user::{Email, NewUser, User, UserId, UserRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    articles: HashMap<i64, Article>,
    versions: Vec<ArticleVersion>,
    modules: HashMap<i64, Module>,
    article_modules: HashSet<(i64, i64)>,
    users: HashMap<i64, User>,
    next_article_id: i64,
    next_version_id: i64,
    next_module_id: i64,
    next_user_id: i64,
}

/// Single in-memory store backing every repository trait, so one instance
/// can be handed to the application services in place of Postgres.
#[derive(Default)]
pub struct InMemoryDb {
    inner: Mutex<Inner>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an article directly with the given status, bypassing the
    /// lifecycle engine. Returns the article.
    pub fn seed_article(&self, status: ArticleStatus, now: DateTime<Utc>) -> Article {
        let mut inner = self.inner.lock().unwrap();
        inner.next_article_id += 1;
        let id = inner.next_article_id;
        let article = Article {
            id: ArticleId::new(id).unwrap(),
            source_url: plume_core::domain::article::SourceUrl::new(format!(
                "https://example.com/posts/{id}"
            ))
            .unwrap(),
            original_title: plume_core::domain::article::ArticleTitle::new(format!(
                "Proposal {id}"
            ))
            .unwrap(),
            original_description: plume_core::domain::article::ArticleDescription::new(
                "An interesting subject",
            )
            .unwrap(),
            suggested_title: None,
            suggested_description: None,
            score: None,
            status,
            created_at: now,
            updated_at: now,
        };
        inner.articles.insert(id, article.clone());
        article
    }

    /// Append a version row directly, keeping the sequence contiguous.
    pub fn seed_version(&self, article_id: ArticleId, content: &str, now: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();
        let next_number = inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0)
            + 1;
        inner.next_version_id += 1;
        let id = inner.next_version_id;
        inner.versions.push(ArticleVersion {
            id,
            article_id,
            content: plume_core::domain::article::VersionContent::new(content).unwrap(),
            version_number: next_number,
            created_at: now,
        });
    }

    pub fn article(&self, id: ArticleId) -> Option<Article> {
        self.inner.lock().unwrap().articles.get(&i64::from(id)).cloned()
    }
}

fn apply_update(article: &mut Article, update: &ArticleUpdate) {
    if let Some(title) = &update.suggested_title {
        article.suggested_title = Some(title.clone());
    }
    if let Some(description) = &update.suggested_description {
        article.suggested_description = Some(description.clone());
    }
    if let Some(score) = update.score {
        article.score = Some(score);
    }
    if let Some(status) = update.status {
        article.status = status;
    }
    article.updated_at = update.updated_at;
}

#[async_trait]
impl ArticleWriteRepository for InMemoryDb {
    async fn insert(&self, article: NewArticle, module_ids: &[ModuleId]) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        for module_id in module_ids {
            if !inner.modules.contains_key(&i64::from(*module_id)) {
                return Err(DomainError::NotFound("module not found".into()));
            }
        }
        inner.next_article_id += 1;
        let id = inner.next_article_id;
        let stored = Article {
            id: ArticleId::new(id)?,
            source_url: article.source_url,
            original_title: article.original_title,
            original_description: article.original_description,
            suggested_title: None,
            suggested_description: None,
            score: None,
            status: article.status,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        inner.articles.insert(id, stored.clone());
        for module_id in module_ids {
            inner.article_modules.insert((id, i64::from(*module_id)));
        }
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut inner = self.inner.lock().unwrap();
        let article = inner
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        apply_update(article, &update);
        Ok(article.clone())
    }

    async fn record_written_content(
        &self,
        update: ArticleUpdate,
        version: NewArticleVersion,
    ) -> DomainResult<(Article, ArticleVersion)> {
        let mut inner = self.inner.lock().unwrap();

        let taken = inner.versions.iter().any(|v| {
            v.article_id == version.article_id && v.version_number == version.version_number
        });
        if taken {
            return Err(DomainError::DuplicateVersionNumber);
        }

        inner.next_version_id += 1;
        let stored_version = ArticleVersion {
            id: inner.next_version_id,
            article_id: version.article_id,
            content: version.content,
            version_number: version.version_number,
            created_at: version.created_at,
        };
        inner.versions.push(stored_version.clone());

        let article = inner
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        apply_update(article, &update);

        Ok((article.clone(), stored_version))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let raw = i64::from(id);
        if inner.articles.remove(&raw).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        inner.versions.retain(|v| v.article_id != id);
        inner.article_modules.retain(|(article, _)| *article != raw);
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryDb {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.article(id))
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let inner = self.inner.lock().unwrap();
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<Article> = inner
            .articles
            .values()
            .filter(|article| {
                filter.status.is_none_or(|status| article.status == status)
            })
            .filter(|article| {
                filter.module_id.is_none_or(|module_id| {
                    inner
                        .article_modules
                        .contains(&(i64::from(article.id), i64::from(module_id)))
                })
            })
            .filter(|article| {
                needle.as_deref().is_none_or(|needle| {
                    article
                        .original_title
                        .as_str()
                        .to_lowercase()
                        .contains(needle)
                        || article
                            .suggested_title
                            .as_deref()
                            .is_some_and(|title| title.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(i64::from(b.id).cmp(&i64::from(a.id)))
        });

        let total = matched.len() as u64;
        let start = ((page.max(1) - 1) * limit) as usize;
        let items = matched
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }
}

#[async_trait]
impl ArticleVersionRepository for InMemoryDb {
    async fn max_version_number(&self, article_id: ArticleId) -> DomainResult<i32> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0))
    }

    async fn count_for_article(&self, article_id: ArticleId) -> DomainResult<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .count() as u64)
    }

    async fn latest(&self, article_id: ArticleId) -> DomainResult<Option<ArticleVersion>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .max_by_key(|v| v.version_number)
            .cloned())
    }

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleVersion>> {
        let inner = self.inner.lock().unwrap();
        let mut versions: Vec<ArticleVersion> = inner
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .cloned()
            .collect();
        versions.sort_by_key(|v| v.version_number);
        Ok(versions)
    }
}

#[async_trait]
impl ModuleRepository for InMemoryDb {
    async fn insert(&self, module: NewModule) -> DomainResult<Module> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .modules
            .values()
            .any(|existing| existing.slug == module.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        inner.next_module_id += 1;
        let id = inner.next_module_id;
        let stored = Module {
            id: ModuleId::new(id)?,
            name: module.name,
            slug: module.slug,
            active: module.active,
            created_at: module.created_at,
        };
        inner.modules.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ModuleUpdate) -> DomainResult<Module> {
        let mut inner = self.inner.lock().unwrap();
        let module = inner
            .modules
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("module not found".into()))?;
        if let Some(name) = update.name {
            module.name = name;
        }
        if let Some(slug) = update.slug {
            module.slug = slug;
        }
        if let Some(active) = update.active {
            module.active = active;
        }
        Ok(module.clone())
    }

    async fn find_by_id(&self, id: ModuleId) -> DomainResult<Option<Module>> {
        Ok(self.inner.lock().unwrap().modules.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &ModuleSlug) -> DomainResult<Option<Module>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .modules
            .values()
            .find(|module| module.slug == *slug)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[ModuleId]) -> DomainResult<Vec<Module>> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.modules.get(&i64::from(*id)).cloned())
            .collect())
    }

    async fn list_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Module>> {
        let inner = self.inner.lock().unwrap();
        let raw = i64::from(article_id);
        let mut modules: Vec<Module> = inner
            .article_modules
            .iter()
            .filter(|(article, _)| *article == raw)
            .filter_map(|(_, module)| inner.modules.get(module).cloned())
            .collect();
        modules.sort_by_key(|module| i64::from(module.id));
        Ok(modules)
    }
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.inner.lock().unwrap().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .values()
            .any(|existing| existing.email == new_user.email)
        {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let stored = User {
            id: UserId::new(id)?,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        inner.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.get(&i64::from(id)).cloned())
    }
}
