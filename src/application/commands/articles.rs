// src/application/commands/articles.rs
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, webhook::WritingRequest},
    },
    domain::{
        article::{
            Article, ArticleDescription, ArticleId, ArticleReadRepository, ArticleStatus,
            ArticleTitle, ArticleUpdate, ArticleVersionRepository, ArticleWriteRepository,
            NewArticle, NewArticleVersion, SourceUrl, VersionContent, WrittenContentPatch,
        },
        errors::DomainError,
        module::{ModuleId, ModuleRepository},
    },
};
use std::sync::Arc;

pub struct CreateArticleCommand {
    pub source_url: String,
    pub original_title: String,
    pub original_description: String,
    pub module_ids: Vec<i64>,
}

pub struct DeleteArticleCommand {
    pub id: i64,
}

pub struct RequestWritingCommand {
    pub id: i64,
}

pub struct ReceiveWrittenContentCommand {
    pub article_id: i64,
    pub content: String,
    pub suggested_title: Option<String>,
    pub suggested_description: Option<String>,
    pub score: Option<i32>,
}

pub struct ValidateArticleCommand {
    pub id: i64,
}

pub struct PublishArticleCommand {
    pub id: i64,
}

/// The lifecycle engine. The only place allowed to change an article's
/// status or append versions; HTTP controllers and the webhook callback
/// handler call into it and nothing else mutates articles.
pub struct ArticleCommandService {
    write_repo: Arc<dyn ArticleWriteRepository>,
    read_repo: Arc<dyn ArticleReadRepository>,
    version_repo: Arc<dyn ArticleVersionRepository>,
    module_repo: Arc<dyn ModuleRepository>,
    clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
        module_repo: Arc<dyn ModuleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            version_repo,
            module_repo,
            clock,
        }
    }

    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let source_url = SourceUrl::new(command.source_url)?;
        let original_title = ArticleTitle::new(command.original_title)?;
        let original_description = ArticleDescription::new(command.original_description)?;

        let module_ids = command
            .module_ids
            .into_iter()
            .map(ModuleId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let modules = self.resolve_modules(&module_ids).await?;

        let now = self.clock.now();
        let new_article =
            NewArticle::proposed(source_url, original_title, original_description, now);

        let created = self.write_repo.insert(new_article, &module_ids).await?;
        Ok(ArticleDto::from_parts(created, modules))
    }

    pub async fn delete_article(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "articles", "delete")?;
        let id = ArticleId::new(command.id)?;
        self.find_article(id).await?;
        self.write_repo.delete(id).await?;
        Ok(())
    }

    /// Move the article into `writing`. The outbound webhook send is the
    /// caller's job and happens after this has committed; a delivery
    /// failure must not undo the status change.
    pub async fn request_writing(
        &self,
        actor: &AuthenticatedUser,
        command: RequestWritingCommand,
    ) -> ApplicationResult<(ArticleDto, WritingRequest)> {
        ensure_capability(actor, "articles", "write")?;
        let id = ArticleId::new(command.id)?;
        let mut article = self.find_article(id).await?;

        // Every status currently has an edge to `writing`, but the table
        // stays authoritative.
        if !article.status.can_transition_to(ArticleStatus::Writing) {
            return Err(DomainError::IllegalTransition {
                from: article.status,
                to: ArticleStatus::Writing,
            }
            .into());
        }

        let now = self.clock.now();
        article.set_status(ArticleStatus::Writing, now);

        let update = ArticleUpdate::new(id, article.updated_at).with_status(article.status);
        let updated = self.write_repo.update(update).await?;

        let modules = self.module_repo.list_for_article(id).await?;
        let request = WritingRequest::from_parts(&updated, &modules);
        Ok((ArticleDto::from_parts(updated, modules), request))
    }

    /// Handle the writing-service callback: append the next content version
    /// and apply the suggested metadata in one transaction, then report the
    /// refreshed article. The caller has already checked the shared secret.
    ///
    /// Redelivering the same payload appends another version rather than
    /// deduplicating; the version sequence stays contiguous either way.
    pub async fn receive_written_content(
        &self,
        command: ReceiveWrittenContentCommand,
    ) -> ApplicationResult<ArticleDetailDto> {
        let id = ArticleId::new(command.article_id)?;
        self.find_article(id).await?;
        let content = VersionContent::new(command.content)?;

        let patch = WrittenContentPatch {
            suggested_title: command.suggested_title,
            suggested_description: command.suggested_description,
            score: command.score,
        };

        let now = self.clock.now();
        let mut retried = false;
        let (updated, _version) = loop {
            let next_number = self.version_repo.max_version_number(id).await? + 1;
            let version = NewArticleVersion {
                article_id: id,
                content: content.clone(),
                version_number: next_number,
                created_at: now,
            };
            // Status becomes `written` regardless of where the article was;
            // the suggested fields only change when the payload carried them.
            let update = ArticleUpdate::new(id, now)
                .with_status(ArticleStatus::Written)
                .with_suggestions(&patch);

            match self.write_repo.record_written_content(update, version).await {
                Ok(pair) => break pair,
                Err(DomainError::DuplicateVersionNumber) if !retried => {
                    // Lost a race for the version number; recompute once.
                    retried = true;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        };

        let modules = self.module_repo.list_for_article(id).await?;
        let versions = self.version_repo.list_for_article(id).await?;
        Ok(ArticleDetailDto::from_parts(updated, modules, versions))
    }

    /// Mark the article as validated. Gated only on the article having at
    /// least one version; the current status is deliberately not consulted.
    pub async fn validate_article(
        &self,
        actor: &AuthenticatedUser,
        command: ValidateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "validate")?;
        let id = ArticleId::new(command.id)?;
        let mut article = self.find_article(id).await?;

        if self.version_repo.count_for_article(id).await? == 0 {
            return Err(DomainError::NoVersionsYet.into());
        }

        let now = self.clock.now();
        article.set_status(ArticleStatus::Validated, now);

        let update = ArticleUpdate::new(id, article.updated_at).with_status(article.status);
        let updated = self.write_repo.update(update).await?;

        let modules = self.module_repo.list_for_article(id).await?;
        Ok(ArticleDto::from_parts(updated, modules))
    }

    pub async fn publish_article(
        &self,
        actor: &AuthenticatedUser,
        command: PublishArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;
        let id = ArticleId::new(command.id)?;
        let mut article = self.find_article(id).await?;

        if article.status != ArticleStatus::Validated {
            return Err(DomainError::NotValidated.into());
        }

        let now = self.clock.now();
        article.set_status(ArticleStatus::Published, now);

        let update = ArticleUpdate::new(id, article.updated_at).with_status(article.status);
        let updated = self.write_repo.update(update).await?;

        let modules = self.module_repo.list_for_article(id).await?;
        Ok(ArticleDto::from_parts(updated, modules))
    }

    async fn find_article(&self, id: ArticleId) -> ApplicationResult<Article> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }

    async fn resolve_modules(
        &self,
        module_ids: &[ModuleId],
    ) -> ApplicationResult<Vec<crate::domain::module::Module>> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        let modules = self.module_repo.find_by_ids(module_ids).await?;
        if modules.len() != module_ids.len() {
            let missing: Vec<String> = module_ids
                .iter()
                .filter(|id| !modules.iter().any(|module| module.id == **id))
                .map(ToString::to_string)
                .collect();
            return Err(ApplicationError::validation(format!(
                "module ids not found: {}",
                missing.join(", ")
            )));
        }

        Ok(modules)
    }
}

pub(crate) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}
