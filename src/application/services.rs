// src/application/services.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService, modules::ModuleCommandService,
            users::UserCommandService,
        },
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{articles::ArticleQueryService, modules::ModuleQueryService},
    },
    domain::{
        article::{ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository},
        module::ModuleRepository,
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub module_commands: Arc<ModuleCommandService>,
    pub module_queries: Arc<ModuleQueryService>,
    pub user_commands: Arc<UserCommandService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        version_repo: Arc<dyn ArticleVersionRepository>,
        module_repo: Arc<dyn ModuleRepository>,
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&version_repo),
            Arc::clone(&module_repo),
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&version_repo),
            Arc::clone(&module_repo),
        ));

        let module_commands = Arc::new(ModuleCommandService::new(
            Arc::clone(&module_repo),
            Arc::clone(&clock),
        ));

        let module_queries = Arc::new(ModuleQueryService::new(
            Arc::clone(&module_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&article_queries),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        Self {
            article_commands,
            article_queries,
            module_commands,
            module_queries,
            user_commands,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
