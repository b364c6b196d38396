// src/application/commands/modules.rs
use super::articles::ensure_capability;
use crate::{
    application::{
        dto::{AuthenticatedUser, ModuleDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::module::{ModuleId, ModuleName, ModuleRepository, ModuleSlug, ModuleUpdate, NewModule},
};
use std::sync::Arc;

pub struct CreateModuleCommand {
    pub name: String,
    pub slug: String,
    pub active: Option<bool>,
}

pub struct UpdateModuleCommand {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
}

pub struct ModuleCommandService {
    module_repo: Arc<dyn ModuleRepository>,
    clock: Arc<dyn Clock>,
}

impl ModuleCommandService {
    pub fn new(module_repo: Arc<dyn ModuleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { module_repo, clock }
    }

    pub async fn create_module(
        &self,
        actor: &AuthenticatedUser,
        command: CreateModuleCommand,
    ) -> ApplicationResult<ModuleDto> {
        ensure_capability(actor, "modules", "manage")?;

        let name = ModuleName::new(command.name)?;
        let slug = ModuleSlug::new(command.slug)?;
        self.ensure_slug_available(&slug).await?;

        let new_module = NewModule {
            name,
            slug,
            active: command.active.unwrap_or(true),
            created_at: self.clock.now(),
        };

        let created = self.module_repo.insert(new_module).await?;
        Ok(created.into())
    }

    pub async fn update_module(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateModuleCommand,
    ) -> ApplicationResult<ModuleDto> {
        ensure_capability(actor, "modules", "manage")?;

        let id = ModuleId::new(command.id)?;
        let module = self
            .module_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("module not found"))?;

        let mut update = ModuleUpdate::new(id);

        if let Some(name) = command.name {
            update = update.with_name(ModuleName::new(name)?);
        }
        if let Some(slug) = command.slug {
            let slug = ModuleSlug::new(slug)?;
            if slug != module.slug {
                self.ensure_slug_available(&slug).await?;
            }
            update = update.with_slug(slug);
        }
        if let Some(active) = command.active {
            update = update.with_active(active);
        }

        let updated = self.module_repo.update(update).await?;
        Ok(updated.into())
    }

    async fn ensure_slug_available(&self, slug: &ModuleSlug) -> ApplicationResult<()> {
        if self.module_repo.find_by_slug(slug).await?.is_some() {
            return Err(ApplicationError::conflict(
                "a module with this slug already exists",
            ));
        }
        Ok(())
    }
}
