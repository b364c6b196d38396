// src/application/commands/users.rs
use super::articles::ensure_capability;
use crate::{
    application::{
        dto::{AuthTokenDto, AuthenticatedUser, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
        ports::{security::PasswordHasher, security::TokenManager, time::Clock},
    },
    domain::user::{Email, NewUser, PasswordHash, Role, UserRepository},
};
use std::sync::Arc;

pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

pub struct UserCommandService {
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_manager: Arc<dyn TokenManager>,
    clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            token_manager,
            clock,
        }
    }

    /// The very first registration bootstraps the admin account without
    /// authentication; afterwards only admins may create users.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        let existing = self.user_repo.count().await?;
        let role = self.determine_role(existing, actor, command.role)?;

        if existing > 0 && self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(email, password_hash, role, self.clock.now());

        let user = self.user_repo.insert(new_user).await?;
        Ok(user.into())
    }

    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let email = Email::new(command.email)
            .map_err(|_| ApplicationError::unauthorized("invalid credentials"))?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        if !user.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        self.password_hasher
            .verify(&command.password, user.password_hash.as_str())
            .await?;

        let subject = TokenSubject {
            user_id: user.id,
            email: user.email.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        };
        let token = self.token_manager.issue(subject).await?;

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    fn determine_role(
        &self,
        existing: u64,
        actor: Option<&AuthenticatedUser>,
        role: Option<Role>,
    ) -> ApplicationResult<Role> {
        if existing == 0 {
            return Ok(Role::Admin);
        }
        let requester = actor
            .ok_or_else(|| ApplicationError::forbidden("administrative privileges are required"))?;
        ensure_capability(requester, "users", "create")?;
        Ok(role.unwrap_or_default())
    }
}

fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.len() < 8 {
        return Err(ApplicationError::validation(
            "password must be at least 8 characters long",
        ));
    }
    Ok(())
}
