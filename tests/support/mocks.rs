// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use plume_core::application::ApplicationResult;
use plume_core::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use plume_core::application::error::ApplicationError;
use plume_core::application::ports::security::{PasswordHasher, TokenManager};
use plume_core::application::ports::time::Clock;
use plume_core::application::ports::webhook::{WritingGateway, WritingRequest};
use plume_core::domain::article::{
    Article, ArticleId, ArticleUpdate, ArticleVersion, ArticleWriteRepository, NewArticle,
    NewArticleVersion,
};
use plume_core::domain::errors::{DomainError, DomainResult};
use plume_core::domain::module::ModuleId;
use plume_core::domain::user::{Role, UserId};
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-token";

/// Deterministic clock pinned to a known instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 5, 14, 38, 58).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = Utc::now();
        Ok(AuthTokenDto {
            token: TEST_TOKEN.into(),
            issued_at: now,
            expires_at: now + chrono::Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        if token == TEST_TOKEN {
            Ok(admin_user())
        } else {
            Err(ApplicationError::unauthorized("invalid token"))
        }
    }
}

pub fn admin_user() -> AuthenticatedUser {
    let now = Utc::now();
    AuthenticatedUser {
        id: UserId::new(1).unwrap(),
        email: "admin@example.com".into(),
        role: Role::Admin,
        capabilities: Role::Admin.default_capabilities(),
        issued_at: now,
        expires_at: now + chrono::Duration::hours(1),
    }
}

/// Captures every writing request instead of talking to the network.
#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<WritingRequest>>,
}

#[async_trait]
impl WritingGateway for RecordingGateway {
    async fn send_for_writing(&self, request: &WritingRequest) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Always fails, for asserting that delivery failures stay invisible to
/// the caller of the write endpoint.
pub struct FailingGateway;

#[async_trait]
impl WritingGateway for FailingGateway {
    async fn send_for_writing(&self, _request: &WritingRequest) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("connection refused"))
    }
}

/// Write-repository wrapper that makes `record_written_content` lose the
/// version-number race a configured number of times before delegating.
pub struct ContendedWriteRepo {
    inner: Arc<dyn ArticleWriteRepository>,
    failures_left: Mutex<u32>,
}

impl ContendedWriteRepo {
    pub fn new(inner: Arc<dyn ArticleWriteRepository>, failures: u32) -> Self {
        Self {
            inner,
            failures_left: Mutex::new(failures),
        }
    }
}

#[async_trait]
impl ArticleWriteRepository for ContendedWriteRepo {
    async fn insert(&self, article: NewArticle, module_ids: &[ModuleId]) -> DomainResult<Article> {
        self.inner.insert(article, module_ids).await
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        self.inner.update(update).await
    }

    async fn record_written_content(
        &self,
        update: ArticleUpdate,
        version: NewArticleVersion,
    ) -> DomainResult<(Article, ArticleVersion)> {
        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(DomainError::DuplicateVersionNumber);
            }
        }
        self.inner.record_written_content(update, version).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}
