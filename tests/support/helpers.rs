// tests/support/helpers.rs
use super::memory::InMemoryDb;
use super::mocks::{DummyPasswordHasher, DummyTokenManager, FixedClock, RecordingGateway};
use plume_core::application::ports::{
    security::{PasswordHasher, TokenManager},
    time::Clock,
    webhook::WritingGateway,
};
use plume_core::application::services::ApplicationServices;
use plume_core::domain::article::{
    ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository,
};
use plume_core::domain::module::ModuleRepository;
use plume_core::domain::user::UserRepository;
use plume_core::presentation::http::{routes::build_router, state::HttpState};
use std::sync::Arc;

pub const WEBHOOK_SECRET: &str = "hook-secret";

pub struct TestContext {
    pub db: Arc<InMemoryDb>,
    pub services: Arc<ApplicationServices>,
    pub gateway: Arc<RecordingGateway>,
}

pub fn build_test_context() -> TestContext {
    let db = Arc::new(InMemoryDb::new());
    let services = build_services(Arc::clone(&db));
    let gateway = Arc::new(RecordingGateway::default());
    TestContext {
        db,
        services,
        gateway,
    }
}

pub fn build_services(db: Arc<InMemoryDb>) -> Arc<ApplicationServices> {
    let write_repo: Arc<dyn ArticleWriteRepository> = db.clone();
    let read_repo: Arc<dyn ArticleReadRepository> = db.clone();
    let version_repo: Arc<dyn ArticleVersionRepository> = db.clone();
    let module_repo: Arc<dyn ModuleRepository> = db.clone();
    let user_repo: Arc<dyn UserRepository> = db.clone();
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(DummyPasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(DummyTokenManager);
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());

    Arc::new(ApplicationServices::new(
        write_repo,
        read_repo,
        version_repo,
        module_repo,
        user_repo,
        password_hasher,
        token_manager,
        clock,
    ))
}

pub fn make_test_router() -> (axum::Router, TestContext) {
    let context = build_test_context();
    let gateway: Arc<dyn WritingGateway> = context.gateway.clone();
    let state = HttpState {
        services: Arc::clone(&context.services),
        writing_gateway: gateway,
        webhook_secret: Arc::from(WEBHOOK_SECRET),
    };
    (build_router(state), context)
}
