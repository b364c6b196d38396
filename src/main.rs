use anyhow::Result;
use plume_core::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
        webhook::WritingGateway,
    },
    services::ApplicationServices,
};
use plume_core::config::AppConfig;
use plume_core::domain::{
    article::{ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository},
    module::ModuleRepository,
    user::UserRepository,
};
use plume_core::infrastructure::{
    database,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleVersionRepository,
        PostgresArticleWriteRepository, PostgresModuleRepository, PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    webhook::MakeWebhookClient,
};
use plume_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(PostgresArticleWriteRepository::new(pool.clone()));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(PostgresArticleReadRepository::new(pool.clone()));
    let version_repo: Arc<dyn ArticleVersionRepository> =
        Arc::new(PostgresArticleVersionRepository::new(pool.clone()));
    let module_repo: Arc<dyn ModuleRepository> =
        Arc::new(PostgresModuleRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let writing_gateway: Arc<dyn WritingGateway> =
        Arc::new(MakeWebhookClient::new(config.webhook_url())?);

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        version_repo,
        module_repo,
        user_repo,
        password_hasher,
        token_manager,
        clock,
    ));

    let state = HttpState {
        services,
        writing_gateway,
        webhook_secret: Arc::from(config.webhook_secret()),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
