// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        CreateArticleCommand, DeleteArticleCommand, PublishArticleCommand,
        ReceiveWrittenContentCommand, RequestWritingCommand, ValidateArticleCommand,
    },
    dto::{ArticleDetailDto, ArticleDto, PaginatedResult},
    error::ApplicationError,
    queries::articles::{GetArticleQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use serde_json::json;

const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub source_url: String,
    pub original_title: String,
    pub original_description: String,
    #[serde(default)]
    pub modules: Vec<i64>,
}

/// Payload posted back by the writing service. A field the service left
/// out (or sent as `null`) keeps the article's previous value.
#[derive(Debug, Deserialize)]
pub struct WriteCallbackRequest {
    pub content: String,
    #[serde(default)]
    pub suggested_title: Option<String>,
    #[serde(default)]
    pub suggested_description: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<PaginatedResult<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            status: params.status,
            module_id: params.module_id,
            q: params.q,
            page: params.page,
            limit: params.limit,
        })
        .await
        .into_http()
        .map(Json)
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        source_url: payload.source_url,
        original_title: payload.original_title,
        original_description: payload.original_description,
        module_ids: payload.modules,
    };

    let created = state
        .services
        .article_commands
        .create_article(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDetailDto>> {
    state
        .services
        .article_queries
        .get_article(GetArticleQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .article_commands
        .delete_article(&user, DeleteArticleCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}

/// Move the article into `writing` and hand it to the external writing
/// service. The send happens after the status change has committed and is
/// fire-and-forget: a delivery failure is logged, never reported to the
/// caller, and never rolls the status back.
pub async fn request_writing(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<(StatusCode, Json<serde_json::Value>)> {
    let (article, request) = state
        .services
        .article_commands
        .request_writing(&user, RequestWritingCommand { id })
        .await
        .into_http()?;

    let gateway = state.writing_gateway.clone();
    tokio::spawn(async move {
        if let Err(err) = gateway.send_for_writing(&request).await {
            tracing::warn!(
                article_id = request.article_id,
                error = %err,
                "writing webhook delivery failed"
            );
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "writing_started",
            "article_id": article.id,
        })),
    ))
}

/// Callback endpoint invoked by the writing service, authenticated by the
/// `X-Webhook-Secret` header rather than a bearer token.
pub async fn write_callback(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<WriteCallbackRequest>,
) -> HttpResult<Json<ArticleDetailDto>> {
    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if provided != Some(state.webhook_secret.as_ref()) {
        return Err(HttpError::from_error(ApplicationError::unauthorized(
            "invalid webhook secret",
        )));
    }

    let command = ReceiveWrittenContentCommand {
        article_id: id,
        content: payload.content,
        suggested_title: payload.suggested_title,
        suggested_description: payload.suggested_description,
        score: payload.score,
    };

    state
        .services
        .article_commands
        .receive_written_content(command)
        .await
        .into_http()
        .map(Json)
}

pub async fn validate_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .validate_article(&user, ValidateArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn publish_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .publish_article(&user, PublishArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}
