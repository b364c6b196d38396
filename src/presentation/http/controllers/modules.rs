// src/presentation/http/controllers/modules.rs
use crate::application::{
    commands::modules::{CreateModuleCommand, UpdateModuleCommand},
    dto::{ArticleDto, ModuleDto, PaginatedResult},
    queries::modules::ModuleArticlesQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateModuleRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleArticlesParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

pub async fn create_module(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateModuleRequest>,
) -> HttpResult<(StatusCode, Json<ModuleDto>)> {
    let command = CreateModuleCommand {
        name: payload.name,
        slug: payload.slug,
        active: payload.active,
    };

    let created = state
        .services
        .module_commands
        .create_module(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_module(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateModuleRequest>,
) -> HttpResult<Json<ModuleDto>> {
    let command = UpdateModuleCommand {
        id,
        name: payload.name,
        slug: payload.slug,
        active: payload.active,
    };

    state
        .services
        .module_commands
        .update_module(&user, command)
        .await
        .into_http()
        .map(Json)
}

pub async fn list_module_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<ModuleArticlesParams>,
) -> HttpResult<Json<PaginatedResult<ArticleDto>>> {
    state
        .services
        .module_queries
        .list_module_articles(ModuleArticlesQuery {
            module_id: id,
            page: params.page,
            limit: params.limit,
        })
        .await
        .into_http()
        .map(Json)
}
