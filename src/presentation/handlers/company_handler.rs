// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::application::dto::{company_ids_request::CompanyIdsDto, company_query::CompanyQueryDto};
use crate::domain::models::company::Company;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::presentation::errors::AppError;

const DELETE_FAILED: &str = "Error deleting companies";

/// 根据ID获取公司记录
///
/// 无法解析为 UUID 的ID与未知ID一样返回 404
pub async fn get_company(
    Path(id): Path<String>,
    Extension(repository): Extension<Arc<dyn CompanyRepository>>,
) -> Result<Json<Company>, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(AppError::not_found("Company not found"));
    };

    match repository.find_by_id(id).await {
        Ok(Some(company)) => Ok(Json(company)),
        Ok(None) => Err(AppError::not_found("Company not found")),
        Err(e) => Err(AppError::internal("Error fetching the company details", e)),
    }
}

/// 列出公司记录，可按 `userId` 过滤
pub async fn list_companies(
    Query(query): Query<CompanyQueryDto>,
    Extension(repository): Extension<Arc<dyn CompanyRepository>>,
) -> Result<Json<Vec<Company>>, AppError> {
    repository
        .list(query.user_id.as_deref())
        .await
        .map(Json)
        .map_err(|e| AppError::internal("Error fetching companies", e))
}

/// 批量删除公司记录，未知ID被忽略
pub async fn delete_companies(
    Extension(repository): Extension<Arc<dyn CompanyRepository>>,
    payload: Result<Json<CompanyIdsDto>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::internal(DELETE_FAILED, e))?;
    let ids = payload.parse_ids();
    let deleted = repository
        .delete_many(&ids)
        .await
        .map_err(|e| AppError::internal(DELETE_FAILED, e))?;

    debug!("Deleted {} of {} requested companies", deleted, payload.ids.len());
    Ok(StatusCode::OK)
}
