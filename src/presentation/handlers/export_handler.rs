// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::dto::company_ids_request::CompanyIdsDto;
use crate::application::usecases::export_companies::ExportCompaniesUseCase;
use crate::domain::services::export_service::{XLSX_CONTENT_TYPE, XLSX_FILE_NAME};
use crate::presentation::errors::AppError;

const EXPORT_FAILED: &str = "Error generating Excel file";

/// 下载公司记录表格
///
/// 行顺序与请求中ID首次出现的顺序一致
pub async fn download(
    Extension(use_case): Extension<Arc<ExportCompaniesUseCase>>,
    payload: Result<Json<CompanyIdsDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::internal(EXPORT_FAILED, e))?;
    let bytes = use_case
        .execute(&payload.parse_ids())
        .await
        .map_err(|e| AppError::internal(EXPORT_FAILED, e))?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", XLSX_FILE_NAME),
            ),
        ],
        bytes,
    ))
}
