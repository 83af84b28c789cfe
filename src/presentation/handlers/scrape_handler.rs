// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{dto::scrape_request::ScrapeRequestDto, usecases::scrape_company::ScrapeCompanyUseCase},
    domain::models::company::Company,
    presentation::errors::AppError,
};

const SCRAPE_FAILED: &str = "Error scraping the website";

/// 抓取并保存公司信息
///
/// 同步执行完整流程，成功返回最终记录，任何失败均返回 500。
/// 请求体缺少字段或无法解析同样按抓取失败处理
pub async fn scrape(
    Extension(use_case): Extension<Arc<ScrapeCompanyUseCase>>,
    payload: Result<Json<ScrapeRequestDto>, JsonRejection>,
) -> Result<Json<Company>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::internal(SCRAPE_FAILED, e))?;
    info!("Scrape requested for {} by {}", payload.url, payload.user_id);

    use_case
        .execute(payload)
        .await
        .map(Json)
        .map_err(|e| AppError::internal(SCRAPE_FAILED, e))
}
