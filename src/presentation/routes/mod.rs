// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::usecases::export_companies::ExportCompaniesUseCase;
use crate::application::usecases::scrape_company::ScrapeCompanyUseCase;
use crate::domain::models::company::SCREENSHOT_PREFIX;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::presentation::handlers::{company_handler, export_handler, scrape_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// 路由依赖的组件
#[derive(Clone)]
pub struct AppComponents {
    pub repository: Arc<dyn CompanyRepository>,
    pub scrape_use_case: Arc<ScrapeCompanyUseCase>,
    pub export_use_case: Arc<ExportCompaniesUseCase>,
    /// 截图文件目录，通过 `/screenshots` 对外提供
    pub screenshot_dir: PathBuf,
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回不含依赖注入的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let api_routes = Router::new()
        .route("/scrape", post(scrape_handler::scrape))
        .route(
            "/companies",
            get(company_handler::list_companies).delete(company_handler::delete_companies),
        )
        .route("/companies/{id}", get(company_handler::get_company))
        .route("/download", post(export_handler::download));

    Router::new().merge(public_routes).merge(api_routes)
}

/// 创建完整应用
///
/// 在路由之上挂载截图静态文件服务、依赖注入、CORS 和请求追踪
pub fn create_app(components: AppComponents) -> Router {
    routes()
        .nest_service(
            &format!("/{}", SCREENSHOT_PREFIX),
            ServeDir::new(&components.screenshot_dir),
        )
        .layer(Extension(components.repository))
        .layer(Extension(components.scrape_use_case))
        .layer(Extension(components.export_use_case))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
