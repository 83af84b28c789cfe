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

use migration::{Migrator, MigratorTrait};
use sitemeta::application::usecases::export_companies::ExportCompaniesUseCase;
use sitemeta::application::usecases::scrape_company::ScrapeCompanyUseCase;
use sitemeta::config::settings::Settings;
use sitemeta::domain::repositories::company_repository::CompanyRepository;
use sitemeta::domain::services::extraction_service::ExtractionService;
use sitemeta::engines::chromium_engine::ChromiumCapturer;
use sitemeta::engines::reqwest_engine::ReqwestFetcher;
use sitemeta::engines::traits::{Capturer, Fetcher};
use sitemeta::infrastructure::database::connection;
use sitemeta::infrastructure::repositories::company_repo_impl::CompanyRepositoryImpl;
use sitemeta::presentation::routes::{self, AppComponents};
use sitemeta::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting sitemeta...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let screenshot_dir = PathBuf::from(&settings.storage.screenshot_dir);
    tokio::fs::create_dir_all(&screenshot_dir).await?;

    let repository: Arc<dyn CompanyRepository> = Arc::new(CompanyRepositoryImpl::new(db.clone()));
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(&settings.fetch));
    let capturer: Arc<dyn Capturer> = Arc::new(ChromiumCapturer::new(settings.browser.clone()));

    let scrape_use_case = Arc::new(ScrapeCompanyUseCase::new(
        fetcher,
        Arc::new(ExtractionService::new()),
        capturer,
        repository.clone(),
        screenshot_dir.clone(),
        settings.scrape.rollback_on_failure,
    ));
    let export_use_case = Arc::new(ExportCompaniesUseCase::new(repository.clone()));

    let app = routes::create_app(AppComponents {
        repository,
        scrape_use_case,
        export_use_case,
        screenshot_dir,
    });

    // 5. Start HTTP server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every repository clone) is dropped once serve returns
    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await?,
        Err(_) => warn!("Database connection still shared at shutdown"),
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
