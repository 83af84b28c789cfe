// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::dto::scrape_request::ScrapeRequestDto;
use crate::domain::models::company::{Company, NewCompany};
use crate::domain::repositories::company_repository::{CompanyRepository, RepositoryError};
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{CaptureError, Capturer, FetchError, Fetcher};

/// 抓取流程错误类型
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("Store failed: {0}")]
    Store(#[from] RepositoryError),
}

// === Section: Use Case Definition ===

/// 公司信息抓取用例
///
/// 依次执行：获取页面 → 提取字段 → 创建 `Pending` 记录 → 截图 → 更新为 `Captured`。
/// 任何一步失败都会中止整个请求，不重试。截图或第二次写入失败时，
/// 若开启回滚则删除已创建的记录和已写入的截图文件；请求在首次写入后被取消时同样回滚。
/// 记录中保存的截图路径是相对路径 `screenshots/<id>.png`
pub struct ScrapeCompanyUseCase {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<ExtractionService>,
    capturer: Arc<dyn Capturer>,
    repository: Arc<dyn CompanyRepository>,
    screenshot_dir: PathBuf,
    rollback_on_failure: bool,
}

// === Section: Implementation ===

impl ScrapeCompanyUseCase {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<ExtractionService>,
        capturer: Arc<dyn Capturer>,
        repository: Arc<dyn CompanyRepository>,
        screenshot_dir: impl Into<PathBuf>,
        rollback_on_failure: bool,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            capturer,
            repository,
            screenshot_dir: screenshot_dir.into(),
            rollback_on_failure,
        }
    }

    pub async fn execute(&self, request: ScrapeRequestDto) -> Result<Company, ScrapeError> {
        let ScrapeRequestDto { url, user_id } = request;

        let response = self.fetcher.fetch(&url).await?;
        debug!(
            "Fetched {} via {} ({} bytes, {}ms)",
            url,
            self.fetcher.name(),
            response.content.len(),
            response.response_time_ms
        );

        let fields = self.extractor.extract(&response.content);

        let mut company = self
            .repository
            .create(NewCompany {
                owner_id: user_id,
                source_url: url.clone(),
                fields,
            })
            .await?;
        info!("Created pending company {} for {}", company.id, url);

        let target = self.screenshot_dir.join(company.screenshot_file_name());
        let guard = RollbackGuard::new(
            self.repository.clone(),
            company.id,
            target.clone(),
            self.rollback_on_failure,
        );

        if let Err(e) = self.capturer.capture(&url, &target).await {
            guard.rollback().await;
            return Err(e.into());
        }

        company.mark_captured(company.screenshot_relative_path());

        match self.repository.update(&company).await {
            Ok(updated) => {
                guard.disarm();
                info!("Company {} captured", updated.id);
                Ok(updated)
            }
            Err(e) => {
                guard.rollback().await;
                Err(e.into())
            }
        }
    }
}

/// 首次写入之后的回滚守卫
///
/// 截图或第二次写入失败时由调用方显式回滚；请求被取消（future 被丢弃）时，
/// 在 `Drop` 中把回滚交给运行时后台执行。成功后调用 `disarm` 解除
struct RollbackGuard {
    repository: Arc<dyn CompanyRepository>,
    id: Uuid,
    screenshot: PathBuf,
    enabled: bool,
    armed: bool,
}

impl RollbackGuard {
    fn new(
        repository: Arc<dyn CompanyRepository>,
        id: Uuid,
        screenshot: PathBuf,
        enabled: bool,
    ) -> Self {
        Self {
            repository,
            id,
            screenshot,
            enabled,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }

    async fn rollback(mut self) {
        self.armed = false;

        if !self.enabled {
            warn!("Leaving company {} in pending state after failure", self.id);
            return;
        }

        remove_company(self.repository.as_ref(), self.id, &self.screenshot).await;
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        if !self.enabled {
            warn!("Scrape of company {} cancelled, leaving it pending", self.id);
            return;
        }

        let repository = self.repository.clone();
        let id = self.id;
        let screenshot = self.screenshot.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!("Scrape of company {} cancelled, rolling back", id);
                handle.spawn(async move {
                    remove_company(repository.as_ref(), id, &screenshot).await;
                });
            }
            Err(_) => error!("No runtime available to roll back company {}", id),
        }
    }
}

async fn remove_company(repository: &dyn CompanyRepository, id: Uuid, screenshot: &Path) {
    if let Err(e) = repository.delete_many(&[id]).await {
        error!("Failed to roll back company {}: {}", id, e);
    }

    match tokio::fs::remove_file(screenshot).await {
        Ok(()) => debug!("Removed screenshot {}", screenshot.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove screenshot {}: {}", screenshot.display(), e),
    }
}
