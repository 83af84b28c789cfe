// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use sitemeta::application::usecases::export_companies::ExportCompaniesUseCase;
use sitemeta::application::usecases::scrape_company::ScrapeCompanyUseCase;
use sitemeta::config::settings::{DatabaseSettings, FetchSettings};
use sitemeta::domain::models::company::{Company, NewCompany};
use sitemeta::domain::repositories::company_repository::{CompanyRepository, RepositoryError};
use sitemeta::domain::services::extraction_service::ExtractionService;
use sitemeta::engines::chromium_engine::write_screenshot;
use sitemeta::engines::reqwest_engine::ReqwestFetcher;
use sitemeta::engines::traits::{CaptureError, Capturer, Fetcher};
use sitemeta::infrastructure::database::connection;
use sitemeta::infrastructure::repositories::company_repo_impl::CompanyRepositoryImpl;
use sitemeta::presentation::routes::{self, AppComponents};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// PNG 文件头，桩截图引擎写入的内容
pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const COMPANY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Acme Inc</title>
    <meta name="description" content="We build rockets">
    <link rel="icon" href="/favicon.ico">
</head>
<body>
    <a href="https://www.facebook.com/acme">Facebook</a>
    <a href="https://www.linkedin.com/company/acme">LinkedIn</a>
    <a href="tel:+15551234">+1 555 1234</a>
    <a href="mailto:hello@acme.test">hello@acme.test</a>
    <address>1 Rocket Road</address>
</body>
</html>"#;

/// 内存 SQLite 数据库，已执行迁移
///
/// 连接池固定为单连接，保证所有查询看到同一个内存库
pub async fn create_test_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
        max_lifetime: None,
        sqlx_logging: false,
    };

    let db = connection::create_pool(&settings)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(db)
}

pub fn fetch_settings() -> FetchSettings {
    FetchSettings {
        timeout_secs: 5,
        user_agent: "sitemeta-test".to_string(),
    }
}

/// 启动返回公司页面的模拟站点
pub async fn start_company_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(COMPANY_PAGE),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

/// 截图引擎桩，写入固定的 PNG 头
#[derive(Default)]
pub struct StubCapturer {
    calls: AtomicUsize,
}

impl StubCapturer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Capturer for StubCapturer {
    async fn capture(&self, _url: &str, target: &Path) -> Result<(), CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        write_screenshot(target, FAKE_PNG).await
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// 总是失败的截图引擎
pub struct FailingCapturer;

#[async_trait]
impl Capturer for FailingCapturer {
    async fn capture(&self, _url: &str, _target: &Path) -> Result<(), CaptureError> {
        Err(CaptureError::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// 截图前长时间挂起的引擎，用于模拟请求中途被取消
pub struct SlowCapturer {
    delay: Duration,
    started: AtomicBool,
}

impl SlowCapturer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: AtomicBool::new(false),
        }
    }

    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Capturer for SlowCapturer {
    async fn capture(&self, _url: &str, target: &Path) -> Result<(), CaptureError> {
        self.started.store(true, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        write_screenshot(target, FAKE_PNG).await
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// 第二次写入失败的仓库包装
pub struct FailingUpdateRepository {
    pub inner: Arc<dyn CompanyRepository>,
}

#[async_trait]
impl CompanyRepository for FailingUpdateRepository {
    async fn create(&self, new_company: NewCompany) -> Result<Company, RepositoryError> {
        self.inner.create(new_company).await
    }

    async fn update(&self, _company: &Company) -> Result<Company, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Company>, RepositoryError> {
        self.inner.find_by_ids(ids).await
    }

    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<Company>, RepositoryError> {
        self.inner.list(owner_id).await
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        self.inner.delete_many(ids).await
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db_pool: Arc<DatabaseConnection>,
    pub repository: Arc<dyn CompanyRepository>,
    pub site: MockServer,
    pub capturer: Arc<StubCapturer>,
    // Keep the screenshot directory alive
    pub screenshot_dir: TempDir,
}

impl TestApp {
    pub fn site_url(&self, route: &str) -> String {
        format!("{}{}", self.site.uri(), route)
    }
}

/// 构建完整的测试应用：真实的页面获取与存储，截图引擎使用桩
pub async fn create_test_app() -> TestApp {
    let db_pool = create_test_db().await;
    let repository: Arc<dyn CompanyRepository> =
        Arc::new(CompanyRepositoryImpl::new(db_pool.clone()));
    let site = start_company_site().await;
    let capturer = Arc::new(StubCapturer::default());
    let screenshot_dir = TempDir::new().expect("Failed to create screenshot dir");

    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(&fetch_settings()));
    let scrape_use_case = Arc::new(ScrapeCompanyUseCase::new(
        fetcher,
        Arc::new(ExtractionService::new()),
        capturer.clone(),
        repository.clone(),
        screenshot_dir.path(),
        true,
    ));
    let export_use_case = Arc::new(ExportCompaniesUseCase::new(repository.clone()));

    let app = routes::create_app(AppComponents {
        repository: repository.clone(),
        scrape_use_case,
        export_use_case,
        screenshot_dir: screenshot_dir.path().to_path_buf(),
    });
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        db_pool,
        repository,
        site,
        capturer,
        screenshot_dir,
    }
}

/// 直接写入一条记录
pub async fn seed_company(
    repository: &Arc<dyn CompanyRepository>,
    owner_id: &str,
    name: &str,
) -> Company {
    let mut new_company = NewCompany {
        owner_id: owner_id.to_string(),
        source_url: format!("https://{}.test", name.to_lowercase()),
        fields: Default::default(),
    };
    new_company.fields.name = Some(name.to_string());

    repository
        .create(new_company)
        .await
        .expect("Failed to seed company")
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("not a zip archive");
    let mut part = archive.by_name(name).expect("missing workbook part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("workbook part is not UTF-8");
    xml
}

fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = text[start..].find(close)? + start;
    Some(&text[start..end])
}

/// 读取导出表格第一个工作表的单元格，键为单元格引用（如 `A1`）
pub fn sheet_cells(bytes: &[u8]) -> BTreeMap<String, String> {
    let strings: Vec<String> = read_part(bytes, "xl/sharedStrings.xml")
        .split("<si>")
        .skip(1)
        .filter_map(|si| {
            let t = &si[si.find("<t")?..];
            between(t, ">", "</t>").map(str::to_string)
        })
        .collect();

    read_part(bytes, "xl/worksheets/sheet1.xml")
        .split("<c r=\"")
        .skip(1)
        .filter_map(|cell| {
            let cell = &cell[..cell.find("</c>").unwrap_or(cell.len())];
            let reference = cell[..cell.find('"')?].to_string();
            let raw = between(cell, "<v>", "</v>")?;
            let tag = &cell[..cell.find('>')?];
            let value = if tag.contains("t=\"s\"") {
                strings.get(raw.parse::<usize>().ok()?)?.clone()
            } else {
                raw.to_string()
            };
            Some((reference, value))
        })
        .collect()
}
