// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{CaptureError, Capturer};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 单次截图使用的浏览器会话
///
/// 本地模式下拥有浏览器进程和临时用户目录，`close` 负责关闭进程并回收；
/// 远程模式下只持有 DevTools 连接，不关闭远端浏览器
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    owns_process: bool,
    // Dropped after the browser exits
    _profile_dir: Option<TempDir>,
}

impl BrowserSession {
    async fn launch(settings: &BrowserSettings) -> Result<Self, CaptureError> {
        let profile_dir = TempDir::new()?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(settings.timeout())
            .window_size(settings.viewport_width, settings.viewport_height)
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                ..Default::default()
            })
            .user_data_dir(profile_dir.path());

        if let Some(chrome_path) = &settings.chrome_path {
            builder = builder.chrome_executable(chrome_path);
        }

        // Production environment setup
        builder = builder
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--hide-scrollbars");

        let config = builder.build().map_err(CaptureError::Launch)?;
        let (browser, handler) = Browser::launch(config)
            .await
            .map_err(|e| CaptureError::Launch(e.to_string()))?;

        Ok(Self {
            browser,
            handler: Self::spawn_handler(handler),
            owns_process: true,
            _profile_dir: Some(profile_dir),
        })
    }

    async fn connect(remote_url: &str) -> Result<Self, CaptureError> {
        debug!("Connecting to remote Chrome instance at: {}", remote_url);
        let (browser, handler) = Browser::connect(remote_url)
            .await
            .map_err(|e| CaptureError::Launch(format!("Failed to connect to remote Chrome: {}", e)))?;

        Ok(Self {
            browser,
            handler: Self::spawn_handler(handler),
            owns_process: false,
            _profile_dir: None,
        })
    }

    // Spawn a handler to process browser events
    fn spawn_handler(mut handler: chromiumoxide::Handler) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        })
    }

    async fn close(mut self) {
        if self.owns_process {
            if let Err(e) = self.browser.close().await {
                warn!("Failed to close browser gracefully: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                warn!("Failed to wait for browser process: {}", e);
            }
        }
        self.handler.abort();
    }
}

/// 浏览器截图引擎
///
/// 基于chromiumoxide驱动无头 Chromium。每次调用启动一个浏览器进程，
/// 截图完成后无论成功、失败还是超时都会关闭
pub struct ChromiumCapturer {
    settings: BrowserSettings,
}

impl ChromiumCapturer {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    async fn open_session(&self) -> Result<BrowserSession, CaptureError> {
        match &self.settings.remote_url {
            Some(url) => BrowserSession::connect(url).await,
            None => BrowserSession::launch(&self.settings).await,
        }
    }

    async fn render(browser: &Browser, url: &str, target: &Path) -> Result<(), CaptureError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| CaptureError::Navigation(e.to_string()))?;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .build();

        let bytes = page
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::Render(e.to_string()));

        // Pages on a remote browser outlive the connection unless closed
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        write_screenshot(target, &bytes?).await
    }
}

/// 写入截图文件，必要时创建父目录，覆盖已存在的文件
pub async fn write_screenshot(target: &Path, bytes: &[u8]) -> Result<(), CaptureError> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(target, bytes).await?;
    Ok(())
}

#[async_trait]
impl Capturer for ChromiumCapturer {
    /// 执行截图
    ///
    /// # 参数
    ///
    /// * `url` - 目标地址
    /// * `target` - 截图写入路径
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 截图已写入
    /// * `Err(CaptureError)` - 启动、导航、渲染、写入失败或超时
    async fn capture(&self, url: &str, target: &Path) -> Result<(), CaptureError> {
        let start = Instant::now();
        let timeout: Duration = self.settings.timeout();
        // Launch or connect, navigation and capture share one deadline
        let deadline = tokio::time::Instant::now() + timeout;

        let session = tokio::time::timeout_at(deadline, self.open_session())
            .await
            .map_err(|_| CaptureError::Timeout(timeout))??;
        let outcome =
            tokio::time::timeout_at(deadline, Self::render(&session.browser, url, target)).await;
        session.close().await;

        match outcome {
            Ok(Ok(())) => {
                info!(
                    "Captured {} to {} in {}ms",
                    url,
                    target.display(),
                    start.elapsed().as_millis()
                );
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CaptureError::Timeout(timeout)),
        }
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
