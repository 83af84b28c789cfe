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

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 页面获取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL 无效或协议不受支持
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非 2xx 响应
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 超时
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// 截图错误类型
#[derive(Error, Debug)]
pub enum CaptureError {
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 截图渲染失败
    #[error("Screenshot failed: {0}")]
    Render(String),
    /// 截图文件写入失败
    #[error("Failed to write screenshot: {0}")]
    Write(#[from] std::io::Error),
    /// 超时
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// 页面获取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 内容类型
    pub content_type: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 页面获取特质
///
/// 对一个 URL 发起一次请求并返回响应文本，不做重试
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 获取页面
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 页面截图特质
///
/// 将 URL 渲染后的视口截图写入目标路径，已存在的文件会被覆盖
#[async_trait]
pub trait Capturer: Send + Sync {
    /// 截图并写入 `target`
    async fn capture(&self, url: &str, target: &Path) -> Result<(), CaptureError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
