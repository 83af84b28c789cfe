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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、抓取、浏览器、存储和抓取流程等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 页面抓取配置
    pub fetch: FetchSettings,
    /// 无头浏览器配置
    pub browser: BrowserSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 抓取流程配置
    pub scrape: ScrapeSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
    /// 连接最长存活时间（秒），内存 SQLite 忽略该项
    pub max_lifetime: Option<u64>,
    /// 是否输出 SQL 语句日志
    #[serde(default)]
    pub sqlx_logging: bool,
}

/// 页面抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 无头浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 导航与截图的总超时时间（秒）
    pub timeout_secs: u64,
    /// 视口宽度（像素）
    pub viewport_width: u32,
    /// 视口高度（像素）
    pub viewport_height: u32,
    /// Chrome/Chromium 可执行文件路径（为空时自动探测）
    pub chrome_path: Option<String>,
    /// 远程 DevTools 地址（设置后不再启动本地浏览器进程）
    pub remote_url: Option<String>,
}

impl BrowserSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 截图文件目录
    pub screenshot_dir: String,
}

/// 抓取流程配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeSettings {
    /// 截图或第二次写入失败时是否删除已创建的记录
    pub rollback_on_failure: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `SITEMETA__` 前缀的环境变量，后者覆盖前者
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SITEMETA").separator("__"));

        builder.build()?.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Default DB settings
            .set_default("database.url", "sqlite://sitemeta.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("database.max_lifetime", 3600)?
            .set_default("database.sqlx_logging", false)?
            // Fetch
            .set_default("fetch.timeout_secs", 30)?
            .set_default(
                "fetch.user_agent",
                "Mozilla/5.0 (compatible; sitemeta/0.1; +https://github.com/Kirky-X)",
            )?
            // Browser
            .set_default("browser.timeout_secs", 45)?
            .set_default("browser.viewport_width", 1280)?
            .set_default("browser.viewport_height", 800)?
            // Storage
            .set_default("storage.screenshot_dir", "screenshots")?
            // Pipeline
            .set_default("scrape.rollback_on_failure", true)
    }
}
