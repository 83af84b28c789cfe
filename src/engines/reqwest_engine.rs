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

use crate::config::settings::FetchSettings;
use crate::engines::traits::{FetchError, FetchResponse, Fetcher};
use crate::engines::validators;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// 页面获取引擎
///
/// 基于reqwest实现的基本HTTP获取引擎，每次请求一个 GET，不重试
pub struct ReqwestFetcher {
    timeout: Duration,
    user_agent: String,
}

impl ReqwestFetcher {
    pub fn new(settings: &FetchSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            user_agent: settings.user_agent.clone(),
        }
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::RequestFailed(e)
        }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    /// 执行HTTP获取
    ///
    /// # 参数
    ///
    /// * `url` - 目标地址
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 2xx 响应
    /// * `Err(FetchError)` - URL 无效、网络错误、超时或非 2xx 状态
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let url = validators::validate_url(url)?;

        // Each request gets a fresh client for cookie isolation
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .cookie_store(true)
            .build()?;

        let start = Instant::now();
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} responded with {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("text/html")
            .to_string();

        let content = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(FetchResponse {
            status_code: status.as_u16(),
            content,
            content_type,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
