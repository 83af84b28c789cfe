// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 抓取请求数据传输对象
///
/// 用于封装客户端发起的公司信息抓取请求
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequestDto {
    /// 要抓取的网页URL
    pub url: String,
    /// 发起请求的用户ID
    pub user_id: String,
}
