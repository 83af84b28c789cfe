// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use url::Url;

/// 校验目标 URL
///
/// 只接受带主机名的 http/https 地址
pub fn validate_url(url_str: &str) -> Result<Url, FetchError> {
    let url = Url::parse(url_str).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url_str, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(FetchError::InvalidUrl("missing host".to_string()));
    }

    Ok(url)
}
