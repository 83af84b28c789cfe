// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// 应用错误类型
///
/// 对外只暴露状态码和固定的纯文本提示，底层错误仅写入日志
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// 500 错误，记录底层原因
    pub fn internal<E>(message: &'static str, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            source: Some(err.into()),
        }
    }

    /// 404 错误
    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
            source: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(source) = &self.source {
            error!("{}: {:#}", self.message, source);
        }

        (self.status, self.message).into_response()
    }
}
