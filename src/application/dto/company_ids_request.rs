// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use uuid::Uuid;

/// 公司ID列表请求体，用于批量删除与导出
#[derive(Debug, Default, Deserialize)]
pub struct CompanyIdsDto {
    #[serde(default)]
    pub ids: Vec<String>,
}

impl CompanyIdsDto {
    /// 解析ID，保持请求中的顺序并去重；无法解析的ID视为未知ID直接忽略
    pub fn parse_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = Vec::with_capacity(self.ids.len());
        for raw in &self.ids {
            if let Ok(id) = Uuid::parse_str(raw) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}
