// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::company::Company;
use crate::domain::repositories::company_repository::{CompanyRepository, RepositoryError};
use crate::domain::services::export_service::{ExportError, ExportService};

#[derive(Error, Debug)]
pub enum ExportCompaniesError {
    #[error("Store failed: {0}")]
    Store(#[from] RepositoryError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// 公司记录导出用例
///
/// 行顺序与请求中ID的顺序一致，未知ID被跳过
pub struct ExportCompaniesUseCase {
    repository: Arc<dyn CompanyRepository>,
    exporter: ExportService,
}

impl ExportCompaniesUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self {
            repository,
            exporter: ExportService::new(),
        }
    }

    pub async fn execute(&self, ids: &[Uuid]) -> Result<Vec<u8>, ExportCompaniesError> {
        let found = self.repository.find_by_ids(ids).await?;
        let companies = order_by_ids(found, ids);
        Ok(self.exporter.export(&companies)?)
    }
}

fn order_by_ids(found: Vec<Company>, ids: &[Uuid]) -> Vec<Company> {
    let mut by_id: HashMap<Uuid, Company> = found.into_iter().map(|c| (c.id, c)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
