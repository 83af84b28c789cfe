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

use crate::domain::models::company::{Company, CompanyStatus, NewCompany};
use crate::domain::repositories::company_repository::{CompanyRepository, RepositoryError};
use crate::infrastructure::database::entities::company as company_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 公司记录仓库实现
pub struct CompanyRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CompanyRepositoryImpl {
    /// 创建新的公司记录仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的公司记录仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(m: company_entity::Model) -> Result<Company, RepositoryError> {
        let status = m.status.parse::<CompanyStatus>().map_err(|_| {
            RepositoryError::Database(DbErr::Custom(format!(
                "Invalid company status: {}",
                m.status
            )))
        })?;

        Ok(Company {
            id: m.id,
            owner_id: m.owner_id,
            source_url: m.source_url,
            name: m.name,
            description: m.description,
            logo_url: m.logo_url,
            facebook_url: m.facebook_url,
            linkedin_url: m.linkedin_url,
            twitter_url: m.twitter_url,
            instagram_url: m.instagram_url,
            address: m.address,
            phone: m.phone,
            email: m.email,
            screenshot_path: m.screenshot_path,
            status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }

    fn to_domain_all(models: Vec<company_entity::Model>) -> Result<Vec<Company>, RepositoryError> {
        models.into_iter().map(Self::to_domain).collect()
    }
}

#[async_trait]
impl CompanyRepository for CompanyRepositoryImpl {
    async fn create(&self, new_company: NewCompany) -> Result<Company, RepositoryError> {
        let company = Company::new(new_company);

        let model = company_entity::ActiveModel {
            id: Set(company.id),
            owner_id: Set(company.owner_id.clone()),
            source_url: Set(company.source_url.clone()),
            name: Set(company.name.clone()),
            description: Set(company.description.clone()),
            logo_url: Set(company.logo_url.clone()),
            facebook_url: Set(company.facebook_url.clone()),
            linkedin_url: Set(company.linkedin_url.clone()),
            twitter_url: Set(company.twitter_url.clone()),
            instagram_url: Set(company.instagram_url.clone()),
            address: Set(company.address.clone()),
            phone: Set(company.phone.clone()),
            email: Set(company.email.clone()),
            screenshot_path: Set(company.screenshot_path.clone()),
            status: Set(company.status.to_string()),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(company)
    }

    async fn update(&self, company: &Company) -> Result<Company, RepositoryError> {
        let mut model: company_entity::ActiveModel = company_entity::Entity::find_by_id(company.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        // id, owner_id, source_url and created_at are immutable
        model.name = Set(company.name.clone());
        model.description = Set(company.description.clone());
        model.logo_url = Set(company.logo_url.clone());
        model.facebook_url = Set(company.facebook_url.clone());
        model.linkedin_url = Set(company.linkedin_url.clone());
        model.twitter_url = Set(company.twitter_url.clone());
        model.instagram_url = Set(company.instagram_url.clone());
        model.address = Set(company.address.clone());
        model.phone = Set(company.phone.clone());
        model.email = Set(company.email.clone());
        model.screenshot_path = Set(company.screenshot_path.clone());
        model.status = Set(company.status.to_string());
        model.updated_at = Set(company.updated_at);

        let updated = model.update(self.db.as_ref()).await?;
        Self::to_domain(updated)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError> {
        let model = company_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        model.map(Self::to_domain).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Company>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = company_entity::Entity::find()
            .filter(company_entity::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;

        Self::to_domain_all(models)
    }

    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<Company>, RepositoryError> {
        let mut query = company_entity::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(company_entity::Column::OwnerId.eq(owner_id));
        }

        let models = query
            .order_by_asc(company_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Self::to_domain_all(models)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = company_entity::Entity::delete_many()
            .filter(company_entity::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}
