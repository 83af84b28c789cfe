// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::{Company, NewCompany};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 公司记录仓库特质
///
/// 定义公司记录的数据访问接口。实现必须能承受并发的创建、更新和删除
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// 创建新记录，分配新的ID，初始状态为 `Pending`
    async fn create(&self, new_company: NewCompany) -> Result<Company, RepositoryError>;

    /// 更新已存在记录的可变字段，ID未知时返回 `NotFound`
    async fn update(&self, company: &Company) -> Result<Company, RepositoryError>;

    /// 根据ID查找记录
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError>;

    /// 根据ID集合查找记录，未知ID被忽略，返回顺序不保证
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Company>, RepositoryError>;

    /// 列出全部记录，或仅列出指定用户的记录。调用方不应依赖返回顺序
    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<Company>, RepositoryError>;

    /// 批量删除，未知ID被静默忽略
    ///
    /// # 返回值
    ///
    /// 实际删除的记录数
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
}
