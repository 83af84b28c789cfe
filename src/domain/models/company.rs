// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 截图静态文件的路由前缀，也是记录中截图路径的首段
pub const SCREENSHOT_PREFIX: &str = "screenshots";

/// 公司记录实体
///
/// 一次抓取请求产出的唯一持久化实体。记录分两次写入：
/// 第一次写入全部提取字段（`Pending`），截图成功后第二次写入截图路径（`Captured`）。
/// 两次写入之间记录已经对查询和列表可见。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// 记录唯一标识符，创建时分配，之后不可变
    pub id: Uuid,
    /// 发起请求的用户ID，不做校验
    pub owner_id: String,
    /// 被抓取的页面地址
    pub source_url: String,
    /// 公司名称
    pub name: Option<String>,
    /// 公司描述
    pub description: Option<String>,
    /// Logo 地址，未相对页面解析
    pub logo_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    /// 地址文本，原样保存
    pub address: Option<String>,
    /// 电话文本，原样保存
    pub phone: Option<String>,
    /// 邮箱文本，原样保存
    pub email: Option<String>,
    /// 截图相对路径，仅在截图成功后存在
    pub screenshot_path: Option<String>,
    /// 记录状态
    pub status: CompanyStatus,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 记录状态枚举
///
/// 状态转换只有一条路径：Pending → Captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    /// 已写入提取字段，尚无截图
    #[default]
    Pending,
    /// 截图已保存并记录路径
    Captured,
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompanyStatus::Pending => write!(f, "pending"),
            CompanyStatus::Captured => write!(f, "captured"),
        }
    }
}

impl FromStr for CompanyStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CompanyStatus::Pending),
            "captured" => Ok(CompanyStatus::Captured),
            _ => Err(()),
        }
    }
}

/// 从页面提取出的字段集合
///
/// 所有字段均可缺失；缺失表示没有规则命中，不是错误
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// 可提取字段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    Name,
    Description,
    LogoUrl,
    FacebookUrl,
    LinkedinUrl,
    TwitterUrl,
    InstagramUrl,
    Address,
    Phone,
    Email,
}

impl CompanyFields {
    /// 获取字段的可变引用，供规则表按字段写入
    pub fn slot_mut(&mut self, field: CompanyField) -> &mut Option<String> {
        match field {
            CompanyField::Name => &mut self.name,
            CompanyField::Description => &mut self.description,
            CompanyField::LogoUrl => &mut self.logo_url,
            CompanyField::FacebookUrl => &mut self.facebook_url,
            CompanyField::LinkedinUrl => &mut self.linkedin_url,
            CompanyField::TwitterUrl => &mut self.twitter_url,
            CompanyField::InstagramUrl => &mut self.instagram_url,
            CompanyField::Address => &mut self.address,
            CompanyField::Phone => &mut self.phone,
            CompanyField::Email => &mut self.email,
        }
    }
}

/// 待创建的公司记录
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub owner_id: String,
    pub source_url: String,
    pub fields: CompanyFields,
}

impl Company {
    /// 根据提取结果创建一条 `Pending` 记录
    ///
    /// # 参数
    ///
    /// * `new_company` - 所属用户、来源地址与提取字段
    ///
    /// # 返回值
    ///
    /// 返回带有新生成ID和当前时间戳的记录
    pub fn new(new_company: NewCompany) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let NewCompany {
            owner_id,
            source_url,
            fields,
        } = new_company;

        Self {
            id: Uuid::new_v4(),
            owner_id,
            source_url,
            name: fields.name,
            description: fields.description,
            logo_url: fields.logo_url,
            facebook_url: fields.facebook_url,
            linkedin_url: fields.linkedin_url,
            twitter_url: fields.twitter_url,
            instagram_url: fields.instagram_url,
            address: fields.address,
            phone: fields.phone,
            email: fields.email,
            screenshot_path: None,
            status: CompanyStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// 记录截图路径并进入 `Captured` 状态
    pub fn mark_captured(&mut self, screenshot_path: String) {
        self.screenshot_path = Some(screenshot_path);
        self.status = CompanyStatus::Captured;
        self.updated_at = Utc::now().into();
    }

    /// 截图文件名，格式为 `<id>.png`
    pub fn screenshot_file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    /// 截图相对路径，格式为 `screenshots/<id>.png`
    ///
    /// 与存储目录的实际位置无关，和静态文件路由前缀一致
    pub fn screenshot_relative_path(&self) -> String {
        format!("{}/{}", SCREENSHOT_PREFIX, self.screenshot_file_name())
    }

    /// 提取字段视图
    pub fn fields(&self) -> CompanyFields {
        CompanyFields {
            name: self.name.clone(),
            description: self.description.clone(),
            logo_url: self.logo_url.clone(),
            facebook_url: self.facebook_url.clone(),
            linkedin_url: self.linkedin_url.clone(),
            twitter_url: self.twitter_url.clone(),
            instagram_url: self.instagram_url.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}
