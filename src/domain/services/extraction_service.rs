// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::{CompanyField, CompanyFields};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;

/// 解析错误类型
///
/// HTML 解析是容错的，当前提取流程不会产生该错误
#[derive(Error, Debug)]
#[error("Parse error: {0}")]
pub struct ParseError(pub String);

/// 取值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// 读取属性值
    Attr(&'static str),
    /// 读取元素文本
    Text,
}

impl Extract {
    fn apply(&self, element: ElementRef<'_>) -> Option<String> {
        match self {
            Extract::Attr(name) => element.value().attr(name).map(str::to_string),
            Extract::Text => Some(element.text().collect::<String>()),
        }
    }
}

/// 提取规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    pub selector: &'static str,
    pub extract: Extract,
}

impl ExtractionRule {
    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Attr(name),
        }
    }

    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            extract: Extract::Text,
        }
    }
}

/// 单个字段的有序规则列表
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: CompanyField,
    pub rules: Vec<ExtractionRule>,
}

impl FieldRules {
    pub fn new(field: CompanyField, rules: Vec<ExtractionRule>) -> Self {
        Self { field, rules }
    }
}

/// 默认规则表
///
/// 每个字段按顺序尝试，第一个非空结果生效
pub fn default_rules() -> Vec<FieldRules> {
    use CompanyField::*;

    vec![
        FieldRules::new(
            Name,
            vec![
                ExtractionRule::attr(r#"meta[property="og:site_name"]"#, "content"),
                ExtractionRule::text("title"),
            ],
        ),
        FieldRules::new(
            Description,
            vec![ExtractionRule::attr(r#"meta[name="description"]"#, "content")],
        ),
        FieldRules::new(
            LogoUrl,
            vec![
                ExtractionRule::attr(r#"link[rel="icon"]"#, "href"),
                ExtractionRule::attr(r#"meta[property="og:image"]"#, "content"),
            ],
        ),
        FieldRules::new(
            FacebookUrl,
            vec![ExtractionRule::attr(r#"a[href*="facebook.com"]"#, "href")],
        ),
        FieldRules::new(
            LinkedinUrl,
            vec![ExtractionRule::attr(r#"a[href*="linkedin.com"]"#, "href")],
        ),
        FieldRules::new(
            TwitterUrl,
            vec![ExtractionRule::attr(r#"a[href*="twitter.com"]"#, "href")],
        ),
        FieldRules::new(
            InstagramUrl,
            vec![ExtractionRule::attr(r#"a[href*="instagram.com"]"#, "href")],
        ),
        FieldRules::new(Address, vec![ExtractionRule::text("address")]),
        FieldRules::new(Phone, vec![ExtractionRule::text(r#"a[href^="tel:"]"#)]),
        FieldRules::new(Email, vec![ExtractionRule::text(r#"a[href^="mailto:"]"#)]),
    ]
}

struct CompiledRule {
    selector: Selector,
    extract: Extract,
}

struct CompiledField {
    field: CompanyField,
    rules: Vec<CompiledRule>,
}

/// 提取服务
///
/// 负责从 HTML 内容中提取公司字段。选择器在构造时编译一次
pub struct ExtractionService {
    fields: Vec<CompiledField>,
}

impl Default for ExtractionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionService {
    /// 使用默认规则表创建提取服务
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// 使用自定义规则表创建提取服务
    ///
    /// 无法编译的选择器会被跳过并记录警告
    pub fn with_rules(table: Vec<FieldRules>) -> Self {
        let fields = table
            .into_iter()
            .map(|entry| CompiledField {
                field: entry.field,
                rules: entry
                    .rules
                    .into_iter()
                    .filter_map(|rule| match Selector::parse(rule.selector) {
                        Ok(selector) => Some(CompiledRule {
                            selector,
                            extract: rule.extract,
                        }),
                        Err(e) => {
                            warn!("Skipping invalid selector {:?}: {}", rule.selector, e);
                            None
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { fields }
    }

    /// 提取字段
    ///
    /// 从不失败：无匹配的字段为 `None`，畸形 HTML 按容错解析结果处理。
    /// 值不做修剪或校验
    pub fn extract(&self, html_content: &str) -> CompanyFields {
        let document = Html::parse_document(html_content);
        let mut fields = CompanyFields::default();

        for compiled in &self.fields {
            let slot = fields.slot_mut(compiled.field);
            if slot.is_some() {
                continue;
            }
            *slot = compiled.rules.iter().find_map(|rule| {
                document
                    .select(&rule.selector)
                    .next()
                    .and_then(|element| rule.extract.apply(element))
                    .filter(|value| !value.is_empty())
            });
        }

        fields
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
