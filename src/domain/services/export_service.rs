// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::Company;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, XlsxError};
use thiserror::Error;

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// 导出文件 MIME 类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 导出文件名
pub const XLSX_FILE_NAME: &str = "companies.xlsx";

const SHEET_NAME: &str = "Companies";

// Excel rejects longer cell strings
const MAX_CELL_CHARS: usize = 32_767;

/// 固定列顺序
pub const HEADERS: [&str; 10] = [
    "Name",
    "Description",
    "Logo",
    "Facebook",
    "LinkedIn",
    "Twitter",
    "Instagram",
    "Address",
    "Phone",
    "Email",
];

fn row_values(c: &Company) -> [Option<&str>; 10] {
    [
        c.name.as_deref(),
        c.description.as_deref(),
        c.logo_url.as_deref(),
        c.facebook_url.as_deref(),
        c.linkedin_url.as_deref(),
        c.twitter_url.as_deref(),
        c.instagram_url.as_deref(),
        c.address.as_deref(),
        c.phone.as_deref(),
        c.email.as_deref(),
    ]
}

/// 导出服务
///
/// 将有序的公司记录写成单工作表的 xlsx 文件。首行为表头，
/// 之后每条记录一行，缺失字段留空。文档创建时间固定，相同输入产生相同字节
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// 导出为 xlsx 字节流
    ///
    /// # 参数
    ///
    /// * `companies` - 按输出顺序排列的记录
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<u8>)` - xlsx 文件内容
    /// * `Err(ExportError)` - 生成失败
    pub fn export(&self, companies: &[Company]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();

        let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
        let properties = DocProperties::new().set_creation_datetime(&created);
        workbook.set_properties(&properties);

        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (index, company) in companies.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, value) in row_values(company).into_iter().enumerate() {
                match value {
                    Some(text) if !text.is_empty() => {
                        worksheet.write_string(row, col as u16, clamp_cell(text))?;
                    }
                    _ => {}
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn clamp_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
