// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 提取服务（extraction_service）：按规则表从 HTML 中提取公司字段
/// - 导出服务（export_service）：将公司记录导出为电子表格
///
/// 领域服务只包含纯粹的业务逻辑，网络与浏览器交互由引擎层负责。
pub mod export_service;
pub mod extraction_service;
