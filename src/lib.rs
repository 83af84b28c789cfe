// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含抓取与导出用例以及请求DTO
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含公司实体、字段提取与表格导出服务以及仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现页面获取和浏览器截图引擎
pub mod engines;

/// 基础设施模块
///
/// 提供数据库连接和仓库实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供日志初始化等辅助功能
pub mod utils;
