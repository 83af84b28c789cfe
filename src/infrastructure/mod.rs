// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含与外部系统交互的技术实现：
/// - 数据库（database）：连接池和实体映射
/// - 仓库实现（repositories）：领域仓库接口的 SeaORM 实现
///
/// 基础设施层依赖领域层的抽象接口，领域层不感知具体存储。
pub mod database;
pub mod repositories;
