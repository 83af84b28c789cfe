// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体：
/// - 公司记录（company）：一次抓取产出的公司身份信息及截图状态
pub mod company;
