// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：请求、结果与输出行
/// - 服务（services）：与站点无关的字段提取规则
pub mod models;
pub mod services;
