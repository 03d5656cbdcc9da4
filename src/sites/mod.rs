// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 站点模块
///
/// 站点标识、处理器特质、选择器配置与注册表
pub mod profile_handler;
pub mod profiles;
pub mod registry;
pub mod traits;
