// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 提取服务（extraction_service）：选择器链、价格识别、规格表与图片URL的提取
pub mod extraction_service;
