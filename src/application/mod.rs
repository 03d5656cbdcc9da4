// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 单行分发与顺序批处理
pub mod batch;
pub mod dispatcher;
