// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 单行提取分发与顺序批处理
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含请求、结果等核心实体以及字段提取服务
pub mod domain;

/// 引擎模块
///
/// 实现HTTP与无头浏览器两种页面抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 输入表格读取与结果导出
pub mod infrastructure;

/// 站点模块
///
/// 站点识别、选择器配置与页面解析
pub mod sites;

/// 工具模块
///
/// 错误类型与日志初始化
pub mod utils;
