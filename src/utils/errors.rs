// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 错误原因的最大长度
pub const MAX_ERROR_REASON_LEN: usize = 100;

/// 单行提取失败的原因
///
/// 只在分发器内部流转，最终写入结果的 `error_reason`，不会向调用方传播。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Website not supported in demo")]
    UnsupportedSite,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Blocked by anti-bot check: {0}")]
    AntiBotBlock(String),

    #[error("{0}")]
    ParseFailure(String),
}

impl ExtractionError {
    /// 生成写入结果表的错误原因（截断至 [`MAX_ERROR_REASON_LEN`] 个字符）
    pub fn reason(&self) -> String {
        truncate_chars(&self.to_string(), MAX_ERROR_REASON_LEN)
    }
}

/// 输入表格错误
#[derive(Error, Debug)]
pub enum InputError {
    #[error("无法读取输入文件: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV解析错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    #[error("第 {row} 行的列 '{column}' 为空")]
    NullValue { row: usize, column: String },
}

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV写入错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 按字符截断，避免切断多字节字符
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
