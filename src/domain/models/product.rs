// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 缺失字段的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 提取请求
///
/// 对应输入表格中的一行，创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// 物料编号
    #[serde(rename = "materialId")]
    pub identifier: String,
    /// 来源站点名称（原样保留用户输入）
    #[serde(rename = "source")]
    pub source_site: String,
    /// 商品页面URL
    #[serde(rename = "productUrl")]
    pub url: String,
}

impl ExtractionRequest {
    pub fn new(
        identifier: impl Into<String>,
        source_site: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            source_site: source_site.into(),
            url: url.into(),
        }
    }
}

/// 提取状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStatus {
    /// 名称与价格均已提取
    Success,
    /// 提取到名称但缺少价格
    Partial,
    /// 未提取到名称，或抓取失败
    Failed,
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractionStatus::Success => write!(f, "Success"),
            ExtractionStatus::Partial => write!(f, "Partial"),
            ExtractionStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// 提取结果
///
/// 每个请求恰好产生一条结果。状态为 `Failed` 时所有可选字段均为
/// [`NOT_AVAILABLE`]，且 `error_reason` 非空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(rename = "materialId")]
    pub identifier: String,
    #[serde(rename = "source")]
    pub source_site: String,
    #[serde(rename = "productUrl")]
    pub url: String,
    pub product_name: String,
    pub price: String,
    pub brand: String,
    pub sku: String,
    pub seller_name: String,
    pub status: ExtractionStatus,
    pub error_reason: String,
    pub scraped_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// 构造失败结果，所有可选字段置为占位值
    pub fn failed(request: &ExtractionRequest, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            identifier: request.identifier.clone(),
            source_site: request.source_site.clone(),
            url: request.url.clone(),
            product_name: NOT_AVAILABLE.to_string(),
            price: NOT_AVAILABLE.to_string(),
            brand: NOT_AVAILABLE.to_string(),
            sku: NOT_AVAILABLE.to_string(),
            seller_name: NOT_AVAILABLE.to_string(),
            status: ExtractionStatus::Failed,
            error_reason: if reason.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                reason
            },
            scraped_at: Utc::now(),
        }
    }
}

/// 规格行（长表格式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationRow {
    #[serde(rename = "materialId")]
    pub identifier: String,
    pub product_name: String,
    pub spec_name: String,
    pub spec_value: String,
}

/// 图片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Main,
    Thumbnail,
}

/// 图片行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRow {
    #[serde(rename = "materialId")]
    pub identifier: String,
    pub product_name: String,
    pub image_url: String,
    pub image_type: ImageType,
    /// 从1开始的连续序号
    pub image_order: u32,
}

/// 单次分发的完整输出
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub result: ExtractionResult,
    pub specifications: Vec<SpecificationRow>,
    pub images: Vec<ImageRow>,
}

impl ExtractionOutcome {
    /// 失败结果不携带规格与图片
    pub fn failed(request: &ExtractionRequest, reason: impl Into<String>) -> Self {
        Self {
            result: ExtractionResult::failed(request, reason),
            specifications: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// 站点解析器产出的原始商品数据
///
/// 未经状态判定，字段缺失以 `None` 表示。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProduct {
    pub name: Option<String>,
    pub price: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub seller: Option<String>,
    /// (规格名, 规格值)，按文档顺序
    pub specifications: Vec<(String, String)>,
    /// 已解析为绝对地址的图片URL，按文档顺序
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_uses_sentinel() {
        let request = ExtractionRequest::new("001", "Unknown Store", "https://example.com/p");
        let result = ExtractionResult::failed(&request, "Website not supported in demo");

        assert_eq!(result.status, ExtractionStatus::Failed);
        assert_eq!(result.product_name, NOT_AVAILABLE);
        assert_eq!(result.price, NOT_AVAILABLE);
        assert_eq!(result.brand, NOT_AVAILABLE);
        assert_eq!(result.sku, NOT_AVAILABLE);
        assert_eq!(result.seller_name, NOT_AVAILABLE);
        assert_eq!(result.error_reason, "Website not supported in demo");
    }

    #[test]
    fn test_failed_result_never_has_empty_reason() {
        let request = ExtractionRequest::new("002", "Moglix", "https://www.moglix.com/x");
        let result = ExtractionResult::failed(&request, "  ");
        assert!(!result.error_reason.is_empty());
    }

    #[test]
    fn test_result_serializes_with_table_column_names() {
        let request = ExtractionRequest::new("003", "Flipkart", "https://www.flipkart.com/p");
        let result = ExtractionResult::failed(&request, "Timeout");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["materialId"], "003");
        assert_eq!(value["source"], "Flipkart");
        assert_eq!(value["productName"], NOT_AVAILABLE);
        assert_eq!(value["status"], "Failed");
        assert!(value.get("scrapedAt").is_some());
    }

    #[test]
    fn test_image_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ImageType::Main).unwrap(), "main");
        assert_eq!(serde_json::to_value(ImageType::Thumbnail).unwrap(), "thumbnail");
    }
}
