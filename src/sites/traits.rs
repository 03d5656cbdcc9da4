// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::{ExtractionRequest, ParsedProduct};
use crate::engines::traits::FetchStrategy;
use crate::utils::errors::ExtractionError;
use std::fmt;

/// 站点标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    AmazonIndia,
    Flipkart,
    IndiaMart,
    IndustryBuying,
    Moglix,
    SkfIndia,
    SmcPneumatics,
    Unsupported,
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SiteId::AmazonIndia => "Amazon India",
            SiteId::Flipkart => "Flipkart",
            SiteId::IndiaMart => "IndiaMART",
            SiteId::IndustryBuying => "IndustryBuying",
            SiteId::Moglix => "Moglix",
            SiteId::SkfIndia => "SKF India",
            SiteId::SmcPneumatics => "SMC Pneumatics",
            SiteId::Unsupported => "Unsupported",
        };
        write!(f, "{}", name)
    }
}

/// 站点处理器特质
///
/// 每个站点一个实现，声明抓取策略并负责解析页面。解析是纯函数：
/// 对同一文档重复解析得到相同结果。
pub trait SiteHandler: Send + Sync {
    /// 站点标识
    fn site_id(&self) -> SiteId;

    /// 抓取策略
    fn fetch_strategy(&self) -> FetchStrategy;

    /// 处理器是否能处理该站点。不支持的站点在抓取前即返回错误。
    fn ensure_supported(&self) -> Result<(), ExtractionError> {
        Ok(())
    }

    /// 解析页面
    fn parse(&self, html: &str, request: &ExtractionRequest) -> ParsedProduct;
}
