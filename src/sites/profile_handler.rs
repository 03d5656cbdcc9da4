// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::{ExtractionRequest, ParsedProduct};
use crate::domain::services::extraction_service::{
    extract_image_urls, extract_price_from, extract_specifications, ImageRule, SelectorChain,
    SpecTableRule,
};
use crate::engines::traits::FetchStrategy;
use crate::sites::profiles::SiteProfile;
use crate::sites::traits::{SiteHandler, SiteId};
use crate::utils::errors::ExtractionError;
use regex::Regex;
use scraper::Html;
use url::Url;

/// 品牌文本中常见的修饰前后缀
const BRAND_PREFIXES: &[&str] = &["Visit the ", "Brand: ", "Brand:"];
const BRAND_SUFFIXES: &[&str] = &[" Store"];

/// 基于选择器配置的站点处理器
///
/// 构造时编译配置中的选择器与正则，解析时只读。
pub struct ProfileHandler {
    profile: &'static SiteProfile,
    base_url: Url,
    name: SelectorChain,
    price: SelectorChain,
    brand: SelectorChain,
    sku: SelectorChain,
    seller: SelectorChain,
    sku_pattern: Option<Regex>,
    spec_tables: Vec<SpecTableRule>,
    fallback_spec_tables: Vec<SpecTableRule>,
    images: Vec<ImageRule>,
    fallback_images: Vec<ImageRule>,
}

impl ProfileHandler {
    /// 从站点配置构造处理器
    ///
    /// # 返回值
    ///
    /// * `Err(url::ParseError)` - 配置中的基准地址无效
    pub fn new(profile: &'static SiteProfile) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(profile.base_url)?;

        let sku_pattern = profile.sku_url_pattern.and_then(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Invalid SKU pattern for {}: {}", profile.id, e);
                None
            }
        });

        Ok(Self {
            profile,
            base_url,
            name: SelectorChain::new(profile.name).with_fallback("h1"),
            price: SelectorChain::new(profile.price),
            brand: SelectorChain::new(profile.brand),
            sku: SelectorChain::new(profile.sku),
            seller: SelectorChain::new(profile.seller),
            sku_pattern,
            spec_tables: profile
                .spec_tables
                .iter()
                .filter_map(|(rows, cells)| SpecTableRule::new(rows, cells))
                .collect(),
            fallback_spec_tables: SpecTableRule::new("table tr", "th, td").into_iter().collect(),
            images: profile
                .images
                .iter()
                .filter_map(|selector| ImageRule::new(selector, profile.image_url_hint))
                .collect(),
            fallback_images: ImageRule::new("img", profile.image_url_hint).into_iter().collect(),
        })
    }

    fn sku_from_url(&self, url: &str) -> Option<String> {
        self.sku_pattern
            .as_ref()?
            .captures(url)?
            .get(1)
            .map(|m| m.as_str().to_string())
    }
}

impl SiteHandler for ProfileHandler {
    fn site_id(&self) -> SiteId {
        self.profile.id
    }

    fn fetch_strategy(&self) -> FetchStrategy {
        self.profile.fetch_strategy
    }

    fn parse(&self, html: &str, request: &ExtractionRequest) -> ParsedProduct {
        let document = Html::parse_document(html);

        let brand = self
            .brand
            .first_text(&document)
            .map(|b| clean_brand(&b))
            .filter(|b| !b.is_empty())
            .or_else(|| self.profile.default_brand.map(str::to_string));

        let sku = self
            .sku
            .first_text(&document)
            .or_else(|| self.sku_from_url(&request.url));

        let mut specifications = extract_specifications(&document, &self.spec_tables);
        if specifications.is_empty() {
            specifications = extract_specifications(&document, &self.fallback_spec_tables);
        }

        let mut images = extract_image_urls(&document, &self.images, &self.base_url);
        if images.is_empty() {
            images = extract_image_urls(&document, &self.fallback_images, &self.base_url);
        }

        ParsedProduct {
            name: self.name.first_text(&document),
            price: extract_price_from(&self.price, &document),
            brand,
            sku,
            seller: self.seller.first_text(&document),
            specifications,
            images,
        }
    }
}

fn clean_brand(raw: &str) -> String {
    let mut brand = raw.trim();
    for prefix in BRAND_PREFIXES {
        if let Some(rest) = brand.strip_prefix(prefix) {
            brand = rest.trim();
        }
    }
    for suffix in BRAND_SUFFIXES {
        if let Some(rest) = brand.strip_suffix(suffix) {
            brand = rest.trim();
        }
    }
    brand.to_string()
}

/// 不支持站点的处理器，始终拒绝
pub struct UnsupportedHandler;

impl SiteHandler for UnsupportedHandler {
    fn site_id(&self) -> SiteId {
        SiteId::Unsupported
    }

    fn fetch_strategy(&self) -> FetchStrategy {
        FetchStrategy::Http
    }

    fn ensure_supported(&self) -> Result<(), ExtractionError> {
        Err(ExtractionError::UnsupportedSite)
    }

    fn parse(&self, _html: &str, _request: &ExtractionRequest) -> ParsedProduct {
        ParsedProduct::default()
    }
}

#[cfg(test)]
#[path = "profile_handler_test.rs"]
mod tests;
