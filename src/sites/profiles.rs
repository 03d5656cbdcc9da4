// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 各站点的选择器配置
//!
//! 选择器链按顺序尝试，第一个产生非空文本的胜出。

use crate::engines::traits::FetchStrategy;
use crate::sites::traits::SiteId;

/// 站点选择器配置
#[derive(Debug)]
pub struct SiteProfile {
    pub id: SiteId,
    /// 站点名称（小写）中匹配的关键字
    pub keywords: &'static [&'static str],
    /// 解析相对URL的基准地址
    pub base_url: &'static str,
    pub fetch_strategy: FetchStrategy,
    pub name: &'static [&'static str],
    pub price: &'static [&'static str],
    pub brand: &'static [&'static str],
    pub sku: &'static [&'static str],
    pub seller: &'static [&'static str],
    /// 页面上没有品牌信息时使用的固定品牌
    pub default_brand: Option<&'static str>,
    /// 从URL中提取SKU的正则，第一个捕获组为SKU
    pub sku_url_pattern: Option<&'static str>,
    /// (行选择器, 单元格选择器)
    pub spec_tables: &'static [(&'static str, &'static str)],
    pub images: &'static [&'static str],
    /// 商品图片URL必须包含的片段
    pub image_url_hint: Option<&'static str>,
}

pub static AMAZON_INDIA: SiteProfile = SiteProfile {
    id: SiteId::AmazonIndia,
    keywords: &["amazon"],
    base_url: "https://www.amazon.in",
    fetch_strategy: FetchStrategy::Browser,
    name: &["#productTitle", "#title span", "h1.a-size-large"],
    price: &[
        "#corePrice_feature_div .a-price .a-offscreen",
        "#priceblock_ourprice",
        "#priceblock_dealprice",
        ".a-price .a-offscreen",
        ".a-price-whole",
    ],
    brand: &["#bylineInfo", "tr.po-brand td.po-break-word", "#brand"],
    sku: &[],
    seller: &[
        "#sellerProfileTriggerId",
        "#merchant-info a",
        "#merchantInfoFeature_feature_div .offer-display-feature-text-message",
    ],
    default_brand: None,
    sku_url_pattern: Some(r"/(?:dp|gp/product)/([A-Z0-9]{10})"),
    spec_tables: &[
        ("#productDetails_techSpec_section_1 tr", "th, td"),
        ("#productDetails_detailBullets_sections1 tr", "th, td"),
        ("#productOverview_feature_div tr", "td"),
    ],
    images: &["#altImages img", "#imgTagWrapperId img"],
    image_url_hint: Some("images/I/"),
};

pub static FLIPKART: SiteProfile = SiteProfile {
    id: SiteId::Flipkart,
    keywords: &["flipkart"],
    base_url: "https://www.flipkart.com",
    fetch_strategy: FetchStrategy::Browser,
    name: &["span.VU-ZEz", "span.B_NuCI", "h1 span"],
    price: &["div.Nx9bqj.CxhGGd", "div._30jeq3._16Jk6d", "div._30jeq3"],
    brand: &["span.mEh187", "span.G6XhRU"],
    sku: &[],
    seller: &["#sellerName span span", "#sellerName span"],
    default_brand: None,
    sku_url_pattern: Some(r"[?&]pid=([A-Z0-9]+)"),
    spec_tables: &[("table._0ZhAN9 tr", "td"), ("table._14cfVK tr", "td")],
    images: &["ul li img", "div._3kidJX img"],
    image_url_hint: Some("rukminim"),
};

pub static INDIAMART: SiteProfile = SiteProfile {
    id: SiteId::IndiaMart,
    keywords: &["indiamart"],
    base_url: "https://www.indiamart.com",
    fetch_strategy: FetchStrategy::Http,
    name: &["h1.bo.center-heading", "h1.pdp-heading", "h1"],
    price: &[".prc-tip .bo", "span.prc", ".price-unit"],
    brand: &[],
    sku: &[],
    seller: &["#supp_nm", ".cmpny-nm", "h2.fs15"],
    default_brand: None,
    sku_url_pattern: Some(r"proddetail/[a-z0-9-]*?-(\d+)\.html"),
    spec_tables: &[("table.dtlsTbl tr", "td"), ("div.dsf table tr", "td")],
    images: &["#imgPrdGal img", ".pdp-img img", "img.pdp_img"],
    image_url_hint: None,
};

pub static INDUSTRY_BUYING: SiteProfile = SiteProfile {
    id: SiteId::IndustryBuying,
    keywords: &["industry"],
    base_url: "https://www.industrybuying.com",
    fetch_strategy: FetchStrategy::Http,
    name: &["h1.productTitle", "h1.prodTitle", "h1"],
    price: &[".productPrice", ".AH_PricePerPiece", ".price"],
    brand: &[".brandName a", ".brand a", ".brandName"],
    sku: &[".productCode span", ".sku"],
    seller: &[],
    default_brand: None,
    sku_url_pattern: None,
    spec_tables: &[("#specifications table tr", "td"), (".specsTable tr", "th, td")],
    images: &[".prodImage img", ".productImageSlider img"],
    image_url_hint: None,
};

pub static MOGLIX: SiteProfile = SiteProfile {
    id: SiteId::Moglix,
    keywords: &["moglix"],
    base_url: "https://www.moglix.com",
    fetch_strategy: FetchStrategy::Http,
    name: &["h1.pro-name", "h1"],
    price: &[".price-new", ".pdp-price"],
    brand: &[".brand-name a", "a.brand-link"],
    sku: &[".product-code span", ".msn-code"],
    seller: &[],
    default_brand: None,
    sku_url_pattern: Some(r"(?i)/mp/(msn[a-z0-9]+)"),
    spec_tables: &[(".specifications-table tr", "td"), ("table.pdp-spec tr", "td")],
    images: &[".pdp-image img", ".thumb-img img"],
    image_url_hint: None,
};

pub static SKF_INDIA: SiteProfile = SiteProfile {
    id: SiteId::SkfIndia,
    keywords: &["skf"],
    base_url: "https://www.skf.com",
    fetch_strategy: FetchStrategy::Http,
    name: &["h1.product-name", "h1"],
    price: &[],
    brand: &[],
    sku: &[".product-designation"],
    seller: &[],
    default_brand: Some("SKF"),
    sku_url_pattern: None,
    spec_tables: &[
        ("table.specification-table tr", "th, td"),
        (".technical-specification tr", "th, td"),
    ],
    images: &[".product-image img"],
    image_url_hint: None,
};

pub static SMC_PNEUMATICS: SiteProfile = SiteProfile {
    id: SiteId::SmcPneumatics,
    keywords: &["smc"],
    base_url: "https://www.smcpneumatics.com",
    fetch_strategy: FetchStrategy::Http,
    name: &["h1.product-name", "h1.page-title", "h1"],
    price: &[".price", ".product-price"],
    brand: &[],
    sku: &["span.sku", ".product-sku"],
    seller: &[],
    default_brand: Some("SMC"),
    sku_url_pattern: None,
    spec_tables: &[
        ("#product-attribute-specs-table tr", "th, td"),
        (".additional-attributes tr", "th, td"),
    ],
    images: &[".product-image-gallery img", ".gallery-placeholder img"],
    image_url_hint: None,
};

/// 默认注册的站点，顺序即分类时的匹配顺序
pub static DEFAULT_PROFILES: &[&SiteProfile] = &[
    &AMAZON_INDIA,
    &FLIPKART,
    &INDIAMART,
    &INDUSTRY_BUYING,
    &MOGLIX,
    &SKF_INDIA,
    &SMC_PNEUMATICS,
];
