// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 规格名称的最大长度，超过视为误解析的行
pub const MAX_SPEC_NAME_LEN: usize = 100;

/// 每个商品保留的最大图片数
pub const MAX_IMAGES: usize = 5;

static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:₹|Rs\.?|INR)\s*\d[\d,]*(?:\.\d+)?").expect("price pattern is valid")
});

/// 图片路径中出现这些独立词时视为装饰性图片
const IMAGE_NOISE: &[&str] = &["sprite", "logo", "icon", "blank", "placeholder", "spacer"];

/// 整个文件名等于这些值时视为跟踪像素
const TRACKING_PIXELS: &[&str] = &["pixel", "1x1", "transparent"];

/// 这些元素内的文本对用户不可见
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// 图片地址属性，按优先级排列
const IMAGE_ATTRS: &[&str] = &["data-old-hires", "data-src", "src"];

/// 选择器回退链
///
/// 按顺序尝试每个选择器，第一个产生非空文本的选择器胜出。
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// 解析选择器列表，无效的选择器会被跳过
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Self {
        let selectors = selectors
            .iter()
            .filter_map(|s| match Selector::parse(s.as_ref()) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    tracing::warn!("Skipping invalid selector '{}': {}", s.as_ref(), e);
                    None
                }
            })
            .collect();
        Self { selectors }
    }

    /// 在链尾追加回退选择器
    pub fn with_fallback(mut self, selector: &str) -> Self {
        if let Ok(selector) = Selector::parse(selector) {
            self.selectors.push(selector);
        }
        self
    }

    /// 返回第一个非空文本
    pub fn first_text(&self, document: &Html) -> Option<String> {
        self.candidates(document).next()
    }

    /// 按链顺序返回每个选择器首个匹配元素的非空文本
    pub fn candidates<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = String> + 'a {
        self.selectors.iter().filter_map(move |selector| {
            document
                .select(selector)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
    }
}

/// 规格表规则：行选择器 + 单元格选择器
#[derive(Debug, Clone)]
pub struct SpecTableRule {
    rows: Selector,
    cells: Selector,
}

impl SpecTableRule {
    pub fn new(rows: &str, cells: &str) -> Option<Self> {
        match (Selector::parse(rows), Selector::parse(cells)) {
            (Ok(rows), Ok(cells)) => Some(Self { rows, cells }),
            _ => {
                tracing::warn!("Skipping invalid spec table rule '{}' / '{}'", rows, cells);
                None
            }
        }
    }
}

/// 图片提取规则
#[derive(Debug, Clone)]
pub struct ImageRule {
    selector: Selector,
    /// URL必须包含的片段
    url_hint: Option<String>,
}

impl ImageRule {
    pub fn new(selector: &str, url_hint: Option<&str>) -> Option<Self> {
        let selector = Selector::parse(selector).ok()?;
        Some(Self {
            selector,
            url_hint: url_hint.map(str::to_string),
        })
    }
}

/// 压缩空白并去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// 文档中用户可见的文本
///
/// 跳过 `script`、`style`、`noscript`、`template` 内的文本节点。
pub fn visible_text(document: &Html) -> String {
    let parts: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| HIDDEN_TEXT_TAGS.contains(&e.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();
    normalize_whitespace(&parts.join(" "))
}

/// 从文本中提取带货币前缀的价格
///
/// ```
/// use sku_harvester::domain::services::extraction_service::extract_price;
/// assert_eq!(extract_price("Price: ₹1,250 only"), Some("₹1,250".to_string()));
/// assert_eq!(extract_price("no price"), None);
/// ```
pub fn extract_price(text: &str) -> Option<String> {
    PRICE_PATTERN
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

/// 先在候选文本中查找价格，失败后扫描整个文档的可见文本
pub fn extract_price_from(chain: &SelectorChain, document: &Html) -> Option<String> {
    chain
        .candidates(document)
        .find_map(|text| extract_price(&text))
        .or_else(|| extract_price(&visible_text(document)))
}

/// 从表格类容器中提取规格键值对
///
/// 每行至少两个单元格：第一个为名称，第二个为值。两者非空且名称短于
/// [`MAX_SPEC_NAME_LEN`] 时保留，重复的键值对只保留第一次出现。
pub fn extract_specifications(document: &Html, rules: &[SpecTableRule]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut specs = Vec::new();

    for rule in rules {
        for row in document.select(&rule.rows) {
            let mut cells = row.select(&rule.cells).map(element_text);
            let (Some(name), Some(value)) = (cells.next(), cells.next()) else {
                continue;
            };
            if name.is_empty() || value.is_empty() || name.chars().count() >= MAX_SPEC_NAME_LEN {
                continue;
            }
            if seen.insert((name.clone(), value.clone())) {
                specs.push((name, value));
            }
        }
    }

    specs
}

/// 提取商品图片URL
///
/// 按文档顺序读取候选元素，过滤装饰性图片，将相对地址基于 `base` 解析，
/// 最多保留 [`MAX_IMAGES`] 张。
pub fn extract_image_urls(document: &Html, rules: &[ImageRule], base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for rule in rules {
        for element in document.select(&rule.selector) {
            if images.len() >= MAX_IMAGES {
                return images;
            }

            let Some(raw) = IMAGE_ATTRS
                .iter()
                .filter_map(|attr| element.value().attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
            else {
                continue;
            };

            let Some(resolved) = resolve_image_url(raw, base) else {
                continue;
            };
            if is_noise_image(&resolved) {
                continue;
            }

            let resolved = resolved.to_string();
            if let Some(hint) = &rule.url_hint {
                if !resolved.contains(hint.as_str()) {
                    continue;
                }
            }

            if seen.insert(resolved.clone()) {
                images.push(resolved);
            }
        }
    }

    images
}

fn resolve_image_url(raw: &str, base: &Url) -> Option<Url> {
    if raw.starts_with("data:") {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(raw).ok(),
        Err(_) => None,
    }
}

/// 按路径分词判断装饰性图片，商品名中的子串（如 silicone 中的 icon）不算
fn is_noise_image(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    if TRACKING_PIXELS.contains(&stem) {
        return true;
    }

    path.split(['/', '-', '_', '.']).any(|token| {
        IMAGE_NOISE
            .iter()
            .any(|noise| token == *noise || token.strip_suffix('s') == Some(*noise))
    })
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
