// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::Settings;
use crate::domain::services::extraction_service::visible_text;
use crate::domain::models::product::{
    ExtractionOutcome, ExtractionRequest, ExtractionResult, ExtractionStatus, ImageRow, ImageType,
    SpecificationRow, NOT_AVAILABLE,
};
use crate::engines::browser_engine::BrowserEngine;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineError, FetchEngine, FetchRequest, FetchStrategy};
use crate::sites::registry::SiteRegistry;
use crate::sites::traits::SiteHandler;
use crate::utils::errors::ExtractionError;
use chrono::Utc;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 页面可见文本中出现即视为被反爬拦截（小写比较）
pub const ANTI_BOT_MARKERS: &[&str] = &[
    "captcha",
    "robot check",
    "unusual traffic",
    "are you a human",
];

const NAME_NOT_FOUND: &str = "Product name not found";

/// 提取分发器
///
/// 将一条请求映射为恰好一条结果及其规格、图片行。所有失败都被记录到
/// 结果的状态与错误原因中，`dispatch` 永不返回错误。
///
/// 除了按需启动的浏览器会话外没有其他状态；批处理结束后调用方必须调用
/// [`ExtractionDispatcher::close`] 释放会话。
pub struct ExtractionDispatcher {
    registry: SiteRegistry,
    http_engine: Arc<dyn FetchEngine>,
    browser_engine: Arc<dyn FetchEngine>,
    http_timeout: Duration,
    browser_timeout: Duration,
}

impl ExtractionDispatcher {
    /// 根据配置创建分发器
    ///
    /// 浏览器不会在此启动，首次需要时才建立会话
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        let http_engine = ReqwestEngine::new(&settings.http.user_agent)?;
        let browser_engine =
            BrowserEngine::new(settings.browser.clone(), settings.http.user_agent.clone());

        Ok(Self::with_engines(
            SiteRegistry::with_default_sites(),
            Arc::new(http_engine),
            Arc::new(browser_engine),
            Duration::from_secs(settings.http.timeout_secs),
            Duration::from_secs(settings.browser.timeout_secs),
        ))
    }

    /// 使用指定的注册表与引擎创建分发器
    pub fn with_engines(
        registry: SiteRegistry,
        http_engine: Arc<dyn FetchEngine>,
        browser_engine: Arc<dyn FetchEngine>,
        http_timeout: Duration,
        browser_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            http_engine,
            browser_engine,
            http_timeout,
            browser_timeout,
        }
    }

    /// 根据站点名称选择处理器
    pub fn classify(&self, source_site: &str) -> Arc<dyn SiteHandler> {
        self.registry.classify(source_site)
    }

    /// 按处理器的抓取策略获取页面
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 页面HTML
    /// * `Err(ExtractionError)` - 超时、网络错误、HTTP错误状态或反爬拦截
    pub async fn fetch(
        &self,
        url: &str,
        handler: &dyn SiteHandler,
    ) -> Result<String, ExtractionError> {
        let (engine, timeout) = match handler.fetch_strategy() {
            FetchStrategy::Http => (&self.http_engine, self.http_timeout),
            FetchStrategy::Browser => (&self.browser_engine, self.browser_timeout),
        };

        debug!("Fetching {} with {} engine", url, engine.name());
        let request = FetchRequest {
            url: url.to_string(),
            timeout,
        };

        let response = engine.fetch(&request).await.map_err(|e| match e {
            EngineError::Timeout(d) => {
                ExtractionError::Timeout(format!("no response within {}s", d.as_secs_f32()))
            }
            EngineError::Network(msg) => ExtractionError::Network(msg),
            EngineError::Browser(msg) => ExtractionError::Network(format!("browser: {}", msg)),
        })?;

        if let Some(marker) = detect_anti_bot(&response.content) {
            return Err(ExtractionError::AntiBotBlock(format!(
                "'{}' found in response",
                marker
            )));
        }

        if response.status_code >= 400 {
            return Err(ExtractionError::Network(format!(
                "HTTP {}",
                response.status_code
            )));
        }

        debug!(
            "Fetched {} ({} bytes, {}ms)",
            url,
            response.content.len(),
            response.response_time_ms
        );
        Ok(response.content)
    }

    /// 解析页面并构造结果
    ///
    /// 名称是唯一的成功门槛：未提取到名称时结果一律为 `Failed`。
    pub fn parse(
        &self,
        handler: &dyn SiteHandler,
        html: &str,
        request: &ExtractionRequest,
    ) -> ExtractionOutcome {
        let parsed = handler.parse(html, request);

        let Some(product_name) = parsed.name.filter(|n| !n.trim().is_empty()) else {
            return ExtractionOutcome::failed(
                request,
                ExtractionError::ParseFailure(NAME_NOT_FOUND.to_string()).reason(),
            );
        };

        let status = if parsed.price.is_some() {
            ExtractionStatus::Success
        } else {
            ExtractionStatus::Partial
        };

        let specifications = parsed
            .specifications
            .into_iter()
            .map(|(spec_name, spec_value)| SpecificationRow {
                identifier: request.identifier.clone(),
                product_name: product_name.clone(),
                spec_name,
                spec_value,
            })
            .collect();

        let images = parsed
            .images
            .into_iter()
            .enumerate()
            .map(|(idx, image_url)| ImageRow {
                identifier: request.identifier.clone(),
                product_name: product_name.clone(),
                image_url,
                image_type: if idx == 0 {
                    ImageType::Main
                } else {
                    ImageType::Thumbnail
                },
                image_order: idx as u32 + 1,
            })
            .collect();

        let result = ExtractionResult {
            identifier: request.identifier.clone(),
            source_site: request.source_site.clone(),
            url: request.url.clone(),
            product_name,
            price: or_not_available(parsed.price),
            brand: or_not_available(parsed.brand),
            sku: or_not_available(parsed.sku),
            seller_name: or_not_available(parsed.seller),
            status,
            error_reason: String::new(),
            scraped_at: Utc::now(),
        };

        ExtractionOutcome {
            result,
            specifications,
            images,
        }
    }

    /// 处理一条请求：分类、抓取、解析
    pub async fn dispatch(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        let handler = self.classify(&request.source_site);
        info!(
            "[{}] {} -> {}",
            request.identifier,
            request.source_site,
            handler.site_id()
        );

        let outcome = match self.extract(handler.as_ref(), request).await {
            Ok(outcome) => outcome,
            Err(e) => ExtractionOutcome::failed(request, e.reason()),
        };

        match outcome.result.status {
            ExtractionStatus::Failed => warn!(
                "[{}] Failed: {}",
                request.identifier, outcome.result.error_reason
            ),
            status => info!(
                "[{}] {}: {} ({} specs, {} images)",
                request.identifier,
                status,
                outcome.result.product_name,
                outcome.specifications.len(),
                outcome.images.len()
            ),
        }

        outcome
    }

    async fn extract(
        &self,
        handler: &dyn SiteHandler,
        request: &ExtractionRequest,
    ) -> Result<ExtractionOutcome, ExtractionError> {
        handler.ensure_supported()?;
        let html = self.fetch(&request.url, handler).await?;
        Ok(self.parse(handler, &html, request))
    }

    /// 释放浏览器会话
    pub async fn close(&self) -> Result<(), EngineError> {
        self.http_engine.close().await?;
        self.browser_engine.close().await
    }
}

/// 只检查可见文本，脚本中引用的 reCAPTCHA 等不算
fn detect_anti_bot(content: &str) -> Option<&'static str> {
    let lowered = visible_text(&Html::parse_document(content)).to_lowercase();
    ANTI_BOT_MARKERS
        .iter()
        .copied()
        .find(|marker| lowered.contains(marker))
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;
