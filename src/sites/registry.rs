// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::sites::profile_handler::{ProfileHandler, UnsupportedHandler};
use crate::sites::profiles::DEFAULT_PROFILES;
use crate::sites::traits::SiteHandler;
use std::sync::Arc;

/// 注册表条目：关键字 + 处理器
struct Registration {
    keywords: Vec<String>,
    handler: Arc<dyn SiteHandler>,
}

/// 站点注册表
///
/// 将站点名称映射到处理器。按注册顺序匹配关键字，新增站点只需注册，
/// 无需改动分发逻辑。
pub struct SiteRegistry {
    registrations: Vec<Registration>,
    unsupported: Arc<dyn SiteHandler>,
}

impl SiteRegistry {
    /// 创建空注册表，所有站点都会被判定为不支持
    pub fn empty() -> Self {
        Self {
            registrations: Vec::new(),
            unsupported: Arc::new(UnsupportedHandler),
        }
    }

    /// 创建包含默认站点的注册表
    pub fn with_default_sites() -> Self {
        let mut registry = Self::empty();
        for &profile in DEFAULT_PROFILES {
            match ProfileHandler::new(profile) {
                Ok(handler) => registry.register(profile.keywords, Arc::new(handler)),
                Err(e) => tracing::error!("Failed to register site {}: {}", profile.id, e),
            }
        }
        registry
    }

    /// 注册处理器
    ///
    /// # 参数
    ///
    /// * `keywords` - 站点名称中需要匹配的关键字（不区分大小写）
    /// * `handler` - 站点处理器
    pub fn register<S: AsRef<str>>(&mut self, keywords: &[S], handler: Arc<dyn SiteHandler>) {
        self.registrations.push(Registration {
            keywords: keywords.iter().map(|k| k.as_ref().to_lowercase()).collect(),
            handler,
        });
    }

    /// 根据站点名称选择处理器
    ///
    /// 名称转为小写后做子串匹配，未命中时返回不支持处理器
    pub fn classify(&self, source_site: &str) -> Arc<dyn SiteHandler> {
        let site = source_site.to_lowercase();
        self.registrations
            .iter()
            .find(|r| r.keywords.iter().any(|k| site.contains(k.as_str())))
            .map(|r| r.handler.clone())
            .unwrap_or_else(|| self.unsupported.clone())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::with_default_sites()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::product::{ExtractionRequest, ParsedProduct};
    use crate::engines::traits::FetchStrategy;
    use crate::sites::traits::SiteId;

    #[test]
    fn test_classify_default_sites() {
        let registry = SiteRegistry::with_default_sites();
        assert_eq!(registry.len(), 7);

        let cases = [
            ("Amazon India", SiteId::AmazonIndia),
            ("AMAZON", SiteId::AmazonIndia),
            ("Flipkart", SiteId::Flipkart),
            ("IndiaMART", SiteId::IndiaMart),
            ("Industry Buying", SiteId::IndustryBuying),
            ("IndustryBuying", SiteId::IndustryBuying),
            ("moglix.com", SiteId::Moglix),
            ("SKF India", SiteId::SkfIndia),
            ("SMC Pneumatics", SiteId::SmcPneumatics),
            ("Unknown Store", SiteId::Unsupported),
            ("", SiteId::Unsupported),
        ];

        for (name, expected) in cases {
            assert_eq!(registry.classify(name).site_id(), expected, "site name: {}", name);
        }
    }

    #[test]
    fn test_browser_sites() {
        let registry = SiteRegistry::with_default_sites();
        assert_eq!(registry.classify("Amazon").fetch_strategy(), FetchStrategy::Browser);
        assert_eq!(registry.classify("Flipkart").fetch_strategy(), FetchStrategy::Browser);
        assert_eq!(registry.classify("Moglix").fetch_strategy(), FetchStrategy::Http);
    }

    struct DemoHandler;

    impl SiteHandler for DemoHandler {
        fn site_id(&self) -> SiteId {
            SiteId::Unsupported
        }
        fn fetch_strategy(&self) -> FetchStrategy {
            FetchStrategy::Http
        }
        fn parse(&self, _html: &str, _request: &ExtractionRequest) -> ParsedProduct {
            ParsedProduct {
                name: Some("demo".to_string()),
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_register_custom_handler() {
        let mut registry = SiteRegistry::empty();
        assert!(registry.classify("Demo Shop").ensure_supported().is_err());

        registry.register(&["demo"], Arc::new(DemoHandler));
        let handler = registry.classify("Demo Shop");
        assert!(handler.ensure_supported().is_ok());

        let parsed = handler.parse("", &ExtractionRequest::new("1", "Demo Shop", "http://x"));
        assert_eq!(parsed.name.as_deref(), Some("demo"));
    }
}
