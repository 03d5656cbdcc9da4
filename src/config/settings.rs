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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的浏览器风格 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_BROWSER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BROWSER_SETTLE_MS: u64 = 2000;
const DEFAULT_BATCH_DELAY_MS: u64 = 1500;
const DEFAULT_OUTPUT_DIR: &str = "./output";

/// 应用程序配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// HTTP抓取配置
    pub http: HttpSettings,
    /// 无头浏览器配置
    pub browser: BrowserSettings,
    /// 批处理配置
    pub batch: BatchSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// HTTP抓取配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
}

/// 无头浏览器配置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 远程调试地址，设置后连接已有的Chrome而不是本地启动
    pub remote_debugging_url: Option<String>,
    /// 单页抓取超时（秒）
    pub timeout_secs: u64,
    /// 页面加载后的等待时间（毫秒）
    pub settle_ms: u64,
}

/// 批处理配置
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    /// 两次请求之间的固定间隔（毫秒）
    pub delay_ms: u64,
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 输出目录
    pub dir: String,
    /// 是否额外导出JSON
    pub json: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            remote_debugging_url: None,
            timeout_secs: DEFAULT_BROWSER_TIMEOUT_SECS,
            settle_ms: DEFAULT_BROWSER_SETTLE_MS,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
            json: true,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `SKU_HARVESTER__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("http.timeout_secs", DEFAULT_HTTP_TIMEOUT_SECS)?
            .set_default("http.user_agent", DEFAULT_USER_AGENT)?
            .set_default("browser.timeout_secs", DEFAULT_BROWSER_TIMEOUT_SECS)?
            .set_default("browser.settle_ms", DEFAULT_BROWSER_SETTLE_MS)?
            .set_default("batch.delay_ms", DEFAULT_BATCH_DELAY_MS)?
            .set_default("output.dir", DEFAULT_OUTPUT_DIR)?
            .set_default("output.json", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SKU_HARVESTER").separator("__"));

        builder.build()?.try_deserialize()
    }
}
