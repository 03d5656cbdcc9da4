// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{EngineError, FetchEngine, FetchRequest, FetchResponse};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// 浏览器关闭后等待事件循环退出的上限
const HANDLER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const PAGE_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// 已建立的浏览器会话及其事件处理任务
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // 未显式关闭时兜底，事件循环不得比会话活得更久
        self.handler.abort();
    }
}

/// 无头浏览器引擎
///
/// 基于chromiumoxide。浏览器会话在首次抓取时启动，此后在同一引擎实例内
/// 复用，直到调用 [`FetchEngine::close`]。会话只属于当前实例，不可跨并发
/// 调用方共享。
pub struct BrowserEngine {
    settings: BrowserSettings,
    user_agent: String,
    session: Mutex<Option<BrowserSession>>,
}

impl BrowserEngine {
    pub fn new(settings: BrowserSettings, user_agent: impl Into<String>) -> Self {
        Self {
            settings,
            user_agent: user_agent.into(),
            session: Mutex::new(None),
        }
    }

    /// 会话是否已经启动
    pub async fn is_started(&self) -> bool {
        self.session.lock().await.is_some()
    }

    async fn start_session(&self) -> Result<BrowserSession, EngineError> {
        let (browser, mut handler) = if let Some(url) = &self.settings.remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url.as_str()).await.map_err(|e| {
                EngineError::Browser(format!("failed to connect to remote Chrome: {}", e))
            })?
        } else {
            tracing::info!("Launching headless Chrome");
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(Duration::from_secs(self.settings.timeout_secs))
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(EngineError::Browser)?;

            Browser::launch(config)
                .await
                .map_err(|e| EngineError::Browser(format!("failed to launch Chrome: {}", e)))?
        };

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(BrowserSession { browser, handler })
    }

    /// 打开新标签页渲染 `url`
    ///
    /// 超时计时覆盖整个渲染过程；无论成功、出错还是超时，标签页都会被关闭。
    async fn render(
        &self,
        browser: &Browser,
        url: &str,
        timeout: Duration,
    ) -> Result<String, EngineError> {
        let page = tokio::time::timeout(timeout, browser.new_page("about:blank"))
            .await
            .map_err(|_| EngineError::Timeout(timeout))?
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        let load = self.load(page.clone(), url);
        let cleanup = async move {
            match tokio::time::timeout(PAGE_CLOSE_TIMEOUT, page.close()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::debug!("Failed to close page for {}: {}", url, e),
                Err(_) => tracing::warn!("Closing page for {} timed out", url),
            }
        };

        close_after(timeout, load, cleanup).await
    }

    async fn load(&self, page: Page, url: &str) -> Result<String, EngineError> {
        page.set_user_agent(self.user_agent.as_str())
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        page.goto(url)
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        // 给脚本渲染留出时间
        if self.settings.settle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.settle_ms)).await;
        }

        page.content()
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))
    }
}

#[async_trait]
impl FetchEngine for BrowserEngine {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let start = Instant::now();
        let mut guard = self.session.lock().await;

        if guard.is_none() {
            *guard = Some(self.start_session().await?);
        }
        let session = guard
            .as_ref()
            .ok_or_else(|| EngineError::Browser("browser session unavailable".to_string()))?;

        let content = self
            .render(&session.browser, &request.url, request.timeout)
            .await?;

        // chromiumoxide 的 goto 不直接暴露响应状态
        Ok(FetchResponse {
            status_code: 200,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn close(&self) -> Result<(), EngineError> {
        let Some(mut session) = self.session.lock().await.take() else {
            return Ok(());
        };

        tracing::info!("Closing headless browser session");
        let closed = session
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| EngineError::Browser(e.to_string()));

        if let Err(e) = session.browser.wait().await {
            tracing::debug!("Waiting for browser process failed: {}", e);
        }
        join_handler(&mut session.handler, HANDLER_SHUTDOWN_TIMEOUT).await;

        closed
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

/// 在超时限制内执行 `work`，之后无条件执行 `cleanup`
async fn close_after<T, W, C>(timeout: Duration, work: W, cleanup: C) -> Result<T, EngineError>
where
    W: Future<Output = Result<T, EngineError>>,
    C: Future<Output = ()>,
{
    let outcome = match tokio::time::timeout(timeout, work).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::Timeout(timeout)),
    };
    cleanup.await;
    outcome
}

/// 等待事件循环任务退出，超时后中止
async fn join_handler(handler: &mut JoinHandle<()>, timeout: Duration) {
    match tokio::time::timeout(timeout, &mut *handler).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!("Browser event loop ended abnormally: {}", e),
        Err(_) => {
            tracing::warn!("Browser event loop did not stop within {:?}, aborting", timeout);
            handler.abort();
        }
    }
}
