// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dispatcher::ExtractionDispatcher;
use crate::domain::models::product::{
    ExtractionOutcome, ExtractionRequest, ExtractionResult, ExtractionStatus, ImageRow,
    SpecificationRow,
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// 三张输出表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputTables {
    pub results: Vec<ExtractionResult>,
    pub specifications: Vec<SpecificationRow>,
    pub images: Vec<ImageRow>,
}

/// 批处理统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// 成功率（百分比），`Partial` 不计入成功
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "total: {}, success: {}, partial: {}, failed: {}, success rate: {:.1}%",
            self.total,
            self.success,
            self.partial,
            self.failed,
            self.success_rate()
        )
    }
}

/// 结果聚合器
///
/// 由调用方持有，把每次分发的输出追加到三张表中。
#[derive(Debug, Default)]
pub struct ResultAggregator {
    tables: OutputTables,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ExtractionOutcome) {
        self.tables.results.push(outcome.result);
        self.tables.specifications.extend(outcome.specifications);
        self.tables.images.extend(outcome.images);
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.tables.results.len(),
            ..Default::default()
        };
        for result in &self.tables.results {
            match result.status {
                ExtractionStatus::Success => summary.success += 1,
                ExtractionStatus::Partial => summary.partial += 1,
                ExtractionStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn tables(&self) -> &OutputTables {
        &self.tables
    }

    pub fn into_tables(self) -> OutputTables {
        self.tables
    }
}

/// 顺序批处理
///
/// 一行完全处理完才开始下一行，两行之间固定等待。无论正常结束还是被
/// 停止信号中断，返回前都会关闭分发器的浏览器会话。
pub struct BatchRunner {
    dispatcher: ExtractionDispatcher,
    delay: Duration,
    stop: Option<watch::Receiver<bool>>,
}

impl BatchRunner {
    pub fn new(dispatcher: ExtractionDispatcher, delay: Duration) -> Self {
        Self {
            dispatcher,
            delay,
            stop: None,
        }
    }

    /// 设置停止信号，值变为 `true` 后不再处理新的行
    pub fn with_stop_signal(mut self, stop: watch::Receiver<bool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// 处理全部请求
    pub async fn run(mut self, requests: &[ExtractionRequest]) -> ResultAggregator {
        let mut aggregator = ResultAggregator::new();
        let total = requests.len();

        for (idx, request) in requests.iter().enumerate() {
            if self.is_stopped() {
                warn!("Batch stopped after {} of {} rows", idx, total);
                break;
            }

            info!("Processing row {}/{}", idx + 1, total);
            let outcome = self.dispatcher.dispatch(request).await;
            aggregator.push(outcome);

            if idx + 1 < total {
                self.pause().await;
            }
        }

        if let Err(e) = self.dispatcher.close().await {
            warn!("Failed to close dispatcher cleanly: {}", e);
        }

        info!("Batch finished: {}", aggregator.summary());
        aggregator
    }

    fn is_stopped(&self) -> bool {
        self.stop.as_ref().is_some_and(|rx| *rx.borrow())
    }

    async fn pause(&mut self) {
        let delay = self.delay;
        match self.stop.as_mut() {
            Some(rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    changed = rx.changed() => {
                        // 发送端已释放，退化为普通等待
                        if changed.is_err() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
            None => tokio::time::sleep(delay).await,
        }
    }
}
