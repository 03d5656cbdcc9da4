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

use clap::Parser;
use sku_harvester::application::batch::BatchRunner;
use sku_harvester::application::dispatcher::ExtractionDispatcher;
use sku_harvester::config::settings::Settings;
use sku_harvester::infrastructure::{export, input};
use sku_harvester::utils::telemetry;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// 从电商页面批量提取商品信息
#[derive(Parser, Debug)]
#[command(name = "sku-harvester")]
#[command(about = "Extract product name, price, specifications and images from e-commerce pages")]
#[command(version)]
struct Cli {
    /// 输入CSV，需包含 materialId、Source、Product URL 三列
    input: PathBuf,

    #[arg(short, long, help = "Directory for the exported tables")]
    output_dir: Option<PathBuf>,

    #[arg(short, long, help = "Delay between rows in milliseconds")]
    delay_ms: Option<u64>,

    #[arg(long, help = "Skip the JSON export")]
    no_json: bool,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.output.dir = dir.to_string_lossy().into_owned();
        }
        if let Some(delay) = self.delay_ms {
            settings.batch.delay_ms = delay;
        }
        if self.no_json {
            settings.output.json = false;
        }
    }
}

/// 主函数
///
/// 逐行处理始终在单个线程上进行
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting sku-harvester...");

    if let Err(e) = run(cli).await {
        error!("Fatal: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // 2. Load configuration
    let mut settings = Settings::new()?;
    cli.apply(&mut settings);
    info!("Configuration loaded");

    // 3. Read input rows
    let requests = input::read_requests(&cli.input)?;
    if requests.is_empty() {
        warn!("Input file {} has no rows", cli.input.display());
    }

    // 4. Build dispatcher and stop signal
    let dispatcher = ExtractionDispatcher::new(&settings)?;
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, finishing current row...");
            let _ = stop_tx.send(true);
        }
    });

    // 5. Run batch
    let aggregator =
        BatchRunner::new(dispatcher, Duration::from_millis(settings.batch.delay_ms))
            .with_stop_signal(stop_rx)
            .run(&requests)
            .await;
    let summary = aggregator.summary();
    let tables = aggregator.into_tables();

    // 6. Export
    let output_dir = Path::new(&settings.output.dir);
    let written = export::write_csv_tables(output_dir, &tables)?;
    for path in &written {
        info!("Saved {}", path.display());
    }
    if settings.output.json {
        export::write_json(output_dir.join("results.json"), &tables)?;
    }

    println!("Extraction complete");
    println!("  Total:        {}", summary.total);
    println!("  Success:      {}", summary.success);
    println!("  Partial:      {}", summary.partial);
    println!("  Failed:       {}", summary.failed);
    println!("  Success rate: {:.1}%", summary.success_rate());

    Ok(())
}
