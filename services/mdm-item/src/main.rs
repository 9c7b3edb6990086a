//! mdm-item CLI
//!
//! 从文件（或标准输入）读取物料定义 JSON 数组，经处理器派生合规字段后输出。

use std::io::Read;

use anyhow::Context;
use cuba_config::AppConfig;
use cuba_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tracing::{info, warn};

use mdm_item::application::{CreateItemCommand, ServiceHandler};
use mdm_item::infrastructure::persistence::in_memory_repositories;

const DEFAULT_CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir =
        std::env::var("MDM_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = AppConfig::load(&config_dir).context("failed to load configuration")?;

    if config.is_production() || config.telemetry.json {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }
    let metrics = if config.telemetry.metrics_enabled {
        Some(init_metrics().context("failed to install metrics recorder")?)
    } else {
        None
    };

    info!(app_name = %config.app_name, app_env = %config.app_env, "Runtime initialized");

    let input = read_input(std::env::args().nth(1))?;
    let commands: Vec<CreateItemCommand> =
        serde_json::from_str(&input).context("input must be a JSON array of item definitions")?;

    let handler = ServiceHandler::new(in_memory_repositories(), config.inventory.clone());

    let total = commands.len();
    let mut rejected = 0usize;
    for cmd in commands {
        let code = cmd.item_code.clone();
        if let Err(e) = handler.create_item(cmd).await {
            warn!(item_code = %code, error = %e, "Item rejected");
            rejected += 1;
        }
    }

    let items = handler.list_items().await?;
    println!("{}", serde_json::to_string_pretty(&items)?);

    if let Some(handle) = metrics {
        info!(metrics = %handle.render(), "Metrics snapshot");
    }

    if rejected > 0 {
        anyhow::bail!("{} of {} item definitions rejected", rejected, total);
    }
    Ok(())
}

fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
