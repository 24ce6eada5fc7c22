use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pot_catalog::config::load_config;
use pot_catalog::infrastructure::logger::Logger;
use pot_catalog::server;

/// 锅具商店商品目录服务
#[derive(Debug, Parser)]
#[command(name = "catalog-server", version, about)]
struct Args {
    /// 配置文件路径，默认依次查找 config.toml 与 ./config/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, source) = load_config(args.config.as_deref())?;
    let _guard = Logger::init(&config.logging)?;

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    server::run(config).await
}
