//! Fleet Carrier Tracker CLI
//!
//! 读取 Elite Dangerous journal 事件，把 carrier 跳跃计划发送到 Discord webhook

use anyhow::Result;
use clap::{Parser, Subcommand};
use fleet_carrier_tracker::{
    cli::{ConfigAction, EventArgs, JournalArgs},
    CarrierTracker, SettingsStore,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fct")]
#[command(about = "Fleet Carrier Tracker - 把 carrier 跳跃通知发送到 Discord")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/fleet-carrier-tracker/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 处理单个事件记录
    Event(EventArgs),
    /// 逐行处理 journal（文件或 stdin）
    Journal(JournalArgs),
    /// 发送测试消息（跳跃请求 + 取消）
    Test {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 查看或修改设置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug fct journal --file Journal.log
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fleet_carrier_tracker=info,fct=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => SettingsStore::default_path()?,
    };

    // config 命令可以修复损坏的配置文件，其它命令要求配置可读
    let mut settings = match cli.command {
        Commands::Config { .. } => SettingsStore::load_or_reset(&config_path)?,
        _ => SettingsStore::load(&config_path)?,
    };
    debug!(path = %settings.path().display(), "Settings loaded");

    match cli.command {
        Commands::Event(args) => {
            let mut tracker = CarrierTracker::new(Box::new(settings))?;
            fleet_carrier_tracker::cli::handle_event(&mut tracker, args)?;
        }
        Commands::Journal(args) => {
            let mut tracker = CarrierTracker::new(Box::new(settings))?;
            let summary = fleet_carrier_tracker::cli::handle_journal(&mut tracker, args)?;
            info!(
                processed = summary.processed,
                skipped = summary.skipped,
                delivered = summary.delivered,
                "Journal processed"
            );
        }
        Commands::Test { json } => {
            let mut tracker = CarrierTracker::new(Box::new(settings))?;
            fleet_carrier_tracker::cli::handle_test(&mut tracker, json)?;
        }
        Commands::Config { action } => {
            fleet_carrier_tracker::cli::handle_config(&mut settings, action)?;
        }
    }

    Ok(())
}
