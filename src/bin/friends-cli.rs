//! 好友列表 CLI 客户端（测试版）
//!
//! 非交互式 CLI，用 access token 直接访问 Graph API，获取全部好友后以 JSON 输出

use anyhow::{Context, Result};
use clap::Parser;
use social_friends_sdk_rust::social::friend::{FriendFetcherConfig, FriendListFetcher, FriendListListener};
use social_friends_sdk_rust::social::http::DEFAULT_GRAPH_API_BASE_URL;
use social_friends_sdk_rust::{GraphClientConfig, HttpGraphBridge};
use std::sync::Arc;
use tracing::{error, info};

/// 好友列表 CLI 客户端
#[derive(Parser, Debug)]
#[command(name = "friends-cli")]
#[command(about = "好友列表 CLI - 分页获取当前用户的全部好友并输出 JSON", long_about = None)]
struct Args {
    /// 用户 access token
    #[arg(short = 't', long, env = "GRAPH_ACCESS_TOKEN")]
    access_token: String,

    /// Graph API 基础地址
    #[arg(long, default_value = DEFAULT_GRAPH_API_BASE_URL)]
    api_base_url: String,

    /// 权限范围，逗号分隔
    #[arg(short, long, value_delimiter = ',', default_value = "public_profile,user_friends")]
    permissions: Vec<String>,

    /// 无头像好友使用的占位图
    #[arg(long, default_value = "")]
    placeholder_image_url: String,

    /// 缺少头像时改用占位图
    #[arg(long)]
    placeholder_fallback: bool,

    /// 最大分页数（默认不限制）
    #[arg(long)]
    max_pages: Option<u32>,

    /// 日志级别（默认: info,social_friends_sdk_rust=debug）
    #[arg(long, default_value = "info,social_friends_sdk_rust=debug")]
    log_level: String,

    /// 额外输出日志到文件
    #[arg(long)]
    log_file: Option<String>,
}

/// 初始化日志（stdout 之外可选输出到文件）
fn init_logger(log_level: &str, log_file: Option<&str>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // 日志写到 stderr，stdout 留给 JSON 结果
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("无法创建日志文件 {}", path))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        info!("[CLI] 📝 日志同时输出到文件: {}", path);
    }
    Ok(())
}

/// 输出获取进度
struct CliFriendListListener;

#[async_trait::async_trait]
impl FriendListListener for CliFriendListListener {
    async fn on_fetch_started(&self) {
        info!("[CLI/Friend] 🔄 开始获取好友列表");
    }

    async fn on_page_fetched(&self, page_index: u32, friend_count: usize) {
        info!("[CLI/Friend] 📄 第 {} 页: {} 个好友", page_index, friend_count);
    }

    async fn on_fetch_finished(&self, total: usize) {
        info!("[CLI/Friend] ✅ 获取完成，共 {} 个好友", total);
    }

    async fn on_fetch_failed(&self, error: String) {
        error!("[CLI/Friend] ❌ 获取失败: {}", error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(&args.log_level, args.log_file.as_deref())?;

    info!("[CLI] 🚀 好友列表 CLI");
    info!("[CLI] 🌐 Graph API: {}", args.api_base_url);

    let bridge = HttpGraphBridge::new(
        GraphClientConfig::new(args.access_token).with_api_base_url(args.api_base_url),
    )?;

    let mut config = FriendFetcherConfig::new(args.permissions, args.placeholder_image_url)
        .with_placeholder_fallback(args.placeholder_fallback);
    config.max_pages = args.max_pages;

    let fetcher = FriendListFetcher::with_config(Arc::new(bridge), config)?
        .with_listener(Arc::new(CliFriendListListener));

    fetcher
        .fetch_and_cache_all_friends()
        .await
        .context("获取好友列表失败")?;

    let json = fetcher.friends_json().context("序列化好友列表失败")?;
    println!("{}", json);

    Ok(())
}
