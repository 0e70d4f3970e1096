use std::sync::Arc;

use config::{Config, Environment, File};
use sigmax_bot::client::TelegramClient;
use sigmax_bot::router::CommandRouter;
use sigmax_core::config::AppConfig;
use sigmax_feed::okx::OkxProvider;
use sigmax_manager::watcher::SignalWatcher;
use sigmax_notify::telegram::TelegramNotifier;
use sigmax_store::memory::MemoryProfileStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以内置默认值为基底。
/// 2. 可选的 `sigmax.toml` 配置文件覆盖默认值。
/// 3. `SIGMAX_*` 环境变量（`__` 分隔层级）优先级最高。
///
/// # Returns
/// 合并后的 AppConfig，任一来源解析失败返回错误。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name("sigmax").required(false))
        .add_source(
            Environment::with_prefix("SIGMAX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// # Summary
/// 初始化全局日志，stdout 与滚动文件双输出。
///
/// # Returns
/// 文件写入线程的守卫，须持有至进程退出。
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "sigmax.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();
    guard
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 SignalWatcher 与 CommandRouter。
///
/// # Logic
/// 1. 初始化全局日志并安装 TLS 加密套件。
/// 2. 加载配置，缺失 Bot Token 视为致命错误。
/// 3. 实例化基础设施层（Feed、Notify、Store）。
/// 4. 构造应用服务层（SignalWatcher、CommandRouter）。
/// 5. 并发运行监控循环与指令轮询，等待外部信号退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志与 TLS
    let _guard = init_tracing();
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("Crypto provider already installed");
    }
    info!("Sigmax starting...");

    // 2. 加载配置
    let app_config = load_config()?;
    if app_config.telegram.bot_token.is_empty() {
        return Err("Telegram bot token is not configured (SIGMAX_TELEGRAM__BOT_TOKEN)".into());
    }

    // 3. 实例化基础设施层
    let provider = Arc::new(OkxProvider::new(app_config.feed.base_url.clone()));
    let notifier = Arc::new(TelegramNotifier::new(app_config.telegram.bot_token.clone()));
    let store = Arc::new(MemoryProfileStore::new(app_config.profile.clone()));

    // 4. 构造应用服务层（注入 Core Trait 抽象）
    let watcher = SignalWatcher::new(
        provider,
        notifier.clone(),
        store.clone(),
        app_config.watch.clone(),
        app_config.indicators,
    );
    let router = CommandRouter::new(store, notifier);
    let client = TelegramClient::new(app_config.telegram.bot_token.clone());

    // 5. 并发运行监控循环与指令轮询
    let watcher_task = tokio::spawn(watcher.run());
    let poll_task = tokio::spawn(client.run(router));
    info!("SignalWatcher and command poll loop running. Waiting for signals...");

    // 6. 挂起主线程，等待外部退出信号
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting...");
    watcher_task.abort();
    poll_task.abort();

    Ok(())
}
