use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use twinpanel::app::App;
use twinpanel::config::{Config, ConfigOverrides};
use twinpanel::server;

const DEFAULT_LOG_FILTER: &str = "twinpanel=info,tower_http=info";

/// 듀얼 패널 원격 파일 관리자 서버
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 바인드 주소 (설정 파일보다 우선)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// 토큰이 없을 때 두 패널이 시작하는 경로
    #[arg(long)]
    default_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging (RUST_LOG overrides the default filter)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        config_file: args.config,
        bind_addr: args.bind,
        default_path: args.default_path,
    };
    let config = Config::load(&overrides).context("failed to load configuration")?;

    let app = Arc::new(App::new(&config));
    let router = server::router(app, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        root = %config.root.display(),
        default_path = %config.default_path.display(),
        "twinpanel listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("twinpanel stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
