//! アプリケーションのエントリポイントと初期化。

use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod config;
mod events;
mod layout;
mod pages;
mod selector;
mod shortcuts;
mod ui;

use config::Config;

/// ファイルロギングを初期化し、非同期ガードを生存させる。
fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    // TUIの標準出力を汚さないよう、ファイルへ直接書き込む。
    let file_appender = tracing_appender::rolling::never(".", log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log_file);
    Ok(guard)
}

/// エントリポイント：設定読込→ログ初期化→UI開始→端末復元。
fn main() -> Result<()> {
    // ログ先が設定にあるため、設定を先に読む（初回はデフォルトを生成）。
    let cfg = Config::load_or_default(Path::new("main_page.toml"))?;
    let _log_guard = init_logging(&cfg.logging.file)?;
    tracing::info!("app starting");

    let mut terminal = ui::init_terminal()?;
    let res = app::run_app(&mut terminal, cfg);
    // 端末の状態を必ず元に戻す。
    ui::restore_terminal()?;

    if let Err(ref e) = res {
        tracing::error!("app error: {e:#}");
    }
    tracing::info!("app exiting");
    res
}
