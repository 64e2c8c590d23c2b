//! TUIのイベントループ、入力処理、状態管理。

mod handlers;
mod render;

use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{
    config::Config,
    events::UiState,
    pages::{self, PageContent},
    selector::{PageEvent, PageSelector},
    shortcuts::Shortcuts,
    ui::Tui,
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;

/// 入力処理と描画で共有するアプリ状態。
pub struct App {
    /// メモリ上の現在設定。
    pub cfg: Config,
    /// 表示中ページの選択状態。
    pub selector: PageSelector<PageContent>,
    /// セレクタからの変更通知。
    pub page_rx: mpsc::UnboundedReceiver<PageEvent>,
    /// ステータスなどUI固有の状態。
    pub ui: UiState,
    /// ショートカットキー設定。
    pub shortcuts: Shortcuts,
}

impl App {
    /// 設定からページ一覧を組み立て、変更通知を購読する。
    pub fn new(cfg: Config, shortcuts: Shortcuts) -> Result<Self> {
        let mut selector = pages::build_selector(&cfg.pages, cfg.initial_page)?;
        let page_rx = selector.subscribe();
        let status = match selector.current_page() {
            Ok(page) => format!("Showing {}", page.title),
            Err(_) => "No pages".into(),
        };
        Ok(Self {
            cfg,
            selector,
            page_rx,
            ui: UiState {
                status,
                error: None,
            },
            shortcuts,
        })
    }

    /// 溜まっている変更通知をすべてUI状態へ反映する。
    pub fn drain_page_events(&mut self) {
        while let Ok(ev) = self.page_rx.try_recv() {
            handle_page_event(self, ev);
        }
    }
}

/// ユーザーが終了するまでメインTUIループを回す。
pub fn run_app(terminal: &mut Tui, cfg: Config) -> Result<()> {
    // ショートカット設定を読み込む（無ければデフォルト）。
    let shortcuts = Shortcuts::load_or_default("shortcut.toml")?;
    let mut app = App::new(cfg, shortcuts)?;
    tracing::info!(
        pages = app.selector.total_pages(),
        initial = app.cfg.initial_page,
        subscribers = app.selector.subscriber_count(),
        "main page ready"
    );

    loop {
        // 描画の前に変更通知を消化する。
        app.drain_page_events();

        // 現在の状態を描画する。
        terminal.draw(|f| draw(f, &app))?;

        // UIの応答性確保のため短いタイムアウトで入力をポーリングする。
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
        {
            // どの状態でもCtrl+Cで終了できるようにする。
            if is_ctrl_c(&k) || handle_key(&mut app, k) {
                break;
            }
        }
    }
    Ok(())
}

/// ページ変更をステータスへ反映する。
fn handle_page_event(app: &mut App, ev: PageEvent) {
    match ev {
        PageEvent::Changed { from, to } => {
            tracing::info!(?from, to, "page changed");
            let title = app
                .selector
                .page_at(to)
                .map(|p| p.title)
                .unwrap_or_default();
            let now = chrono::Local::now().format("%H:%M:%S");
            app.ui.status = format!("{now} switched to {title}");
            app.ui.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_starts_at_initial_page() {
        let mut cfg = Config::default();
        cfg.initial_page = 1;
        let app = App::new(cfg, Shortcuts::default()).unwrap();

        assert_eq!(app.selector.current(), Ok(1));
        assert_eq!(app.ui.status, "Showing LAN");
        assert_eq!(app.selector.subscriber_count(), 1);
    }

    #[test]
    fn test_drain_updates_status() {
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        app.ui.error = Some("stale".into());

        app.selector.select(2).unwrap();
        app.drain_page_events();

        assert!(app.ui.status.ends_with("switched to Files"));
        assert!(app.ui.error.is_none());
        assert!(app.page_rx.try_recv().is_err());
    }
}
