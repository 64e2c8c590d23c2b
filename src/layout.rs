//! レイアウト計算のヘルパー関数

use ratatui::prelude::*;

/// メイン画面の領域
pub struct MainLayout {
    /// サイドメニュー + 区切り線 + コンテンツの領域
    pub body: Rect,
    /// STATUSバーの領域
    pub status_bar: Rect,
}

/// ボディ部の3つの領域
pub struct BodyLayout {
    /// 固定幅のサイドメニュー
    pub side_menu: Rect,
    /// 1列幅の区切り線
    pub divider: Rect,
    /// ページ表示領域
    pub content: Rect,
}

/// メイン画面をBodyとSTATUSバーに分割
pub fn create_main_layout(area: Rect) -> MainLayout {
    let [body, status_bar] = Layout::vertical([
        Constraint::Min(1),    // Body
        Constraint::Length(3), // STATUSバー
    ])
    .areas(area);

    MainLayout { body, status_bar }
}

/// Body領域をサイドメニュー・区切り線・コンテンツに分割
pub fn create_body_layout(area: Rect, menu_width: u16) -> BodyLayout {
    let [side_menu, divider, content] = Layout::horizontal([
        Constraint::Length(menu_width),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(area);

    BodyLayout {
        side_menu,
        divider,
        content,
    }
}
