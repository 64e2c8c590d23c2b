//! キー入力ハンドラー関数。

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    events::Action,
    selector::SelectorResult,
    shortcuts::{self, Shortcuts},
};

use super::App;

/// キー入力を1件処理し、終了すべきならtrueを返す。
pub fn handle_key(app: &mut App, k: KeyEvent) -> bool {
    // 押下以外（リピート/解放）は無視する。
    if k.kind != KeyEventKind::Press {
        return false;
    }
    let Some(action) = key_to_action(&app.shortcuts, &k) else {
        return false;
    };
    apply_action(app, action)
}

/// Ctrl+Cかどうかを判定する。
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// ショートカット設定に従ってキーを操作へ変換する。
pub fn key_to_action(shortcuts: &Shortcuts, k: &KeyEvent) -> Option<Action> {
    let sc = &shortcuts.main;
    if shortcuts::matches_shortcut(k, &sc.quit) {
        Some(Action::Quit)
    } else if shortcuts::matches_shortcut(k, &sc.next) {
        Some(Action::Next)
    } else if shortcuts::matches_shortcut(k, &sc.previous) {
        Some(Action::Previous)
    } else if shortcuts::matches_shortcut(k, &sc.first) {
        Some(Action::First)
    } else if shortcuts::matches_shortcut(k, &sc.last) {
        Some(Action::Last)
    } else {
        shortcuts::digit_page(k).map(Action::Select)
    }
}

/// 操作をセレクタへ適用する。終了操作ならtrueを返す。
pub fn apply_action(app: &mut App, action: Action) -> bool {
    let res: SelectorResult<()> = match action {
        Action::Quit => return true,
        Action::Next => app.selector.next(),
        Action::Previous => app.selector.previous(),
        Action::First => app.selector.first(),
        Action::Last => app.selector.last(),
        Action::Select(i) => app.selector.select(i),
    };
    match res {
        // 同じページの再選択では通知が来ないため、ここで古いエラーを消す。
        Ok(()) => app.ui.error = None,
        // 範囲外はホスト側の判断でステータスに出すだけにとどめる。
        Err(e) => {
            tracing::warn!(?action, "page selection rejected: {e}");
            app.ui.error = Some(e.to_string());
        }
    }
    false
}
