//! 描画側と共有するUI状態と、キー入力から得られる操作。

/// ページ選択に対するユーザー操作。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// アプリを終了する。
    Quit,
    /// 次のページへ。
    Next,
    /// 前のページへ。
    Previous,
    /// 先頭ページへ。
    First,
    /// 末尾ページへ。
    Last,
    /// 番号指定でページを選ぶ（0始まり）。
    Select(usize),
}

/// 描画側と共有するUI状態。
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// 画面下部のステータス文言。
    pub status: String,
    /// エラーメッセージ（強調表示用）。
    pub error: Option<String>,
}
