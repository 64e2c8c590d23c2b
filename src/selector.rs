//! ページ選択の状態管理と変更通知。
//!
//! 描画側はこのモジュールに依存するが、このモジュールは描画側を知らない。
//! 選択が変わると購読者へ [`PageEvent`] を送るだけで、再描画の意味は
//! ホスト画面が決める。

use tokio::sync::mpsc;

/// ページ選択操作のエラー。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// 指定インデックスが `[0, total)` の外にある。
    #[error("page index {index} out of range (total pages: {total})")]
    OutOfRange { index: i128, total: usize },

    /// ページが1つも無いため現在ページが存在しない。
    #[error("no pages to select")]
    Empty,
}

/// ページ選択操作の結果型。
pub type SelectorResult<T> = Result<T, SelectorError>;

/// 購読者へ送る選択変更イベント。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// 現在ページが `from` から `to` へ変わった。
    Changed { from: Option<usize>, to: usize },
}

/// 固定数のページから1つを選択し、そのページの内容を生成する。
pub struct PageSelector<C> {
    total_pages: usize,
    current_index: Option<usize>,
    factory: Box<dyn Fn(usize) -> C>,
    subscribers: Vec<mpsc::UnboundedSender<PageEvent>>,
}

impl<C> PageSelector<C> {
    /// ページ数と内容生成関数から作成する。ページがあれば先頭を選択状態にする。
    pub fn new(total_pages: usize, factory: impl Fn(usize) -> C + 'static) -> Self {
        Self {
            total_pages,
            current_index: (total_pages > 0).then_some(0),
            factory: Box::new(factory),
            subscribers: Vec::new(),
        }
    }

    /// 初期ページを指定して作成する。
    pub fn with_initial(
        total_pages: usize,
        initial: usize,
        factory: impl Fn(usize) -> C + 'static,
    ) -> SelectorResult<Self> {
        let mut selector = Self::new(total_pages, factory);
        selector.check(to_signed(initial))?;
        selector.current_index = Some(initial);
        Ok(selector)
    }

    /// 構築時に固定されたページ数。
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// 現在のページ番号（0始まり）。
    pub fn current(&self) -> SelectorResult<usize> {
        self.current_index.ok_or(SelectorError::Empty)
    }

    /// 指定ページを選択する。失敗時は状態を変えない。
    pub fn select(&mut self, index: usize) -> SelectorResult<()> {
        let index = self.check(to_signed(index))?;
        self.apply(index);
        Ok(())
    }

    /// 現在ページから `delta` だけ移動する。
    pub fn select_relative(&mut self, delta: isize) -> SelectorResult<()> {
        let current = self.current()?;
        let target = to_signed(current) + delta as i128;
        let index = self.check(target)?;
        self.apply(index);
        Ok(())
    }

    /// 次のページへ進む。
    pub fn next(&mut self) -> SelectorResult<()> {
        self.select_relative(1)
    }

    /// 前のページへ戻る。
    pub fn previous(&mut self) -> SelectorResult<()> {
        self.select_relative(-1)
    }

    pub fn first(&mut self) -> SelectorResult<()> {
        if self.is_empty() {
            return Err(SelectorError::Empty);
        }
        self.select(0)
    }

    pub fn last(&mut self) -> SelectorResult<()> {
        if self.is_empty() {
            return Err(SelectorError::Empty);
        }
        self.select(self.total_pages - 1)
    }

    /// 指定ページの内容を生成する。キャッシュはしない。
    pub fn page_at(&self, index: usize) -> SelectorResult<C> {
        let index = self.check(to_signed(index))?;
        Ok((self.factory)(index))
    }

    /// 現在ページの内容を生成する。
    pub fn current_page(&self) -> SelectorResult<C> {
        self.page_at(self.current()?)
    }

    /// 選択変更イベントの購読を登録し、受信側を返す。
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<PageEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// 登録済みの購読者数（破棄済みのものは次回通知時に除かれる）。
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// 範囲を検証し、有効なら `usize` に戻して返す。
    fn check(&self, index: i128) -> SelectorResult<usize> {
        match usize::try_from(index) {
            Ok(i) if i < self.total_pages => Ok(i),
            _ => Err(SelectorError::OutOfRange {
                index,
                total: self.total_pages,
            }),
        }
    }

    /// 検証済みのインデックスを反映し、変化があれば通知する。
    fn apply(&mut self, index: usize) {
        let from = self.current_index;
        if from == Some(index) {
            return;
        }
        self.current_index = Some(index);
        tracing::debug!(?from, to = index, "page selected");
        self.emit(PageEvent::Changed { from, to: index });
    }

    fn emit(&mut self, event: PageEvent) {
        // 受信側が閉じた購読者はここで取り除く。
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

impl<C> std::fmt::Debug for PageSelector<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSelector")
            .field("total_pages", &self.total_pages)
            .field("current_index", &self.current_index)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// `usize` を符号付きへ広げる。`i128` なので値は欠けない。
fn to_signed(index: usize) -> i128 {
    index as i128
}
