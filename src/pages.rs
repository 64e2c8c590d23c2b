//! コンテンツ領域に表示するページのモデル。

use crate::{config::PageCfg, selector::PageSelector};

/// 1ページ分の表示内容。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContent {
    /// サイドメニューに並ぶ見出し。
    pub title: String,
    /// コンテンツ領域の本文。
    pub body: String,
}

impl From<&PageCfg> for PageContent {
    fn from(cfg: &PageCfg) -> Self {
        Self {
            title: cfg.title.clone(),
            body: cfg.body.clone(),
        }
    }
}

/// 設定のページ一覧からセレクタを組み立てる。
pub fn build_selector(
    pages: &[PageCfg],
    initial: usize,
) -> crate::selector::SelectorResult<PageSelector<PageContent>> {
    // 工場関数が所有できるよう一覧を複製しておく。
    let pages: Vec<PageContent> = pages.iter().map(PageContent::from).collect();
    let total = pages.len();
    PageSelector::with_initial(total, initial, move |i| pages[i].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_build_selector_from_default_config() {
        let cfg = Config::default();
        let selector = build_selector(&cfg.pages, cfg.initial_page).unwrap();

        assert_eq!(selector.total_pages(), cfg.pages.len());
        assert_eq!(selector.current(), Ok(0));
        assert_eq!(selector.current_page().unwrap().title, "Connect");
        assert_eq!(selector.page_at(3).unwrap().title, "Settings");
    }

    #[test]
    fn test_build_selector_rejects_bad_initial() {
        let cfg = Config::default();
        assert!(build_selector(&cfg.pages, 7).is_err());
    }
}
