//! ギャラリーの閲覧状態
//!
//! 検索文字列・分類フィルタ・選択中エントリ・表示レイアウトをまとめて保持する。
//! アルバムとカテゴリのフィルタは画面上では排他（片方を選ぶと他方が解除される）。

use crate::catalog::Catalog;
use crate::types::{Axis, CatalogEntry, EntryId};

/// 表示レイアウト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewLayout {
    #[default]
    GridCompact,
    GridLarge,
    List,
}

impl std::str::FromStr for ViewLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid-compact" | "compact" => Ok(ViewLayout::GridCompact),
            "grid-large" | "large" => Ok(ViewLayout::GridLarge),
            "list" => Ok(ViewLayout::List),
            _ => Err(format!(
                "Unknown layout: {}. Use grid-compact, grid-large, or list",
                s
            )),
        }
    }
}

impl std::fmt::Display for ViewLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewLayout::GridCompact => write!(f, "grid-compact"),
            ViewLayout::GridLarge => write!(f, "grid-large"),
            ViewLayout::List => write!(f, "list"),
        }
    }
}

/// 閲覧状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    pub query: String,
    pub album_filter: Option<String>,
    pub category_filter: Option<String>,
    pub selected: Option<EntryId>,
    pub layout: ViewLayout,
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// アルバムで絞り込む（カテゴリフィルタは解除）
    pub fn select_album(&mut self, album: Option<String>) {
        self.album_filter = album;
        self.category_filter = None;
    }

    /// カテゴリで絞り込む（アルバムフィルタは解除）
    pub fn select_category(&mut self, category: Option<String>) {
        self.category_filter = category;
        self.album_filter = None;
    }

    pub fn select(&mut self, id: EntryId) {
        self.selected = Some(id);
    }

    /// 先頭エントリを選択（読み込み直後）
    pub fn select_first(&mut self, catalog: &Catalog) {
        self.selected = catalog.entries().first().map(|e| e.id);
    }

    pub fn selected_entry<'c>(&self, catalog: &'c Catalog) -> Option<&'c CatalogEntry> {
        self.selected.and_then(|id| catalog.get(id))
    }

    /// 現在の条件で表示されるエントリ
    pub fn visible<'c>(&self, catalog: &'c Catalog) -> Vec<&'c CatalogEntry> {
        catalog.filter(
            &self.query,
            self.album_filter.as_deref(),
            self.category_filter.as_deref(),
        )
    }

    fn filter_mut(&mut self, axis: Axis) -> &mut Option<String> {
        match axis {
            Axis::Album => &mut self.album_filter,
            Axis::Category => &mut self.category_filter,
        }
    }

    /// 分類名の変更にフィルタを追従させる
    pub fn after_rename(&mut self, axis: Axis, old_value: &str, new_value: &str) {
        let new_value = new_value.trim();
        if new_value.is_empty() {
            return;
        }
        let filter = self.filter_mut(axis);
        if filter.as_deref() == Some(old_value) {
            *filter = Some(new_value.to_string());
        }
    }

    /// 削除された分類のフィルタを解除する
    pub fn after_retire(&mut self, axis: Axis, value: &str) {
        let filter = self.filter_mut(axis);
        if filter.as_deref() == Some(value) {
            *filter = None;
        }
    }
}
