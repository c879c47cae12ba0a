//! カタログインデックス
//!
//! エントリの集合を追加順に保持し、アルバム / カテゴリの一覧（導出値）と
//! 検索文字列 + 分類フィルタによる絞り込みを提供する。

use crate::error::Result;
use crate::palette::Palette;
use crate::taxonomy::TaxonomyEditor;
use crate::types::{normalize_bucket, Axis, CatalogEntry, EntryId, DEFAULT_FALLBACK_BUCKET};
use std::collections::{BTreeSet, HashSet};

/// サイドバーの分類項目
///
/// 先頭の `All` は「絞り込みなし」を表す番兵で、データには存在しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    All,
    Value(String),
}

impl Bucket {
    /// 表示ラベル
    pub fn label(&self) -> &str {
        match self {
            Bucket::All => "All",
            Bucket::Value(v) => v,
        }
    }

    /// フィルタ値（`All` は `None`）
    pub fn as_filter(&self) -> Option<&str> {
        match self {
            Bucket::All => None,
            Bucket::Value(v) => Some(v),
        }
    }
}

/// カタログ本体
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// 使用中のID
    ids: HashSet<EntryId>,
    next_id: u64,
    fallback_bucket: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK_BUCKET)
    }

    /// フォールバック分類名を指定して空のカタログを作る
    pub fn with_fallback(fallback_bucket: impl Into<String>) -> Self {
        let fallback_bucket = normalize_bucket(&fallback_bucket.into(), DEFAULT_FALLBACK_BUCKET);
        Self {
            entries: Vec::new(),
            ids: HashSet::new(),
            next_id: 1,
            fallback_bucket,
        }
    }

    /// 外部から読み込んだレコード列でカタログを構築
    ///
    /// ID が 0（未設定）または重複しているレコードには新しい ID を振り直す。
    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogEntry>,
        fallback_bucket: impl Into<String>,
    ) -> Self {
        let mut catalog = Self::with_fallback(fallback_bucket);
        let entries: Vec<CatalogEntry> = entries.into_iter().collect();

        // 先に有効なIDをすべて確保してから、残りに空きIDを振る
        let keep: Vec<bool> = entries
            .iter()
            .map(|e| e.id.0 != 0 && catalog.ids.insert(e.id))
            .collect();

        catalog.next_id = catalog
            .ids
            .iter()
            .map(|id| id.0)
            .max()
            .and_then(|max| max.checked_add(1))
            .unwrap_or(1);

        for (mut entry, keep) in entries.into_iter().zip(keep) {
            if !keep {
                let fresh = catalog.allocate_id();
                log::warn!(
                    "entry {:?} has a missing or duplicate id {}, reassigned to {}",
                    entry.file_name,
                    entry.id,
                    fresh
                );
                entry.id = fresh;
            }
            catalog.normalize(&mut entry);
            catalog.entries.push(entry);
        }

        log::debug!("catalog loaded: {} entries", catalog.entries.len());
        catalog
    }

    /// JSON配列から構築
    pub fn from_json(json: &str, fallback_bucket: impl Into<String>) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries, fallback_bucket))
    }

    /// JSON配列へ書き出し
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// 未使用のIDを採番する
    ///
    /// 通常は最大ID+1から単調増加。`u64::MAX` に達したら 1 に戻り、使用中のIDは飛ばす。
    fn allocate_id(&mut self) -> EntryId {
        loop {
            let candidate = EntryId(self.next_id);
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            if candidate.0 != 0 && self.ids.insert(candidate) {
                return candidate;
            }
        }
    }

    /// 分類・タグ・色名の整合をとる
    fn normalize(&self, entry: &mut CatalogEntry) {
        entry.album = normalize_bucket(&entry.album, &self.fallback_bucket);
        entry.category = normalize_bucket(&entry.category, &self.fallback_bucket);

        let tags = std::mem::take(&mut entry.tags);
        for tag in &tags {
            entry.add_tag(tag);
        }

        if entry.colors.len() != entry.color_names.len() {
            let colors = std::mem::take(&mut entry.colors);
            entry.apply_palette(Palette::from_colors(colors));
        }
    }

    /// エントリを末尾に追加し、採番したIDを返す
    ///
    /// 渡されたエントリの `id` は無視される。
    pub fn add(&mut self, mut entry: CatalogEntry) -> EntryId {
        let id = self.allocate_id();
        entry.id = id;
        self.normalize(&mut entry);
        log::debug!("added entry {} ({})", id, entry.file_name);
        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 全エントリ（追加順）
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fallback_bucket(&self) -> &str {
        &self.fallback_bucket
    }

    /// 指定軸の値一覧（重複なし・辞書順）
    pub fn values(&self, axis: Axis) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.axis_value(axis))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// 指定軸のサイドバー項目（先頭は `All`）
    pub fn buckets(&self, axis: Axis) -> Vec<Bucket> {
        std::iter::once(Bucket::All)
            .chain(self.values(axis).into_iter().map(Bucket::Value))
            .collect()
    }

    pub fn list_albums(&self) -> Vec<Bucket> {
        self.buckets(Axis::Album)
    }

    pub fn list_categories(&self) -> Vec<Bucket> {
        self.buckets(Axis::Category)
    }

    /// 追加フォームの既定値（辞書順で最初の値）
    pub fn first_value(&self, axis: Axis) -> Option<String> {
        self.values(axis).into_iter().next()
    }

    /// 検索文字列・アルバム・カテゴリで絞り込む
    ///
    /// 検索は大文字小文字を区別しない部分一致。空文字列は全件一致。
    /// 分類フィルタは `None` で制限なし、両方指定時は AND。
    pub fn filter(
        &self,
        query: &str,
        album: Option<&str>,
        category: Option<&str>,
    ) -> Vec<&CatalogEntry> {
        let needle = query.to_lowercase();

        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.search_fields().any(|f| f.to_lowercase().contains(&needle))
            })
            .filter(|e| album.map_or(true, |a| e.album == a))
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect()
    }

    /// 分類名の変更・削除用エディタ
    pub fn taxonomy(&mut self) -> TaxonomyEditor<'_> {
        TaxonomyEditor::new(self)
    }
}
