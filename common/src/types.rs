//! カタログエントリの型定義
//!
//! 読み込み元の `images.json` と同じキー名でシリアライズする。
//! 旧キー（`sourceRef` など）は alias で受け付ける。

use crate::error::Error;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// 分類が消えたエントリの移動先（既定値）
pub const DEFAULT_FALLBACK_BUCKET: &str = "Unclassified";

/// エントリID
///
/// カタログが採番する。同一カタログ内で再利用しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分類軸（アルバム / カテゴリ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Album,
    Category,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Album => "album",
            Axis::Category => "category",
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "album" | "albums" => Ok(Axis::Album),
            "category" | "categories" => Ok(Axis::Category),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 画像1枚分のカタログレコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    pub id: EntryId,

    /// 画像の所在（URL / パス）
    #[serde(rename = "url", alias = "sourceRef")]
    pub source_ref: String,

    pub file_name: String,
    pub date_taken: String,
    pub dimensions: String,

    #[serde(rename = "size", alias = "sizeLabel")]
    pub size_label: String,

    #[serde(rename = "type", alias = "mimeType")]
    pub mime_type: String,

    pub description: String,

    #[serde(rename = "content", alias = "fullText")]
    pub full_text: String,

    #[serde(rename = "alt", alias = "altText")]
    pub alt_text: String,

    pub album: String,
    pub category: String,

    /// 小文字のタグ（表示順は追加順）
    pub tags: Vec<String>,

    /// 代表色 `#RRGGBB`（多い順）
    pub colors: Vec<String>,

    /// `colors` と同じ並びの色名
    pub color_names: Vec<String>,
}

impl CatalogEntry {
    /// 新規エントリの下書きを作る（IDはカタログ追加時に採番）
    pub fn new(source_ref: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            source_ref: source_ref.into(),
            alt_text: file_name.clone(),
            file_name,
            ..Default::default()
        }
    }

    /// 指定軸の値
    pub fn axis_value(&self, axis: Axis) -> &str {
        match axis {
            Axis::Album => &self.album,
            Axis::Category => &self.category,
        }
    }

    pub(crate) fn axis_value_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::Album => &mut self.album,
            Axis::Category => &mut self.category,
        }
    }

    /// タグを正規化して追加（重複は無視）
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// 代表色と色名をまとめて設定
    pub fn apply_palette(&mut self, palette: Palette) {
        let (colors, names) = palette.into_parts();
        self.colors = colors;
        self.color_names = names;
    }

    /// 検索対象フィールド
    pub fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.file_name.as_str(),
            self.mime_type.as_str(),
            self.album.as_str(),
            self.category.as_str(),
            self.date_taken.as_str(),
        ]
        .into_iter()
        .chain(self.tags.iter().map(|t| t.as_str()))
        .chain(self.color_names.iter().map(|n| n.as_str()))
    }
}

/// 分類値の正規化: 前後空白を除去し、空ならフォールバック
pub fn normalize_bucket(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
