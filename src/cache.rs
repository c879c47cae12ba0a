//! 代表色キャッシュモジュール
//!
//! 画像ファイルのSHA-256をキーにして抽出済みの代表色を保存し、
//! 同じ画像の再デコードをスキップする。色名は読み出し時に再計算する。

use crate::error::Result;
use photo_gallery_common::{Palette, PaletteOptions};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".palette-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → 代表色
    entries: HashMap<String, CacheEntry>,
}

/// 抽出結果を左右する設定
///
/// どれか1つでも変われば別の抽出結果になるので、キャッシュは一致した場合のみ使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    pub palette: PaletteOptions,
    pub sample_size: u32,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    /// 抽出時の設定（設定変更の検出用）
    pub settings: CacheSettings,
    pub colors: Vec<String>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 2;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（壊れていれば空）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                // バージョンチェック
                if cache.version != Self::CURRENT_VERSION {
                    log::warn!("palette cache version mismatch, rebuilding");
                    return Self::default();
                }
                cache
            }
            Err(e) => {
                log::warn!("palette cache unreadable, rebuilding: {}", e);
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在しなければ false）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 同じ設定で抽出したキャッシュがあればパレットを返す
    pub fn get(&self, hash: &str, settings: &CacheSettings) -> Option<Palette> {
        self.entries
            .get(hash)
            .filter(|e| e.settings == *settings)
            .map(|e| Palette::from_colors(e.colors.clone()))
    }

    pub fn insert(
        &mut self,
        hash: String,
        file_name: String,
        file_size: u64,
        settings: CacheSettings,
        palette: &Palette,
    ) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                settings,
                colors: palette.colors().to_vec(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのハッシュ（SHA-256、16進）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
