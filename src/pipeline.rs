//! エントリ生成と代表色の一括付与
//!
//! 新規エントリは代表色を付けてからカタログに追加する。
//! 各エントリの色は、そのエントリ用のタスク結果で一度だけ書き込まれる。

use crate::cache::{compute_file_hash, CacheFile, CacheSettings};
use crate::config::Config;
use crate::error::{GalleryError, Result};
use crate::sampler::{extract_palette, resolve_source};
use crate::scanner::{mime_for_path, ImageInfo};
use indicatif::{ProgressBar, ProgressStyle};
use photo_gallery_common::{CatalogEntry, PaletteOptions};
use std::collections::HashMap;
use std::path::Path;
use tokio::task::JoinSet;

/// 抽出設定
#[derive(Debug, Clone, Copy)]
pub struct ColorizeOptions {
    pub palette: PaletteOptions,
    pub sample_size: u32,
    pub batch_size: usize,
}

impl ColorizeOptions {
    /// キャッシュの一致判定に使う設定
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            palette: self.palette,
            sample_size: self.sample_size,
        }
    }
}

impl From<&Config> for ColorizeOptions {
    fn from(config: &Config) -> Self {
        Self {
            palette: config.palette_options(),
            sample_size: config.sample_size,
            batch_size: config.batch_size,
        }
    }
}

/// 一括処理の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorizeStats {
    pub sampled: usize,
    pub cached: usize,
    pub fallback: usize,
}

/// 今日の日付（`Month D, YYYY`）
pub fn today_label() -> String {
    chrono::Local::now().format("%B %-d, %Y").to_string()
}

/// スキャン結果からエントリの下書きを作る
pub fn entry_from_image(info: &ImageInfo, source_ref: String) -> CatalogEntry {
    CatalogEntry {
        date_taken: info.date.clone().unwrap_or_else(today_label),
        dimensions: info.dimensions().unwrap_or_else(|| "Original".to_string()),
        size_label: info.size_label(),
        mime_type: info.mime_type().to_string(),
        ..CatalogEntry::new(source_ref, info.file_name.clone())
    }
}

/// 追加用の下書き（ローカルにあるファイルなら情報を読み取る）
pub fn draft_entry(source_ref: &str, file_name: Option<String>, base_dir: &Path) -> CatalogEntry {
    let info = resolve_source(source_ref, base_dir)
        .ok()
        .filter(|p| p.is_file())
        .and_then(|p| ImageInfo::from_path(&p).ok());

    let mut entry = match info {
        Some(info) => entry_from_image(&info, source_ref.to_string()),
        None => {
            let name = source_ref
                .rsplit(|c: char| c == '/' || c == '\\')
                .next()
                .unwrap_or(source_ref)
                .to_string();
            CatalogEntry {
                date_taken: today_label(),
                dimensions: "Original".to_string(),
                size_label: "Unknown".to_string(),
                mime_type: mime_for_path(Path::new(source_ref)).to_string(),
                ..CatalogEntry::new(source_ref, name)
            }
        }
    };

    if let Some(name) = file_name.filter(|n| !n.trim().is_empty()) {
        entry.alt_text = name.clone();
        entry.file_name = name;
    }
    entry
}

/// カタログファイルから見た相対パス（基準外なら絶対パスのまま）
pub fn source_ref_for(path: &Path, base_dir: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let base = base_dir
        .canonicalize()
        .unwrap_or_else(|_| base_dir.to_path_buf());
    absolute
        .strip_prefix(&base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| absolute.clone())
        .to_string_lossy()
        .replace('\\', "/")
}

fn file_hash_and_size(path: &Path) -> Option<(String, u64)> {
    let size = std::fs::metadata(path).ok()?.len();
    compute_file_hash(path).ok().map(|h| (h, size))
}

/// エントリ群に代表色を付与する
///
/// `batch_size` 件ずつ並行にデコードする。キャッシュがあればヒットした画像は
/// デコードせず、新たに抽出できた色はキャッシュへ登録する。
pub async fn colorize_entries(
    entries: &mut [CatalogEntry],
    base_dir: &Path,
    options: ColorizeOptions,
    mut cache: Option<&mut CacheFile>,
    show_progress: bool,
) -> Result<ColorizeStats> {
    let mut stats = ColorizeStats::default();
    let pb = if show_progress {
        let pb = ProgressBar::new(entries.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:40} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let indices: Vec<usize> = (0..entries.len()).collect();
    let settings = options.cache_settings();

    for batch in indices.chunks(options.batch_size.max(1)) {
        let mut tasks = JoinSet::new();
        let mut hashes: HashMap<usize, (String, u64)> = HashMap::new();

        for &i in batch {
            let entry = &mut entries[i];
            let hash = if cache.is_some() {
                resolve_source(&entry.source_ref, base_dir)
                    .ok()
                    .and_then(|p| file_hash_and_size(&p))
            } else {
                None
            };

            if let (Some(cache), Some((h, _))) = (cache.as_deref(), hash.as_ref()) {
                if let Some(palette) = cache.get(h, &settings) {
                    entry.apply_palette(palette);
                    stats.cached += 1;
                    pb.inc(1);
                    continue;
                }
            }
            if let Some(h) = hash {
                hashes.insert(i, h);
            }

            let source = entry.source_ref.clone();
            let base = base_dir.to_path_buf();
            tasks.spawn(async move {
                let extraction =
                    extract_palette(&source, &base, options.palette, options.sample_size).await;
                (i, extraction)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (i, extraction) = joined.map_err(|e| GalleryError::TaskJoin(e.to_string()))?;
            let entry = &mut entries[i];

            if extraction.is_fallback() {
                stats.fallback += 1;
            } else {
                stats.sampled += 1;
                if let (Some(cache), Some((h, size))) = (cache.as_deref_mut(), hashes.remove(&i)) {
                    cache.insert(h, entry.file_name.clone(), size, settings, extraction.palette());
                }
            }

            entry.apply_palette(extraction.into_palette());
            pb.set_message(entry.file_name.clone());
            pb.inc(1);
        }
    }

    pb.finish_and_clear();
    log::info!(
        "colorized {} entries (sampled {}, cached {}, fallback {})",
        entries.len(),
        stats.sampled,
        stats.cached,
        stats.fallback
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_label_format() {
        let label = today_label();
        // 例: "October 17, 2026"
        assert!(label.contains(", "));
        assert!(label.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_draft_entry_for_remote_source() {
        let entry = draft_entry("https://example.com/photos/sunset.png", None, Path::new("."));
        assert_eq!(entry.file_name, "sunset.png");
        assert_eq!(entry.alt_text, "sunset.png");
        assert_eq!(entry.dimensions, "Original");
        assert_eq!(entry.size_label, "Unknown");
        assert_eq!(entry.mime_type, "image/png");
    }

    #[test]
    fn test_draft_entry_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("note.gif"), vec![0u8; 2048]).unwrap();

        let entry = draft_entry("note.gif", Some("Renamed".into()), dir.path());
        assert_eq!(entry.size_label, "2.0 KB");
        assert_eq!(entry.mime_type, "image/gif");
        assert_eq!(entry.file_name, "Renamed");
        // ヘッダが読めないので既定値
        assert_eq!(entry.dimensions, "Original");
    }

    #[test]
    fn test_source_ref_for_relative_and_outside() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("images");
        std::fs::create_dir_all(&nested).unwrap();
        let file = nested.join("a.jpg");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(source_ref_for(&file, dir.path()), "images/a.jpg");

        let other = tempfile::tempdir().unwrap();
        let outside = source_ref_for(&file, other.path());
        assert!(outside.ends_with("images/a.jpg"));
        assert!(Path::new(&outside).is_absolute());
    }
}
