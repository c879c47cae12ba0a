mod exif;

pub use self::exif::to_display_date;

use crate::error::{GalleryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// 撮影日（EXIF、`Month D, YYYY`）
    pub date: Option<String>,
    pub file_size: u64,
}

impl ImageInfo {
    /// 単一ファイルの情報を収集
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .map_err(|_| GalleryError::FileNotFound(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let date = exif::extract_date(path).ok().map(|d| to_display_date(&d));

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            date,
            file_size: meta.len(),
        })
    }

    /// `1024x768` 形式の画像サイズ（ヘッダのみ読む）
    pub fn dimensions(&self) -> Option<String> {
        image::image_dimensions(&self.path)
            .ok()
            .map(|(w, h)| format!("{}x{}", w, h))
    }

    pub fn size_label(&self) -> String {
        format_size(self.file_size)
    }

    pub fn mime_type(&self) -> &'static str {
        mime_for_path(&self.path)
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(GalleryError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);

        if is_image {
            match ImageInfo::from_path(path) {
                Ok(info) => images.push(info),
                Err(e) => log::warn!("skip {}: {}", path.display(), e),
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    log::debug!("scanned {}: {} images", folder.display(), images.len());
    Ok(images)
}

/// 拡張子から MIME タイプを推定
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

/// `2.4 MB` 形式のファイルサイズ表記
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
