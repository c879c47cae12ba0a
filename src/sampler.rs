//! 画像デコード・縮小サンプリング
//!
//! 画像ファイルをデコードして固定サイズ（既定 50x50）に縮小し、RGBAバイト列を返す。
//! デコードはブロッキング処理なので `spawn_blocking` で実行する。
//! 失敗しても呼び出し側は既定パレットで続行できるよう、
//! `extract_palette` は常にパレットを返す。

use crate::error::{GalleryError, Result};
use image::imageops::FilterType;
use photo_gallery_common::{Palette, PaletteOptions};
use std::path::{Path, PathBuf};

/// 縮小済みのRGBAバッファ（行優先、1チャンネル1バイト）
#[derive(Debug, Clone)]
pub struct SampledRaster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// ソース参照をローカルパスに解決する
///
/// 相対パスはカタログファイルのディレクトリ基準。URL は扱わない。
pub fn resolve_source(source_ref: &str, base_dir: &Path) -> Result<PathBuf> {
    let lower = source_ref.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(GalleryError::UnsupportedSource(source_ref.to_string()));
    }

    let path = Path::new(source_ref.strip_prefix("file://").unwrap_or(source_ref));
    if path.is_relative() {
        Ok(base_dir.join(path))
    } else {
        Ok(path.to_path_buf())
    }
}

fn sample_file(path: &Path, size: u32) -> Result<SampledRaster> {
    if !path.exists() {
        return Err(GalleryError::FileNotFound(path.display().to_string()));
    }
    let img = image::open(path)
        .map_err(|e| GalleryError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let size = size.max(1);
    let rgba = img.resize_exact(size, size, FilterType::Triangle).to_rgba8();

    Ok(SampledRaster {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// 画像をデコードして `size` x `size` に縮小
pub async fn decode_and_sample(path: PathBuf, size: u32) -> Result<SampledRaster> {
    tokio::task::spawn_blocking(move || sample_file(&path, size))
        .await
        .map_err(|e| GalleryError::TaskJoin(e.to_string()))?
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// 画像から抽出した
    Sampled(Palette),
    /// デコードに失敗し既定パレットを使った
    Fallback(Palette),
}

impl Extraction {
    pub fn palette(&self) -> &Palette {
        match self {
            Extraction::Sampled(p) | Extraction::Fallback(p) => p,
        }
    }

    pub fn into_palette(self) -> Palette {
        match self {
            Extraction::Sampled(p) | Extraction::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::Fallback(_))
    }
}

/// 代表色を抽出（失敗時は既定パレット）
pub async fn extract_palette(
    source_ref: &str,
    base_dir: &Path,
    options: PaletteOptions,
    sample_size: u32,
) -> Extraction {
    let sampled = match resolve_source(source_ref, base_dir) {
        Ok(path) => decode_and_sample(path, sample_size).await,
        Err(e) => Err(e),
    };

    match sampled {
        Ok(raster) => {
            let palette = Palette::from_pixels(&raster.pixels, &options);
            log::debug!("{}: {} colors", source_ref, palette.len());
            Extraction::Sampled(palette)
        }
        Err(e) => {
            log::warn!("color extraction failed, using fallback palette: {}", e);
            Extraction::Fallback(Palette::fallback(options.palette_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_source() {
        let base = Path::new("/photos");
        assert_eq!(
            resolve_source("images/a.jpg", base).unwrap(),
            PathBuf::from("/photos/images/a.jpg")
        );
        assert_eq!(
            resolve_source("/abs/b.png", base).unwrap(),
            PathBuf::from("/abs/b.png")
        );
        assert_eq!(
            resolve_source("file:///abs/c.png", base).unwrap(),
            PathBuf::from("/abs/c.png")
        );
    }

    #[test]
    fn test_resolve_rejects_urls() {
        let result = resolve_source("https://example.com/a.jpg", Path::new("."));
        assert!(matches!(result, Err(GalleryError::UnsupportedSource(_))));
    }
}
