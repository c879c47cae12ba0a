use anyhow::{Context, Result};
use photo_gallery_common::Catalog;
use std::fs;
use std::path::{Path, PathBuf};

/// カタログJSONを読み込む（ファイルがなければ空のカタログ）
pub fn load_catalog(path: &Path, fallback_bucket: &str) -> Result<Catalog> {
    if !path.exists() {
        log::info!("{} not found, starting with an empty catalog", path.display());
        return Ok(Catalog::with_fallback(fallback_bucket));
    }
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let catalog = Catalog::from_json(&content, fallback_bucket)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(catalog)
}

pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let content = catalog.to_json()?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// キャッシュの置き場所（指定がなければカタログと同じフォルダ）
pub fn cache_dir(folder: Option<PathBuf>, catalog_path: &Path) -> PathBuf {
    folder.unwrap_or_else(|| catalog_base_dir(catalog_path))
}

/// 相対ソース参照の基準ディレクトリ
pub fn catalog_base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
