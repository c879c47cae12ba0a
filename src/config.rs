use crate::error::{GalleryError, Result};
use photo_gallery_common::{PaletteOptions, DEFAULT_FALLBACK_BUCKET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// フォールバック分類名を上書きする環境変数
pub const FALLBACK_BUCKET_ENV: &str = "PHOTO_GALLERY_FALLBACK_BUCKET";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 抽出する代表色の数
    pub palette_size: usize,
    /// デコード後に縮小する一辺のピクセル数
    pub sample_size: u32,
    pub bucket_width: u8,
    pub alpha_threshold: u8,
    /// 分類削除時の移動先
    pub fallback_bucket: String,
    pub default_album: String,
    pub default_category: String,
    /// 一括取り込みで同時にデコードする枚数
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette_size: 5,
            sample_size: 50,
            bucket_width: 10,
            alpha_threshold: 128,
            fallback_bucket: DEFAULT_FALLBACK_BUCKET.into(),
            default_album: "Default Album".into(),
            default_category: "Default Category".into(),
            batch_size: 8,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)
                .map_err(|e| GalleryError::Config(format!("{}: {}", config_path.display(), e)))?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-gallery").join("config.json"))
    }

    fn with_env_overrides(mut self) -> Self {
        // 環境変数を優先
        if let Ok(name) = std::env::var(FALLBACK_BUCKET_ENV) {
            if !name.trim().is_empty() {
                self.fallback_bucket = name.trim().to_string();
            }
        }
        self
    }

    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions {
            palette_size: self.palette_size,
            bucket_width: self.bucket_width,
            alpha_threshold: self.alpha_threshold,
        }
    }

    pub fn set_fallback_bucket(&mut self, name: String) -> Result<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(GalleryError::Config("分類名が空です".into()));
        }
        self.fallback_bucket = name;
        self.save()
    }

    pub fn set_palette_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(GalleryError::Config("色数は1以上を指定してください".into()));
        }
        self.palette_size = size;
        self.save()
    }
}
