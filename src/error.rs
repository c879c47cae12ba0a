use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("未対応の画像ソースです（ネットワーク取得は行いません）: {0}")]
    UnsupportedSource(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("カタログエラー: {0}")]
    Catalog(#[from] photo_gallery_common::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("バックグラウンド処理エラー: {0}")]
    TaskJoin(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
