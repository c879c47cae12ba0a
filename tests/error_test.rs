//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use photo_gallery::error::GalleryError;
use photo_gallery::sampler::{decode_and_sample, resolve_source};
use photo_gallery::scanner;
use photo_gallery_common::{Axis, Catalog};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, GalleryError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    // テキストファイルのみ作成
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path(), false).unwrap();
    assert!(result.is_empty());
}

/// 再帰指定がなければサブフォルダは見ない
#[test]
fn test_scan_folder_recursive_flag() {
    let dir = tempdir().expect("Failed to create temp dir");
    let sub = dir.path().join("sub");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(dir.path().join("b.JPG"), b"x").unwrap();
    std::fs::write(sub.join("a.png"), b"x").unwrap();

    let flat = scanner::scan_folder(dir.path(), false).unwrap();
    assert_eq!(flat.len(), 1);

    let deep = scanner::scan_folder(dir.path(), true).unwrap();
    let names: Vec<&str> = deep.iter().map(|i| i.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.JPG"]);
}

/// 存在しない画像のデコード
#[tokio::test]
async fn test_decode_missing_file() {
    let result = decode_and_sample(Path::new("/nonexistent/photo.png").to_path_buf(), 50).await;
    assert!(matches!(result, Err(GalleryError::FileNotFound(_))));
}

/// 画像でないファイルのデコード
#[tokio::test]
async fn test_decode_invalid_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"this is not a png").unwrap();

    let result = decode_and_sample(path, 50).await;
    assert!(matches!(result, Err(GalleryError::ImageLoad(_))));
}

/// URL はネットワーク取得しない
#[test]
fn test_remote_source_unsupported() {
    let result = resolve_source("http://example.com/a.jpg", Path::new("."));
    assert!(matches!(result, Err(GalleryError::UnsupportedSource(_))));
}

/// 不正なカタログJSON
#[test]
fn test_invalid_catalog_json() {
    let result = Catalog::from_json("{ invalid json }", "Unclassified");
    assert!(result.is_err());

    let err: GalleryError = result.unwrap_err().into();
    assert!(matches!(err, GalleryError::Catalog(_)));
    assert!(err.to_string().contains("JSON"));
}

/// 不明な分類軸
#[test]
fn test_unknown_axis() {
    let result: Result<Axis, _> = "tags".parse();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("tags"));
}

/// エラーメッセージのフォーマット
#[test]
fn test_error_messages() {
    let err = GalleryError::FileNotFound("test.jpg".to_string());
    assert!(err.to_string().contains("test.jpg"));

    let err = GalleryError::NoImagesFound("/path/to/folder".to_string());
    assert!(err.to_string().contains("/path/to/folder"));

    let err = GalleryError::UnsupportedSource("https://x/y.png".to_string());
    assert!(err.to_string().contains("https://x/y.png"));
}
