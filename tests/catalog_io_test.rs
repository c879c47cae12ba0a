//! カタログファイル入出力テスト
//!
//! images.json の読み込み・保存と、読み込み時の補正を検証

use photo_gallery::catalog_io::{cache_dir, catalog_base_dir, load_catalog, save_catalog};
use photo_gallery_common::{Axis, CatalogEntry, EntryId};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SAMPLE_JSON: &str = r##"[
  {
    "id": 1,
    "url": "images/beach.jpg",
    "fileName": "beach.jpg",
    "dateTaken": "June 5, 2023",
    "dimensions": "1920x1080",
    "size": "2.4 MB",
    "type": "image/jpeg",
    "description": "Sunset at the beach",
    "content": "Sunset at the beach",
    "alt": "beach.jpg",
    "album": "Vacation",
    "category": "Nature",
    "tags": ["sunset", "sea"],
    "colors": ["#FF8040", "#0000FF"],
    "colorNames": ["orange", "blue"]
  },
  {
    "id": 1,
    "url": "images/office.png",
    "fileName": "office.png",
    "album": "  ",
    "category": "Docs",
    "colors": ["#FFFFFF"]
  }
]"##;

/// 存在しないファイルは空のカタログ
#[test]
fn test_load_missing_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let catalog = load_catalog(&dir.path().join("images.json"), "Unclassified").unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.fallback_bucket(), "Unclassified");
}

/// 既存形式のJSONを読み込む
#[test]
fn test_load_catalog_repairs_entries() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("images.json");
    std::fs::write(&path, SAMPLE_JSON).unwrap();

    let catalog = load_catalog(&path, "Unclassified").unwrap();
    assert_eq!(catalog.len(), 2);

    let beach = catalog.get(EntryId(1)).expect("ID 1 がない");
    assert_eq!(beach.source_ref, "images/beach.jpg");
    assert_eq!(beach.size_label, "2.4 MB");
    assert_eq!(beach.full_text, "Sunset at the beach");
    assert_eq!(beach.color_names, vec!["orange", "blue"]);

    // 重複IDは振り直し、空の分類はフォールバック、色名は再生成
    let office = &catalog.entries()[1];
    assert_ne!(office.id, EntryId(1));
    assert_eq!(office.album, "Unclassified");
    assert_eq!(office.color_names, vec!["White"]);
}

/// 保存して読み直しても内容が変わらない
#[test]
fn test_save_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("images.json");

    let mut catalog = load_catalog(&path, "Unclassified").unwrap();
    let id = catalog.add(CatalogEntry {
        album: "Trips".into(),
        category: "City".into(),
        tags: vec!["new".into()],
        ..CatalogEntry::new("a.jpg", "a.jpg")
    });
    save_catalog(&path, &catalog).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"url\": \"a.jpg\""));
    assert!(text.contains("\"fileName\": \"a.jpg\""));

    let reloaded = load_catalog(&path, "Unclassified").unwrap();
    assert_eq!(reloaded.get(id), catalog.get(id));
    assert_eq!(reloaded.values(Axis::Album), vec!["Trips".to_string()]);

    // 次の採番は既存IDと重ならない
    let mut reloaded = reloaded;
    let next = reloaded.add(CatalogEntry::new("b.jpg", "b.jpg"));
    assert!(next > id);
}

/// 壊れたJSONはエラー（ファイル名付き）
#[test]
fn test_load_corrupt_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("images.json");
    std::fs::write(&path, "[{").unwrap();

    let err = load_catalog(&path, "Unclassified").unwrap_err();
    assert!(format!("{:#}", err).contains("images.json"));
}

/// 名前変更・削除の結果も保存される
#[test]
fn test_taxonomy_edits_persist() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("images.json");
    std::fs::write(&path, SAMPLE_JSON).unwrap();

    let mut catalog = load_catalog(&path, "Unclassified").unwrap();
    assert_eq!(catalog.taxonomy().rename(Axis::Album, "Vacation", "Trips"), 1);
    assert_eq!(catalog.taxonomy().retire(Axis::Category, "Docs"), 1);
    save_catalog(&path, &catalog).unwrap();

    let reloaded = load_catalog(&path, "Unclassified").unwrap();
    assert_eq!(
        reloaded.values(Axis::Album),
        vec!["Trips".to_string(), "Unclassified".to_string()]
    );
    assert_eq!(
        reloaded.values(Axis::Category),
        vec!["Nature".to_string(), "Unclassified".to_string()]
    );
}

#[test]
fn test_catalog_base_dir() {
    assert_eq!(catalog_base_dir(Path::new("images.json")), PathBuf::from("."));
    assert_eq!(
        catalog_base_dir(Path::new("/data/gallery/images.json")),
        PathBuf::from("/data/gallery")
    );
}

/// キャッシュフォルダの既定はカタログのあるフォルダ
#[test]
fn test_cache_dir_defaults_to_catalog_dir() {
    let catalog = Path::new("/data/gallery/images.json");
    assert_eq!(cache_dir(None, catalog), PathBuf::from("/data/gallery"));
    assert_eq!(
        cache_dir(Some(PathBuf::from("/tmp/photos")), catalog),
        PathBuf::from("/tmp/photos")
    );
    assert_eq!(cache_dir(None, Path::new("images.json")), PathBuf::from("."));
}
