use anyhow::{bail, Result};
use clap::Parser;
use dialoguer::{Confirm, Input};
use photo_gallery::cache::CacheFile;
use photo_gallery::catalog_io::{cache_dir, catalog_base_dir, load_catalog, save_catalog};
use photo_gallery::cli::{split_tags, Cli, Commands};
use photo_gallery::config::Config;
use photo_gallery::error::GalleryError;
use photo_gallery::pipeline::{self, ColorizeOptions};
use photo_gallery::{render, sampler, scanner};
use photo_gallery_common::{Axis, CatalogEntry, EntryId, GalleryView};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load()?;
    let catalog_path = cli.catalog.clone();
    let base_dir = catalog_base_dir(&catalog_path);

    match cli.command {
        Commands::List { layout, album, category } => {
            let catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            let mut view = GalleryView::new();
            view.layout = layout;
            view.select_album(album);
            if category.is_some() {
                view.select_category(category);
            }

            let visible = view.visible(&catalog);
            println!("{}", render::render_entries(&visible, view.layout));
            println!("\n{}件 / 全{}件", visible.len(), catalog.len());
        }

        Commands::Search { query, album, category, layout } => {
            let catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            let mut view = GalleryView::new();
            view.layout = layout;
            view.set_query(query);
            view.select_album(album);
            if category.is_some() {
                view.select_category(category);
            }

            let visible = view.visible(&catalog);
            println!("🔍 \"{}\" の検索結果\n", view.query);
            println!("{}", render::render_entries(&visible, view.layout));
            println!("\n{}件", visible.len());
        }

        Commands::Show { id } => {
            let catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            let mut view = GalleryView::new();
            view.select(EntryId(id));
            match view.selected_entry(&catalog) {
                Some(entry) => println!("{}", render::render_detail(entry)),
                None => bail!("ID {} のエントリはありません", id),
            }
        }

        Commands::Albums => {
            let catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            println!("アルバム:");
            let buckets = catalog.list_albums();
            println!(
                "{}",
                render::render_buckets(&buckets, |b| catalog.filter("", b.as_filter(), None).len())
            );
        }

        Commands::Categories => {
            let catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            println!("カテゴリ:");
            let buckets = catalog.list_categories();
            println!(
                "{}",
                render::render_buckets(&buckets, |b| catalog.filter("", None, b.as_filter()).len())
            );
        }

        Commands::Add { source, file_name, album, category, description, tags } => {
            println!("📸 photo-gallery - 写真追加\n");
            let mut catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;

            let mut entry = pipeline::draft_entry(&source, file_name, &base_dir);
            entry.album = pick_bucket(album, catalog.first_value(Axis::Album), &config.default_album);
            entry.category = pick_bucket(
                category,
                catalog.first_value(Axis::Category),
                &config.default_category,
            );
            entry.description = description.clone();
            entry.full_text = description;
            for tag in split_tags(&tags) {
                entry.add_tag(&tag);
            }

            println!("- 代表色を抽出中...");
            let extraction =
                sampler::extract_palette(&source, &base_dir, config.palette_options(), config.sample_size)
                    .await;
            if extraction.is_fallback() {
                println!("  画像を読み込めないため既定の配色を使用します");
            }
            entry.apply_palette(extraction.into_palette());

            let id = catalog.add(entry);
            save_catalog(&catalog_path, &catalog)?;
            println!("✔ 追加しました (ID {})", id);
            if let Some(added) = catalog.get(id) {
                println!("\n{}", render::render_detail(added));
            }
        }

        Commands::Import { folder, recursive, album, category, batch_size, use_cache } => {
            println!("📸 photo-gallery - 写真取り込み\n");
            let mut catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;

            // 1. 画像スキャン
            println!("[1/3] 写真をスキャン中...");
            let images = scanner::scan_folder(&folder, recursive)?;
            if images.is_empty() {
                return Err(GalleryError::NoImagesFound(folder.display().to_string()).into());
            }
            println!("✔ {}枚の写真を検出\n", images.len());

            let album = album.unwrap_or_else(|| folder_label(&folder));
            let category = category.unwrap_or_default();
            let mut entries: Vec<CatalogEntry> = images
                .iter()
                .map(|info| {
                    let source_ref = pipeline::source_ref_for(&info.path, &base_dir);
                    CatalogEntry {
                        album: album.clone(),
                        category: category.clone(),
                        ..pipeline::entry_from_image(info, source_ref)
                    }
                })
                .collect();

            // 2. 代表色抽出
            println!("[2/3] 代表色を抽出中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let mut options = ColorizeOptions::from(&config);
            if let Some(size) = batch_size {
                options.batch_size = size;
            }
            let mut cache = use_cache.then(|| CacheFile::load(&base_dir));
            let stats =
                pipeline::colorize_entries(&mut entries, &base_dir, options, cache.as_mut(), true)
                    .await?;
            if let Some(cache) = &cache {
                cache.save(&base_dir)?;
            }
            println!(
                "✔ 抽出完了（解析 {} / キャッシュ {} / 既定配色 {}）\n",
                stats.sampled, stats.cached, stats.fallback
            );

            // 3. 結果保存
            println!("[3/3] カタログを保存中...");
            for entry in entries {
                catalog.add(entry);
            }
            save_catalog(&catalog_path, &catalog)?;
            println!("✔ 保存: {}（全{}件）", catalog_path.display(), catalog.len());

            println!("\n✅ 取り込み完了");
        }

        Commands::Colors { image } => {
            let source = image.to_string_lossy().to_string();
            let extraction = sampler::extract_palette(
                &source,
                Path::new("."),
                config.palette_options(),
                config.sample_size,
            )
            .await;
            if extraction.is_fallback() {
                println!("画像を読み込めないため既定の配色を表示します");
            }

            let palette = extraction.palette();
            println!("代表色 ({}色):", palette.len());
            for (hex, name) in palette.colors().iter().zip(palette.names()) {
                println!("  {}  {}", hex, name);
            }
        }

        Commands::Rename { axis, old, new } => {
            let mut catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            if !catalog.values(axis).contains(&old) {
                bail!("{} \"{}\" は存在しません", axis_label(axis), old);
            }

            let new = match new {
                Some(value) => value,
                None => Input::<String>::new()
                    .with_prompt(format!("新しい{}名", axis_label(axis)))
                    .with_initial_text(old.clone())
                    .interact_text()?,
            };

            let count = catalog.taxonomy().rename(axis, &old, &new);
            if count == 0 {
                println!("変更はありません");
            } else {
                save_catalog(&catalog_path, &catalog)?;
                println!("✔ {} \"{}\" → \"{}\"（{}件）", axis_label(axis), old, new.trim(), count);
            }
        }

        Commands::Retire { axis, value, yes } => {
            let mut catalog = load_catalog(&catalog_path, &config.fallback_bucket)?;
            let fallback = catalog.fallback_bucket().to_string();
            if value == fallback {
                bail!("\"{}\" はフォールバック分類のため削除できません", value);
            }
            if !catalog.values(axis).contains(&value) {
                bail!("{} \"{}\" は存在しません", axis_label(axis), value);
            }

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "{} \"{}\" を削除し、写真を \"{}\" へ移動しますか?",
                        axis_label(axis),
                        value,
                        fallback
                    ))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("キャンセルしました");
                return Ok(());
            }

            let count = catalog.taxonomy().retire(axis, &value);
            save_catalog(&catalog_path, &catalog)?;
            println!("✔ {}件を \"{}\" へ移動しました", count, fallback);
        }

        Commands::Config { set_fallback_bucket, set_palette_size, show } => {
            let mut config = config;

            if let Some(name) = set_fallback_bucket {
                config.set_fallback_bucket(name)?;
                println!("✔ フォールバック分類を設定しました");
            }

            if let Some(size) = set_palette_size {
                config.set_palette_size(size)?;
                println!("✔ 代表色の数を設定しました");
            }

            if show {
                println!("設定:");
                println!("  代表色の数: {}", config.palette_size);
                println!("  縮小サイズ: {}px", config.sample_size);
                println!("  量子化幅: {}", config.bucket_width);
                println!("  透明度しきい値: {}", config.alpha_threshold);
                println!("  フォールバック分類: {}", config.fallback_bucket);
                println!("  既定アルバム: {}", config.default_album);
                println!("  既定カテゴリ: {}", config.default_category);
                println!("  バッチサイズ: {}", config.batch_size);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = cache_dir(folder, &catalog_path);
            let cache_path = CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 明示指定 → 既存の先頭 → 既定値
fn pick_bucket(explicit: Option<String>, existing: Option<String>, default: &str) -> String {
    explicit
        .filter(|v| !v.trim().is_empty())
        .or(existing)
        .unwrap_or_else(|| default.to_string())
}

fn folder_label(folder: &Path) -> String {
    folder
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(folder)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn axis_label(axis: Axis) -> &'static str {
    match axis {
        Axis::Album => "アルバム",
        Axis::Category => "カテゴリ",
    }
}
