//! 端末向けの一覧・詳細表示

use photo_gallery_common::{Bucket, CatalogEntry, ViewLayout};

const COMPACT_COLUMNS: usize = 4;
const LARGE_COLUMNS: usize = 2;

/// エントリ一覧をレイアウトに合わせて整形
pub fn render_entries(entries: &[&CatalogEntry], layout: ViewLayout) -> String {
    if entries.is_empty() {
        return "（該当する写真はありません）".to_string();
    }

    match layout {
        ViewLayout::List => entries
            .iter()
            .map(|e| {
                format!(
                    "{:>4}  {:<28} {:<16} {:<16} {:<18} {}",
                    e.id.0,
                    e.file_name,
                    e.album,
                    e.category,
                    e.date_taken,
                    e.color_names.join(",")
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ViewLayout::GridCompact => render_grid(entries, COMPACT_COLUMNS, 20, |e| {
            vec![format!("[{}] {}", e.id, e.file_name)]
        }),
        ViewLayout::GridLarge => render_grid(entries, LARGE_COLUMNS, 36, |e| {
            vec![
                format!("[{}] {}", e.id, e.file_name),
                format!("{} / {}", e.album, e.category),
                e.colors.join(" "),
            ]
        }),
    }
}

fn render_grid<F>(entries: &[&CatalogEntry], columns: usize, width: usize, cell: F) -> String
where
    F: Fn(&CatalogEntry) -> Vec<String>,
{
    let mut rows = Vec::new();
    for chunk in entries.chunks(columns) {
        let cells: Vec<Vec<String>> = chunk.iter().map(|e| cell(*e)).collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0);
        for line in 0..height {
            let row = cells
                .iter()
                .map(|c| {
                    let text = c.get(line).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", truncate(text, width - 1), width = width)
                })
                .collect::<String>();
            rows.push(row.trim_end().to_string());
        }
        rows.push(String::new());
    }
    rows.join("\n").trim_end().to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('…');
        s
    }
}

/// エントリの詳細表示
pub fn render_detail(entry: &CatalogEntry) -> String {
    let swatches = entry
        .colors
        .iter()
        .zip(entry.color_names.iter())
        .map(|(hex, name)| format!("{} ({})", hex, name))
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("ID: {}", entry.id),
        format!("ファイル名: {}", entry.file_name),
        format!("ソース: {}", entry.source_ref),
        format!("撮影日: {}", entry.date_taken),
        format!("サイズ: {} / {}", entry.dimensions, entry.size_label),
        format!("種類: {}", entry.mime_type),
        format!("アルバム: {}", entry.album),
        format!("カテゴリ: {}", entry.category),
        format!("タグ: {}", entry.tags.join(", ")),
        format!("代表色: {}", swatches),
        format!("説明: {}", entry.description),
    ]
    .join("\n")
}

/// 分類一覧（件数付き）
pub fn render_buckets(buckets: &[Bucket], count: impl Fn(&Bucket) -> usize) -> String {
    buckets
        .iter()
        .map(|b| format!("  {} ({})", b.label(), count(b)))
        .collect::<Vec<_>>()
        .join("\n")
}
