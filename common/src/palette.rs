//! 代表色抽出モジュール
//!
//! デコード済みRGBAバッファ（呼び出し側で 50x50 程度に縮小済み）から
//! 粗いRGBヒストグラムを作り、出現数の多い順に上位K色を返す。
//!
//! ## 処理フロー
//! 1. 不透明度が閾値を超える画素だけを対象にする
//! 2. R/G/B をそれぞれバケット幅の倍数へ丸める
//! 3. 丸めた色ごとに出現数を数える（初出順を保持）
//! 4. 出現数の降順で安定ソートし、上位K件を `#RRGGBB` にする

use crate::color_name::name_color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// デコード失敗時のパレット（グレー5段階）
pub const FALLBACK_PALETTE: [&str; 5] = ["#E5E7EB", "#D1D5DB", "#9CA3AF", "#6B7280", "#374151"];

/// RGB値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB` / `RRGGBB` を解釈（大文字小文字は問わない）
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// 大文字の `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// 抽出パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteOptions {
    /// 返す色数（K）
    pub palette_size: usize,
    /// 量子化のバケット幅
    pub bucket_width: u8,
    /// この値を超えるアルファの画素のみ集計
    pub alpha_threshold: u8,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            palette_size: 5,
            bucket_width: 10,
            alpha_threshold: 128,
        }
    }
}

/// チャンネル値を最も近いバケット幅の倍数へ丸める（0.5は切り上げ、255で頭打ち）
fn quantize_channel(value: u8, width: u8) -> u8 {
    let width = width.max(1) as u32;
    let rounded = (value as u32 + width / 2) / width * width;
    rounded.min(255) as u8
}

/// RGBAバッファから代表色を抽出
///
/// 出現数が同じ色は走査で先に現れた方が前に来る。
/// 4バイトに満たない末尾は無視する。
pub fn extract_dominant_colors(pixels: &[u8], options: &PaletteOptions) -> Vec<String> {
    // 初出順のヒストグラム
    let mut counts: Vec<(Rgb, usize)> = Vec::new();
    let mut index: HashMap<Rgb, usize> = HashMap::new();

    for px in pixels.chunks_exact(4) {
        if px[3] <= options.alpha_threshold {
            continue;
        }
        let key = Rgb::new(
            quantize_channel(px[0], options.bucket_width),
            quantize_channel(px[1], options.bucket_width),
            quantize_channel(px[2], options.bucket_width),
        );
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    // sort_by は安定ソート
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(options.palette_size)
        .map(|(rgb, _)| rgb.to_hex())
        .collect()
}

/// 代表色と色名の組
///
/// `colors[i]` の色名が `names[i]`。必ず同じ長さで生成される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
    names: Vec<String>,
}

impl Palette {
    /// 色コード列から色名を付けて生成
    pub fn from_colors(colors: Vec<String>) -> Self {
        let names = colors
            .iter()
            .map(|hex| name_color(hex).to_string())
            .collect();
        Self { colors, names }
    }

    /// RGBAバッファから抽出
    pub fn from_pixels(pixels: &[u8], options: &PaletteOptions) -> Self {
        Self::from_colors(extract_dominant_colors(pixels, options))
    }

    /// デコード失敗時の既定パレット
    pub fn fallback(palette_size: usize) -> Self {
        Self::from_colors(
            FALLBACK_PALETTE
                .iter()
                .take(palette_size)
                .map(|c| c.to_string())
                .collect(),
        )
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// (色コード, 色名) の組に分解
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.colors, self.names)
    }
}
