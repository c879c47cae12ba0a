//! 色名の近似判定
//!
//! RGB値を固定の色名セットへ割り当てる。知覚的な色空間は使わず、
//! 閾値による判定リストを上から順に評価し、最初に一致した規則を採用する。
//! 規則の順序と閾値は出力の再現性に関わるため変更しないこと。

use crate::palette::Rgb;

/// 色名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    White,
    Black,
    Orange,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Gray,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::White => "White",
            ColorName::Black => "Black",
            ColorName::Orange => "Orange",
            ColorName::Red => "Red",
            ColorName::Green => "Green",
            ColorName::Blue => "Blue",
            ColorName::Yellow => "Yellow",
            ColorName::Purple => "Purple",
            ColorName::Gray => "Gray",
        }
    }
}

impl std::fmt::Display for ColorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 優位と判定する差分
const DOMINANCE_MARGIN: i32 = 40;

/// 16進カラーコードの色名を返す
///
/// 解釈できない文字列は `Gray` になる。
pub fn name_color(hex: &str) -> ColorName {
    match Rgb::from_hex(hex) {
        Some(rgb) => name_rgb(rgb),
        None => ColorName::Gray,
    }
}

/// RGB値の色名を返す
pub fn name_rgb(rgb: Rgb) -> ColorName {
    let (r, g, b) = (rgb.r as i32, rgb.g as i32, rgb.b as i32);

    if r > 200 && g > 200 && b > 200 {
        return ColorName::White;
    }
    if r < 50 && g < 50 && b < 50 {
        return ColorName::Black;
    }
    if r - g > DOMINANCE_MARGIN && r - b > DOMINANCE_MARGIN {
        return if r > 200 && g > 150 {
            ColorName::Orange
        } else {
            ColorName::Red
        };
    }
    if g - r > DOMINANCE_MARGIN && g - b > DOMINANCE_MARGIN {
        return ColorName::Green;
    }
    if b - r > DOMINANCE_MARGIN && b - g > DOMINANCE_MARGIN {
        return ColorName::Blue;
    }
    if r > 150 && g > 150 && b < 100 {
        return ColorName::Yellow;
    }
    if r > 150 && b > 150 && g < 100 {
        return ColorName::Purple;
    }
    ColorName::Gray
}
