//! Photo Gallery Common Library
//!
//! カタログ管理と代表色抽出のコア。画像デコードやファイル入出力は持たず、
//! デコード済みの画素とメモリ上のレコードだけを扱う。

pub mod types;
pub mod error;
pub mod palette;
pub mod color_name;
pub mod catalog;
pub mod taxonomy;
pub mod view;

pub use types::{Axis, CatalogEntry, EntryId, DEFAULT_FALLBACK_BUCKET};
pub use error::{Error, Result};
pub use palette::{extract_dominant_colors, Palette, PaletteOptions, Rgb, FALLBACK_PALETTE};
pub use color_name::{name_color, name_rgb, ColorName};
pub use catalog::{Bucket, Catalog};
pub use taxonomy::TaxonomyEditor;
pub use view::{GalleryView, ViewLayout};
