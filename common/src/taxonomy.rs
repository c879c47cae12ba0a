//! 分類名の変更・削除
//!
//! アルバム / カテゴリは保存された実体を持たず、エントリの値から導出される。
//! そのため名前変更は該当エントリ全件の書き換え、削除はフォールバック分類への
//! 付け替えとして実装する。もう一方の軸・ID・並び順には触れない。

use crate::catalog::Catalog;
use crate::types::Axis;

/// カタログを借用して分類を編集する
pub struct TaxonomyEditor<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> TaxonomyEditor<'a> {
    pub(crate) fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// `old_value` を持つ全エントリを `new_value` に変更し、件数を返す
    ///
    /// `new_value` は前後空白を除去して使う。空、または `old_value` と同じなら何もしない。
    pub fn rename(&mut self, axis: Axis, old_value: &str, new_value: &str) -> usize {
        let new_value = new_value.trim();
        if new_value.is_empty() || new_value == old_value {
            return 0;
        }

        let count = self.reassign(axis, old_value, new_value);
        if count > 0 {
            log::info!("renamed {} {:?} -> {:?} ({} entries)", axis, old_value, new_value, count);
        }
        count
    }

    /// `value` を持つ全エントリをフォールバック分類へ移し、件数を返す
    ///
    /// 分類一覧は導出値なので、付け替え後は一覧から消える。
    pub fn retire(&mut self, axis: Axis, value: &str) -> usize {
        let fallback = self.catalog.fallback_bucket().to_string();
        if value == fallback {
            return 0;
        }

        let count = self.reassign(axis, value, &fallback);
        if count > 0 {
            log::info!("retired {} {:?} -> {:?} ({} entries)", axis, value, fallback, count);
        }
        count
    }

    fn reassign(&mut self, axis: Axis, from: &str, to: &str) -> usize {
        let mut count = 0;
        for entry in self.catalog.entries_mut() {
            let slot = entry.axis_value_mut(axis);
            if *slot == from {
                *slot = to.to_string();
                count += 1;
            }
        }
        count
    }
}
