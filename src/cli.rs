use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use photo_gallery_common::{Axis, ViewLayout};
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "写真ギャラリーのカタログ管理・代表色抽出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// カタログJSONファイル
    #[arg(short, long, default_value = "images.json", global = true)]
    pub catalog: PathBuf,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログの一覧を表示
    List {
        /// 表示形式 (grid-compact/grid-large/list)
        #[arg(short, long, default_value = "list")]
        layout: ViewLayout,

        /// アルバムで絞り込む
        #[arg(short, long, conflicts_with = "category")]
        album: Option<String>,

        /// カテゴリで絞り込む
        #[arg(short = 'k', long)]
        category: Option<String>,
    },

    /// キーワード検索
    Search {
        /// 検索文字列（ファイル名・種類・アルバム・カテゴリ・日付・タグ・色名）
        query: String,

        /// アルバムで絞り込む
        #[arg(short, long, conflicts_with = "category")]
        album: Option<String>,

        /// カテゴリで絞り込む
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// 表示形式
        #[arg(short, long, default_value = "list")]
        layout: ViewLayout,
    },

    /// エントリの詳細を表示
    Show {
        /// エントリID
        id: u64,
    },

    /// アルバム一覧
    Albums,

    /// カテゴリ一覧
    Categories,

    /// 画像を1枚追加
    Add {
        /// 画像のパス（URLは既定パレットになります）
        #[arg(required = true)]
        source: String,

        /// ファイル名（省略時はパスから）
        #[arg(short, long)]
        file_name: Option<String>,

        /// アルバム（省略時は既存の先頭、なければ既定値）
        #[arg(short, long)]
        album: Option<String>,

        /// カテゴリ（省略時は既存の先頭、なければ既定値）
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// 説明文
        #[arg(short, long, default_value = "")]
        description: String,

        /// タグ（カンマ・空白区切り）
        #[arg(short, long, default_value = "new")]
        tags: String,
    },

    /// フォルダ内の画像をまとめて追加
    Import {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// アルバム（省略時はフォルダ名）
        #[arg(short, long)]
        album: Option<String>,

        /// カテゴリ（省略時はフォールバック分類）
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// 同時にデコードする枚数
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// キャッシュを使用（再デコードをスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 画像の代表色を表示（カタログは変更しない）
    Colors {
        /// 画像のパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// アルバム / カテゴリ名を変更
    Rename {
        /// 対象 (album/category)
        axis: Axis,

        /// 現在の名前
        old: String,

        /// 新しい名前（省略時は対話入力）
        new: Option<String>,
    },

    /// アルバム / カテゴリを削除（画像はフォールバック分類へ移動）
    Retire {
        /// 対象 (album/category)
        axis: Axis,

        /// 削除する名前
        value: String,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// フォールバック分類名を設定
        #[arg(long)]
        set_fallback_bucket: Option<String>,

        /// 代表色の数を設定
        #[arg(long)]
        set_palette_size: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカタログファイルのあるフォルダ）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

lazy_static! {
    static ref TAG_SEPARATOR: Regex = Regex::new(r"[,\s]+").expect("valid regex");
}

/// タグ入力を分割（小文字化・重複除去は追加時に行う）
pub fn split_tags(input: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(input)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("Beach, sunset  sea"), vec!["Beach", "sunset", "sea"]);
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_parse_rename() {
        let cli = Cli::parse_from(["photo-gallery", "rename", "album", "Vacation", "Trips"]);
        match cli.command {
            Commands::Rename { axis, old, new } => {
                assert_eq!(axis, Axis::Album);
                assert_eq!(old, "Vacation");
                assert_eq!(new.as_deref(), Some("Trips"));
            }
            _ => panic!("rename として解析されていない"),
        }
    }

    #[test]
    fn test_cache_folder_help_names_catalog_dir() {
        let cmd = Cli::command();
        let cache = cmd
            .find_subcommand("cache")
            .expect("cache サブコマンドがない");
        let folder = cache
            .get_arguments()
            .find(|a| a.get_id() == "folder")
            .expect("--folder がない");
        let help = folder.get_help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("カタログファイル"), "{}", help);
    }

    #[test]
    fn test_parse_list_layout() {
        let cli = Cli::parse_from(["photo-gallery", "list", "--layout", "grid-large"]);
        assert!(matches!(
            cli.command,
            Commands::List { layout: ViewLayout::GridLarge, .. }
        ));
    }
}
