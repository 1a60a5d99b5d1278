use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lungvision")]
#[command(about = "胸部X線画像の分類クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類サーバーのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像1枚を分類して結果を表示
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 表示状態をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話式セッション（選択・分類・履歴表示を繰り返す）
    Session {
        /// 終了時の履歴をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 分類サーバーのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 画像を載せるフォームフィールド名を設定
        #[arg(long)]
        set_field_name: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long, conflicts_with = "clear_timeout")]
        set_timeout: Option<u64>,

        /// タイムアウトを解除（無制限）
        #[arg(long)]
        clear_timeout: bool,

        /// アップロード上限バイト数を設定（0 = 無制限）
        #[arg(long)]
        set_max_upload_bytes: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
