use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{CheckerError, Result};

#[derive(Parser)]
#[command(name = "blacklist-checker")]
#[command(about = "エラー報告レポートIPチェック・ブラックリスト登録依頼判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// エラー報告レポートを監査してIPを振り分け、CSVを出力
    Check {
        /// エラー報告レポート(.xlsx)のパス（省略時は今月第4水曜のレポート）
        report: Option<PathBuf>,

        /// 対象のadmin側エラー番号（カンマ区切り）
        #[arg(short, long)]
        admin_no: Option<String>,

        /// 対象のweb側エラー番号（カンマ区切り）
        #[arg(short, long)]
        web_no: Option<String>,

        /// IPホワイトリストファイル
        #[arg(long)]
        white_list: Option<PathBuf>,

        /// IPブラックリストファイル
        #[arg(long)]
        black_list: Option<PathBuf>,

        /// CSV出力先ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// テキストファイルから有効なIPv4アドレスを抽出して表示
    Extract {
        /// 入力テキストファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// admin側エラー番号の既定値を設定（カンマ区切り）
        #[arg(long)]
        set_admin_no: Option<String>,

        /// web側エラー番号の既定値を設定（カンマ区切り）
        #[arg(long)]
        set_web_no: Option<String>,

        /// レポート・IPリストの置き場所を設定
        #[arg(long)]
        set_download_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// カンマ区切りのエラー番号リストをパースする
pub fn parse_no_list(text: &str) -> Result<Vec<u32>> {
    text.split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| {
                CheckerError::InvalidArgument(format!("エラー番号リストを解釈できません: {}", text))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_list() {
        assert_eq!(parse_no_list("6,7,8,9").unwrap(), vec![6, 7, 8, 9]);
        assert_eq!(parse_no_list("8, 9").unwrap(), vec![8, 9]);
        assert_eq!(parse_no_list("6").unwrap(), vec![6]);
    }

    #[test]
    fn test_parse_no_list_rejects_garbage() {
        assert!(parse_no_list("6,abc").is_err());
        assert!(parse_no_list("").is_err());
        assert!(parse_no_list("6,,7").is_err());
    }
}
