//! エラー報告レポートIPチェックライブラリ
//!
//! 週次のエラー報告レポート(.xlsx)から対象エラー番号にマッチした行を拾い、
//! クライアントIPを抽出してホワイトリスト/ブラックリストに照合する。
//!
//! ## 処理フロー
//! 1. 集計結果シートからエラー番号ごとのマッチパターンを構築（[`report::registry`]）
//! 2. 日付名の日次シートを照合してIPを抽出（[`report::matcher`], [`ip`]）
//! 3. IPを重複除去・昇順整列して3区分に振り分け（[`categorize`]）
//! 4. 結果をCSVへ出力（[`export`]）

pub mod categorize;
pub mod cli;
pub mod config;
pub mod dates;
pub mod diag;
pub mod error;
pub mod export;
pub mod ip;
pub mod report;
pub mod sheet;

pub use categorize::{categorize_ips, unique_sorted, CategorizedIps, Classification};
pub use diag::{ConsoleSink, Diagnostic, DiagnosticSink};
pub use error::{CheckerError, Result};
pub use ip::{extract_client_ip, find_ip_addresses, load_ip_addresses};
pub use report::{extract_error_ips, DailyScan, PatternRegistry, Side};
