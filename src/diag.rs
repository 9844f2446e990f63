//! 診断メッセージの収集
//!
//! スキャン中の途中経過（マッチ行・IP抽出失敗など）を直接printlnせず、
//! 呼び出し側が注入するシンクへ流す。コンソール出力とテスト用の収集を
//! 同じ経路で扱える。

use std::net::Ipv4Addr;

use crate::categorize::Classification;
use crate::report::Side;

/// スキャン・振り分け中に発生する診断イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// 日次シートの行がカテゴリのパターンにマッチした
    PatternMatched {
        side: Side,
        no: u32,
        content: String,
    },
    /// マッチした行からIPアドレスを抽出できなかった
    IpNotFound {
        side: Side,
        no: u32,
        content: String,
    },
    /// 日次シートが存在しない（致命的ではない）
    DailySheetMissing { sheet_name: String },
    /// IPの振り分け結果
    IpClassified {
        ip: Ipv4Addr,
        classification: Classification,
        labels: Vec<String>,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::PatternMatched { side, no, content } => {
                write!(f, "{} No.{} {}", side.server_name(), no, content)
            }
            Diagnostic::IpNotFound { side, no, content } => {
                write!(
                    f,
                    "対象のエラーログからIPアドレスを抽出できませんでした:{} No.{} {}",
                    side.server_name(),
                    no,
                    content
                )
            }
            Diagnostic::DailySheetMissing { sheet_name } => {
                write!(f, "指定されたシート「{}」は存在しません", sheet_name)
            }
            Diagnostic::IpClassified {
                ip,
                classification,
                labels,
            } => {
                write!(f, "{}({}): {}", classification.message(), labels.join(","), ip)
            }
        }
    }
}

/// 診断イベントの出力先
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// コンソールへそのまま出力するシンク
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        println!("{}", diagnostic);
    }
}

/// テスト用: 発生順にためるだけのシンク
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
