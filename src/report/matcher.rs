//! 日次シートのマッチング
//!
//! 日付名のシートを1行ずつ読み、対象サーバ（admin/web）ごとに
//! 登録表のパターンへ照合する。マッチした行は監査用に本文を記録し、
//! その場でクライアントIPを抽出する。

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use calamine::Data;

use super::registry::PatternRegistry;
use super::Side;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::ip::extract_client_ip;
use crate::sheet::{cell_str, cell_text};

/// 対象サーバ列（E列）
const SERVER_COL: usize = 4;
/// ログ内容列（G列）
const CONTENT_COL: usize = 6;

/// カテゴリ番号ごとのマッチしたログ本文（番号昇順、本文は出現順）
pub type MatchedTexts = BTreeMap<u32, Vec<String>>;

/// 日次シートのスキャン結果
#[derive(Debug, Default)]
pub struct DailyScan {
    /// マッチ行から抽出したIP（重複あり・出現順）
    pub ips: Vec<Ipv4Addr>,
    /// admin側でマッチした本文
    pub admin_matches: MatchedTexts,
    /// web側でマッチした本文
    pub web_matches: MatchedTexts,
}

/// 日次シートの全行を照合する
///
/// 先頭行はヘッダとして読み飛ばす。ログ内容が空の行、対象サーバ以外の
/// 行は対象外。1行が複数の番号・複数のパターンにマッチした場合は
/// マッチごとに記録する。
pub fn scan_daily_rows<'a>(
    rows: impl Iterator<Item = &'a [Data]>,
    admin_registry: &PatternRegistry,
    web_registry: &PatternRegistry,
    sink: &mut dyn DiagnosticSink,
) -> DailyScan {
    let mut scan = DailyScan::default();

    for row in rows.skip(1) {
        let Some(content) = cell_text(row, CONTENT_COL) else {
            continue;
        };
        let Some(side) = cell_str(row, SERVER_COL).and_then(Side::from_server_name) else {
            continue;
        };

        let (registry, matches) = match side {
            Side::Admin => (admin_registry, &mut scan.admin_matches),
            Side::Web => (web_registry, &mut scan.web_matches),
        };
        match_content(side, registry, &content, matches, &mut scan.ips, sink);
    }

    scan
}

fn match_content(
    side: Side,
    registry: &PatternRegistry,
    content: &str,
    matches: &mut MatchedTexts,
    ips: &mut Vec<Ipv4Addr>,
    sink: &mut dyn DiagnosticSink,
) {
    for (no, patterns) in registry {
        for pattern in patterns {
            if !pattern.matches(content) {
                continue;
            }
            sink.emit(Diagnostic::PatternMatched {
                side,
                no: *no,
                content: content.to_string(),
            });
            matches.entry(*no).or_default().push(content.to_string());

            match extract_client_ip(content) {
                Some(ip) => ips.push(ip),
                None => sink.emit(Diagnostic::IpNotFound {
                    side,
                    no: *no,
                    content: content.to_string(),
                }),
            }
        }
    }
}
