//! 抽出したIPの振り分け
//!
//! 重複を除いてIPv4値の昇順に並べ、ホワイトリスト→ブラックリスト→
//! 登録依頼の優先順で1つの区分に割り当てる。あわせて、どのエラー番号の
//! マッチ本文にそのIPが現れたかを監査ラベルとして付ける。

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::report::{MatchedTexts, Side};

/// IPの振り分け区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// ホワイトリストに含まれる（ブラックリストと重複していてもこちら）
    WhiteListed,
    /// 既にブラックリストに含まれる
    AlreadyBlackListed,
    /// どちらにも無く、ブラックリスト登録依頼が必要
    RegistrationRequired,
}

impl Classification {
    /// 振り分け結果の表示メッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Classification::WhiteListed => "ホワイトリストに含まれているため追加不要",
            Classification::AlreadyBlackListed => "既にブラックリストに含まれているため追加不要",
            Classification::RegistrationRequired => "ブラックリスト登録依頼",
        }
    }
}

/// 振り分け結果
///
/// 3つのリストは互いに素で、いずれもIPv4値の昇順。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedIps {
    pub white_listed: Vec<Ipv4Addr>,
    pub black_listed: Vec<Ipv4Addr>,
    pub registration_required: Vec<Ipv4Addr>,
}

/// 重複を除いてIPv4値の昇順に並べる
pub fn unique_sorted(ips: &[Ipv4Addr]) -> Vec<Ipv4Addr> {
    ips.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 抽出IP列を3区分に振り分ける
///
/// 入力は重複していてよい。振り分け順・出力順は重複除去後の昇順で、
/// IPごとに判定メッセージと監査ラベルを診断として流す。
pub fn categorize_ips(
    ip_list: &[Ipv4Addr],
    white_list: &[Ipv4Addr],
    black_list: &[Ipv4Addr],
    admin_matches: &MatchedTexts,
    web_matches: &MatchedTexts,
    sink: &mut dyn DiagnosticSink,
) -> CategorizedIps {
    let mut result = CategorizedIps::default();

    for ip in unique_sorted(ip_list) {
        let classification = if white_list.contains(&ip) {
            Classification::WhiteListed
        } else if black_list.contains(&ip) {
            Classification::AlreadyBlackListed
        } else {
            Classification::RegistrationRequired
        };

        let labels = audit_labels(ip, admin_matches, web_matches);
        sink.emit(Diagnostic::IpClassified {
            ip,
            classification,
            labels,
        });

        match classification {
            Classification::WhiteListed => result.white_listed.push(ip),
            Classification::AlreadyBlackListed => result.black_listed.push(ip),
            Classification::RegistrationRequired => result.registration_required.push(ip),
        }
    }

    result
}

/// IPがどの（側・エラー番号）のマッチ本文に現れたかのラベル一覧
///
/// Admin側の番号昇順、続いてWeb側の番号昇順。本文へのIP文字列の
/// 部分一致で判定する。
pub fn audit_labels(
    ip: Ipv4Addr,
    admin_matches: &MatchedTexts,
    web_matches: &MatchedTexts,
) -> Vec<String> {
    let ip_text = ip.to_string();
    let mut labels = Vec::new();

    for (side, matches) in [(Side::Admin, admin_matches), (Side::Web, web_matches)] {
        for (no, texts) in matches {
            if texts.iter().any(|text| text.contains(&ip_text)) {
                labels.push(format!("{} No.{}", side.audit_prefix(), no));
            }
        }
    }

    labels
}
