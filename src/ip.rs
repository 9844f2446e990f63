//! ログ文字列からのIPv4アドレス抽出
//!
//! - ドット区切り4組の数字列を候補として拾い、有効なIPv4のみ残す
//! - エラーログ用の抽出では先頭が `127.0.0.1`（リバースプロキシ経由）の
//!   場合に2番目の候補を真のクライアントとみなす

use std::net::Ipv4Addr;
use std::path::Path;

use regex::Regex;

use crate::error::Result;

lazy_static::lazy_static! {
    /// IPアドレスらしき文字列のパターン
    static ref IP_ADDRESS_RE: Regex = Regex::new(r"[0-9]+(?:\.[0-9]+){3}").unwrap();
}

/// 文字列から有効なIPv4アドレスをすべて抽出する
///
/// 数字4組の形をしていても `999.1.1.1` のような不正値は除外される。
/// 出現順を保持する。
pub fn find_ip_addresses(text: &str) -> Vec<Ipv4Addr> {
    IP_ADDRESS_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
        .collect()
}

/// エラーログ1件分のテキストからクライアントIPを決定する
///
/// 先頭候補が `127.0.0.1` ならプロキシ由来とみなし、2番目の候補を採用する。
/// 2番目が無ければ抽出失敗（None）。先頭がループバックでなければ先頭を採用。
pub fn extract_client_ip(text: &str) -> Option<Ipv4Addr> {
    let candidates = find_ip_addresses(text);
    match candidates.first() {
        None => None,
        Some(first) if *first == Ipv4Addr::LOCALHOST => candidates.get(1).copied(),
        Some(first) => Some(*first),
    }
}

/// ホワイトリスト/ブラックリストのテキストファイルからIPを読み込む
///
/// 1行に複数あってもよく、IP以外の文字列は無視される。
pub fn load_ip_addresses(path: &Path) -> Result<Vec<Ipv4Addr>> {
    let data = std::fs::read_to_string(path)?;
    Ok(find_ip_addresses(&data))
}
