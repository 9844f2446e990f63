//! カテゴリ番号→ワイルドカードパターンの登録表
//!
//! 集計結果シートを1行ずつ読み、対象のエラー番号ごとに
//! マッチパターンの列を組み立てる。パターンは`*`のみをワイルドカード
//! として解釈し、他の正規表現メタ文字はリテラル扱いでエスケープする。

use std::collections::BTreeMap;

use calamine::Data;
use regex::Regex;

use super::section::Section;
use crate::sheet::{cell_int, cell_str, cell_text};

/// パターン列の開始位置（J列）
const PATTERN_START_COL: usize = 9;

/// `*`を「任意の文字列」として解釈するマッチパターン
///
/// ログ本文の先頭からのマッチ（前方一致）で評価する。
#[derive(Debug)]
pub struct WildcardPattern {
    raw: String,
    regex: Regex,
}

impl WildcardPattern {
    /// ワイルドカード式をコンパイルする
    ///
    /// `*`以外のメタ文字はエスケープするため、演算子が入力されても
    /// リテラルとして照合される。
    pub fn compile(expression: &str) -> Self {
        let mut pattern = String::from("^");
        for (idx, segment) in expression.split('*').enumerate() {
            if idx > 0 {
                pattern.push_str(".*");
            }
            pattern.push_str(&regex::escape(segment));
        }
        let regex = Regex::new(&pattern).expect("エスケープ済みパターンは必ずコンパイルできる");
        Self {
            raw: expression.to_string(),
            regex,
        }
    }

    /// ログ本文が先頭からこのパターンにマッチするか
    pub fn matches(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }

    /// 元のワイルドカード式
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// カテゴリ番号ごとのパターン一覧（番号昇順）
pub type PatternRegistry = BTreeMap<u32, Vec<WildcardPattern>>;

/// 集計結果シートの行からadmin側・web側の登録表を構築する
///
/// - 見出し行（admin側エラー/web側エラー）でセクションを切り替える
/// - 2列目が整数として読めない行はデータ行ではないので読み飛ばす
/// - 対象番号リストに含まれない番号は無視する
/// - パターン列は最初の空セルで打ち切る
/// - 同じ番号が複数回現れた場合は後の行が優先される
pub fn build_registries<'a>(
    rows: impl Iterator<Item = &'a [Data]>,
    admin_no_list: &[u32],
    web_no_list: &[u32],
) -> (PatternRegistry, PatternRegistry) {
    let mut admin_registry = PatternRegistry::new();
    let mut web_registry = PatternRegistry::new();
    let mut section = Section::None;

    for row in rows {
        if let Some(next) = Section::marker_transition(cell_str(row, 0)) {
            section = next;
            continue;
        }

        let Some(no) = cell_int(row, 1).and_then(|n| u32::try_from(n).ok()) else {
            continue;
        };

        let (no_list, registry) = match section {
            Section::None => continue,
            Section::Admin => (admin_no_list, &mut admin_registry),
            Section::Web => (web_no_list, &mut web_registry),
        };
        if !no_list.contains(&no) {
            continue;
        }

        let mut patterns = Vec::new();
        let mut col = PATTERN_START_COL;
        while let Some(text) = cell_text(row, col) {
            patterns.push(WildcardPattern::compile(&text));
            col += 1;
        }
        registry.insert(no, patterns);
    }

    (admin_registry, web_registry)
}
