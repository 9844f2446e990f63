//! 集計結果シートのセクション判定
//!
//! 集計結果シートはadmin側とweb側のエラー一覧が縦に並び、
//! それぞれ見出し行で始まる。行がどちらの側に属するかは
//! 直前に現れた見出しだけで決まる。

/// admin側セクションの見出し
pub const ADMIN_SIDE_ERROR_MARKER: &str = "admin側エラー";
/// web側セクションの見出し
pub const WEB_SIDE_ERROR_MARKER: &str = "web側エラー";

/// 現在の行が属するセクション
///
/// 最初の見出しより前の行は`None`のまま扱い、データ行として拾わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    Admin,
    Web,
}

impl Section {
    /// 行頭セルが見出しなら遷移先のセクションを返す
    ///
    /// 見出し行自体はデータ行ではないので、呼び出し側は遷移後に
    /// その行をスキップする。
    pub fn marker_transition(first_cell: Option<&str>) -> Option<Section> {
        match first_cell? {
            ADMIN_SIDE_ERROR_MARKER => Some(Section::Admin),
            WEB_SIDE_ERROR_MARKER => Some(Section::Web),
            _ => None,
        }
    }
}
