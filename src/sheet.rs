//! レポートxlsxへの薄いアクセス層
//!
//! calamineでワークブックを開き、シートの有無確認と行の取得、
//! セル値の型揺れ（数値セル/文字列セル）の吸収だけを担当する。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::Result;

/// エラー報告レポートのワークブック
pub type ReportBook = Xlsx<BufReader<File>>;

pub fn open_report(path: &Path) -> Result<ReportBook> {
    Ok(open_workbook(path)?)
}

/// 指定名のシートが存在するか
pub fn sheet_exists(book: &ReportBook, name: &str) -> bool {
    book.sheet_names().iter().any(|s| s == name)
}

/// 指定名のシートの全セル範囲を取得する（存在確認は呼び出し側で行う）
pub fn sheet_range(book: &mut ReportBook, name: &str) -> Result<Range<Data>> {
    Ok(book.worksheet_range(name)?)
}

/// 文字列セルの値（文字列セル以外はNone）
pub fn cell_str(row: &[Data], idx: usize) -> Option<&str> {
    match row.get(idx)? {
        Data::String(s) => Some(s.as_str()),
        _ => None,
    }
}

/// 整数として読めるセルの値
///
/// Excel上は数値セルでも文字列セルでも入力されうるため両方受ける。
pub fn cell_int(row: &[Data], idx: usize) -> Option<i64> {
    match row.get(idx)? {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 空でないセルをテキストとして取得する（空セル・空文字はNone）
pub fn cell_text(row: &[Data], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Data::String(s) if !s.is_empty() => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_str() {
        let row = vec![Data::String("admin側エラー".to_string()), Data::Int(6)];
        assert_eq!(cell_str(&row, 0), Some("admin側エラー"));
        assert_eq!(cell_str(&row, 1), None);
        assert_eq!(cell_str(&row, 9), None);
    }

    #[test]
    fn test_cell_int_accepts_number_and_text() {
        let row = vec![
            Data::Int(6),
            Data::Float(7.0),
            Data::String(" 8 ".to_string()),
            Data::String("区切り".to_string()),
            Data::Float(1.5),
            Data::Empty,
        ];
        assert_eq!(cell_int(&row, 0), Some(6));
        assert_eq!(cell_int(&row, 1), Some(7));
        assert_eq!(cell_int(&row, 2), Some(8));
        assert_eq!(cell_int(&row, 3), None);
        assert_eq!(cell_int(&row, 4), None);
        assert_eq!(cell_int(&row, 5), None);
    }

    #[test]
    fn test_cell_text_empty_is_none() {
        let row = vec![
            Data::String(String::new()),
            Data::Empty,
            Data::String("ERR:*".to_string()),
        ];
        assert_eq!(cell_text(&row, 0), None);
        assert_eq!(cell_text(&row, 1), None);
        assert_eq!(cell_text(&row, 2), Some("ERR:*".to_string()));
    }
}
