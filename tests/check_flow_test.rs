//! レポート読み取り→IP振り分け→CSV出力の統合テスト
//!
//! rust_xlsxwriterで実際のxlsxを組み立てて、本番と同じ経路で検証する。

use std::net::Ipv4Addr;
use std::path::PathBuf;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use blacklist_checker::categorize::{categorize_ips, unique_sorted};
use blacklist_checker::diag::Diagnostic;
use blacklist_checker::error::CheckerError;
use blacklist_checker::export::write_categorized_csv;
use blacklist_checker::report::{extract_error_ips, Side};

fn ip(text: &str) -> Ipv4Addr {
    text.parse().unwrap()
}

/// 集計結果シートと日次シートを持つテスト用レポートを作る
fn create_test_report(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("エラー報告レポート（2026_8_26）.xlsx");
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("集計結果").unwrap();
    // 見出しより前の行はデータとして拾われない
    summary.write_string(0, 0, "エラー集計").unwrap();
    summary.write_string(1, 0, "admin側エラー").unwrap();
    summary.write_number(2, 1, 6.0).unwrap();
    summary.write_string(2, 9, "ERR:*timeout*").unwrap();
    summary.write_number(3, 1, 7.0).unwrap();
    summary.write_string(3, 9, "ERR:auth*").unwrap();
    summary.write_string(4, 0, "web側エラー").unwrap();
    summary.write_number(5, 1, 8.0).unwrap();
    summary.write_string(5, 9, "ERR:*").unwrap();

    let daily = workbook.add_worksheet();
    daily.set_name("20260826").unwrap();
    daily.write_string(0, 4, "対象サーバ").unwrap();
    daily.write_string(0, 6, "ログの内容").unwrap();
    daily
        .write_string(1, 4, "admin")
        .unwrap()
        .write_string(1, 6, "ERR:connection timeout from 198.51.100.1 via 127.0.0.1")
        .unwrap();
    // ループバックのみでIP抽出に失敗する行（マッチ自体は記録される）
    daily
        .write_string(2, 4, "admin")
        .unwrap()
        .write_string(2, 6, "ERR:auth failure via 127.0.0.1")
        .unwrap();
    daily
        .write_string(3, 4, "web")
        .unwrap()
        .write_string(3, 6, "ERR: web hit from 203.0.113.5")
        .unwrap();
    // 対象外サーバの行は無視される
    daily
        .write_string(4, 4, "batch")
        .unwrap()
        .write_string(4, 6, "ERR: batch hit from 192.0.2.99")
        .unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_extract_error_ips_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_report(&dir);

    let mut sink: Vec<Diagnostic> = Vec::new();
    let scan = extract_error_ips(&path, &[6, 7], &[8], &mut sink).unwrap();

    // ループバック経由の行は2番目の候補が真のクライアント
    assert_eq!(
        unique_sorted(&scan.ips),
        vec![ip("198.51.100.1"), ip("203.0.113.5")]
    );

    assert_eq!(scan.admin_matches[&6].len(), 1);
    assert_eq!(scan.admin_matches[&7].len(), 1);
    assert_eq!(scan.web_matches[&8].len(), 1);

    // マッチ診断は行ごとに流れる
    assert!(sink.iter().any(|d| matches!(
        d,
        Diagnostic::PatternMatched { side: Side::Admin, no: 6, .. }
    )));
    // ループバックのみの行は抽出失敗として報告される
    assert!(sink.iter().any(|d| matches!(
        d,
        Diagnostic::IpNotFound { side: Side::Admin, no: 7, .. }
    )));
}

#[test]
fn test_unrequested_category_not_matched() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_report(&dir);

    let mut sink: Vec<Diagnostic> = Vec::new();
    let scan = extract_error_ips(&path, &[6], &[], &mut sink).unwrap();

    assert!(scan.admin_matches.contains_key(&6));
    assert!(!scan.admin_matches.contains_key(&7));
    assert!(scan.web_matches.is_empty());
}

#[test]
fn test_missing_summary_sheet_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("エラー報告レポート（2026_8_26）.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("20260826").unwrap();
    workbook.save(&path).unwrap();

    let mut sink: Vec<Diagnostic> = Vec::new();
    let result = extract_error_ips(&path, &[6], &[8], &mut sink);
    assert!(matches!(result, Err(CheckerError::SheetNotFound(name)) if name == "集計結果"));
}

#[test]
fn test_missing_daily_sheet_is_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    // 日付トークンと一致する日次シートが無いレポート
    let path = dir.path().join("エラー報告レポート（2026_9_30）.xlsx");
    let mut workbook = Workbook::new();
    let summary = workbook.add_worksheet();
    summary.set_name("集計結果").unwrap();
    summary.write_string(0, 0, "admin側エラー").unwrap();
    summary.write_number(1, 1, 6.0).unwrap();
    summary.write_string(1, 9, "ERR:*").unwrap();
    workbook.save(&path).unwrap();

    let mut sink: Vec<Diagnostic> = Vec::new();
    let scan = extract_error_ips(&path, &[6], &[], &mut sink).unwrap();

    assert!(scan.ips.is_empty());
    assert!(scan.admin_matches.is_empty());
    assert!(sink.iter().any(|d| matches!(
        d,
        Diagnostic::DailySheetMissing { sheet_name } if sheet_name == "20260930"
    )));
}

#[test]
fn test_full_pipeline_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_report(&dir);

    let mut sink: Vec<Diagnostic> = Vec::new();
    let scan = extract_error_ips(&path, &[6, 7], &[8], &mut sink).unwrap();

    // 203.0.113.5はホワイトリスト済み、198.51.100.1は未登録
    let white_list = vec![ip("203.0.113.5")];
    let black_list = vec![ip("192.0.2.1")];
    let result = categorize_ips(
        &scan.ips,
        &white_list,
        &black_list,
        &scan.admin_matches,
        &scan.web_matches,
        &mut sink,
    );

    assert_eq!(result.white_listed, vec![ip("203.0.113.5")]);
    assert!(result.black_listed.is_empty());
    assert_eq!(result.registration_required, vec![ip("198.51.100.1")]);

    // 監査ラベル付きの振り分け診断
    assert!(sink.iter().any(|d| matches!(
        d,
        Diagnostic::IpClassified { ip: addr, labels, .. }
            if *addr == ip("198.51.100.1") && labels == &vec!["Admin No.6".to_string()]
    )));

    let csv_path = dir.path().join("result.csv");
    write_categorized_csv(&result, &csv_path).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let content = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "203.0.113.5,,198.51.100.1");
}
