//! エラー報告レポートの読み取り
//!
//! ## 処理フロー
//! 1. 集計結果シートから対象エラー番号のマッチパターンを構築
//! 2. レポートファイル名の（日付）から日次シート名を解決
//! 3. 日次シートを照合してマッチ本文とIPを収集
//!
//! 集計結果シートが無い場合はレポート全体が成立しないためエラー。
//! 日次シートが無い場合は「当日のマッチなし」として空の結果を返す。

pub mod matcher;
pub mod registry;
pub mod section;

use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::{CheckerError, Result};
use crate::sheet;

pub use matcher::{scan_daily_rows, DailyScan, MatchedTexts};
pub use registry::{build_registries, PatternRegistry, WildcardPattern};
pub use section::Section;

/// 集計結果シート名
pub const RESULT_SHEET_NAME: &str = "集計結果";

/// エラーの属する側（対象サーバの区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Admin,
    Web,
}

impl Side {
    /// 日次シートの対象サーバ列の値
    pub fn server_name(self) -> &'static str {
        match self {
            Side::Admin => "admin",
            Side::Web => "web",
        }
    }

    /// 監査ラベルの接頭辞（例: Admin No.6）
    pub fn audit_prefix(self) -> &'static str {
        match self {
            Side::Admin => "Admin",
            Side::Web => "Web",
        }
    }

    pub fn from_server_name(name: &str) -> Option<Side> {
        match name {
            "admin" => Some(Side::Admin),
            "web" => Some(Side::Web),
            _ => None,
        }
    }
}

lazy_static::lazy_static! {
    /// ファイル名中の全角括弧の日付トークン
    static ref DATE_TOKEN_RE: Regex = Regex::new(r"（(.+?)）").unwrap();
}

/// レポートファイル名から日次シート名を解決する
///
/// `エラー報告レポート（2026_8_26）.xlsx` → `20260826`
pub fn daily_sheet_name(report_path: &Path) -> Result<String> {
    let file_name = report_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let captures = DATE_TOKEN_RE.captures(&file_name).ok_or_else(|| {
        CheckerError::InvalidReportName(format!("ファイル名に（日付）が含まれていません: {}", file_name))
    })?;
    let token = &captures[1];
    let date = NaiveDate::parse_from_str(token, "%Y_%m_%d").map_err(|_| {
        CheckerError::InvalidReportName(format!("（{}）を日付として解釈できません", token))
    })?;

    Ok(date.format("%Y%m%d").to_string())
}

/// レポートから該当エラーのマッチ本文とIPを抽出する
///
/// 集計結果シートで登録表を構築してから日次シートを照合する。
pub fn extract_error_ips(
    report_path: &Path,
    admin_no_list: &[u32],
    web_no_list: &[u32],
    sink: &mut dyn DiagnosticSink,
) -> Result<DailyScan> {
    let daily_name = daily_sheet_name(report_path)?;
    let mut book = sheet::open_report(report_path)?;

    if !sheet::sheet_exists(&book, RESULT_SHEET_NAME) {
        return Err(CheckerError::SheetNotFound(RESULT_SHEET_NAME.to_string()));
    }
    let summary = sheet::sheet_range(&mut book, RESULT_SHEET_NAME)?;
    let (admin_registry, web_registry) =
        build_registries(summary.rows(), admin_no_list, web_no_list);

    if !sheet::sheet_exists(&book, &daily_name) {
        sink.emit(Diagnostic::DailySheetMissing {
            sheet_name: daily_name,
        });
        return Ok(DailyScan::default());
    }
    let daily = sheet::sheet_range(&mut book, &daily_name)?;

    Ok(scan_daily_rows(
        daily.rows(),
        &admin_registry,
        &web_registry,
        sink,
    ))
}
