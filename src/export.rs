//! 振り分け結果のCSV出力
//!
//! 3区分を横に並べた表形式で、行数は一番多い区分に合わせて
//! 空セルで埋める。

use std::io::Write;
use std::net::Ipv4Addr;
use std::path::Path;

use chrono::NaiveDate;

use crate::categorize::CategorizedIps;
use crate::error::Result;

const CSV_HEADER: [&str; 3] = [
    "ホワイトリストに含まれているIP",
    "既にブラックリストに含まれているIP",
    "ブラックリスト登録依頼IP",
];

/// 出力CSVのファイル名（実行日付き）
pub fn output_file_name(date: NaiveDate) -> String {
    format!("エラーレポートIPチェック_{}.csv", date.format("%Y%m%d"))
}

/// 振り分け結果をCSVに書き込む
pub fn write_categorized_csv(result: &CategorizedIps, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    // Excelでそのまま開けるようUTF-8 BOM付きにする
    file.write_all(b"\xEF\xBB\xBF")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;

    let rows = result
        .white_listed
        .len()
        .max(result.black_listed.len())
        .max(result.registration_required.len());

    let cell = |list: &[Ipv4Addr], idx: usize| {
        list.get(idx).map(|ip| ip.to_string()).unwrap_or_default()
    };
    for idx in 0..rows {
        writer.write_record([
            cell(&result.white_listed, idx),
            cell(&result.black_listed, idx),
            cell(&result.registration_required, idx),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
