//! レポート日付の算出
//!
//! エラー報告レポートのファイル名は「その月の第n週の曜日」で決まるため、
//! 基準日から対象月の第n曜日を求める。

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// 今日を基準に、指定した月数前の月の第n週の曜日を取得する
///
/// * `months_ago` - 何ヶ月前の月を対象とするか（0で今月）
/// * `week_number` - 第n週（1始まり）
/// * `weekday` - 曜日
pub fn nth_weekday_of_month(months_ago: u32, week_number: u32, weekday: Weekday) -> NaiveDate {
    nth_weekday_from(Local::now().date_naive(), months_ago, week_number, weekday)
}

/// 基準日を明示して第n週の曜日を求める（月の遡りは30日単位の近似）
fn nth_weekday_from(
    base: NaiveDate,
    months_ago: u32,
    week_number: u32,
    weekday: Weekday,
) -> NaiveDate {
    let target = base - Duration::days(i64::from(months_ago) * 30);
    let first_of_month = NaiveDate::from_ymd_opt(target.year(), target.month(), 1)
        .expect("月初日は常に存在する");

    let diff = (i64::from(weekday.num_days_from_monday())
        - i64::from(first_of_month.weekday().num_days_from_monday()))
    .rem_euclid(7);
    let first_weekday = first_of_month + Duration::days(diff);

    first_weekday + Duration::weeks(i64::from(week_number) - 1)
}
