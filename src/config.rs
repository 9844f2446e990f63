use crate::dates;
use crate::error::{CheckerError, Result};
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 対象エラー番号の既定値（admin側）
pub const DEFAULT_ADMIN_NO_LIST: &str = "6,7,8,9";
/// 対象エラー番号の既定値（web側）
pub const DEFAULT_WEB_NO_LIST: &str = "8,9";

/// ホワイトリストの既定ファイル名
const DEFAULT_WHITE_IP_FILE: &str = "htaccess.txt";
/// ブラックリストの既定ファイル名
const DEFAULT_BLACK_IP_FILE: &str = "ブラックリスト.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub admin_no_list: String,
    pub web_no_list: String,
    pub white_ip_file: Option<PathBuf>,
    pub black_ip_file: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CheckerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("blacklist-checker")
            .join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            admin_no_list: DEFAULT_ADMIN_NO_LIST.into(),
            web_no_list: DEFAULT_WEB_NO_LIST.into(),
            white_ip_file: None,
            black_ip_file: None,
            download_dir: None,
        }
    }

    /// レポートとIPリストの置き場所（既定はダウンロードフォルダ）
    pub fn download_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.download_dir {
            return Ok(dir.clone());
        }
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .ok_or_else(|| CheckerError::Config("ダウンロードフォルダが見つかりません".into()))
    }

    /// 既定のレポートパス（今月第4水曜のエラー報告レポート）
    pub fn default_report_path(&self) -> Result<PathBuf> {
        let date = dates::nth_weekday_of_month(0, 4, Weekday::Wed);
        // ファイル名の月日はゼロ埋めしない
        let file_name = format!(
            "エラー報告レポート（{}_{}_{}）.xlsx",
            date.year(),
            date.month(),
            date.day()
        );
        Ok(self.download_dir()?.join(file_name))
    }

    pub fn white_list_path(&self) -> Result<PathBuf> {
        match &self.white_ip_file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.download_dir()?.join(DEFAULT_WHITE_IP_FILE)),
        }
    }

    pub fn black_list_path(&self) -> Result<PathBuf> {
        match &self.black_ip_file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.download_dir()?.join(DEFAULT_BLACK_IP_FILE)),
        }
    }
}
