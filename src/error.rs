use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{path}: {item}は存在しません。引数を確認してください")]
    FileNotFound { item: String, path: String },

    #[error("指定されたシート「{0}」は存在しません")]
    SheetNotFound(String),

    #[error("レポートファイル名が不正: {0}")]
    InvalidReportName(String),

    #[error("引数エラー: {0}")]
    InvalidArgument(String),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    #[error("CSV出力エラー: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
