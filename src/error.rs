//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// reqassistクレート全体で使用するエラー型
///
/// CSVファイルの読み込み、変換、要約処理中に発生するすべてのエラーを
/// 統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Utf8`: 入力バイト列のUTF-8デコードに失敗したエラー
/// - `InsufficientRows`: CSVの非空行数が最低行数（5行）に満たないエラー
/// - `Config`: 設定の検証に失敗したエラー（無効なしきい値など）
///
/// # 使用例
///
/// ```rust,no_run
/// use reqassist::ReqAssistError;
/// use std::fs::File;
///
/// fn read_csv_file(path: &str) -> Result<(), ReqAssistError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ReqAssistError {
    /// I/O操作中に発生したエラー
    ///
    /// ファイルの読み込み失敗、書き込み失敗など、標準ライブラリの
    /// `std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8文字列の変換エラー
    ///
    /// 入力バイト列のUTF-8文字列への変換に失敗した場合に発生します。
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// CSVの行数が不足しているエラー
    ///
    /// ヘッダー・メタデータ行（4行）と最低1件のデータ行を含むため、
    /// 変換には非空行が5行以上必要です。満たない場合に発生します。
    ///
    /// セッション層ではこのエラーを捕捉し、プレースホルダーメッセージへ
    /// 置き換えて回復します（呼び出し元へは伝播しません）。
    #[error("CSV file must have at least 5 lines (found {found})")]
    InsufficientRows {
        /// 入力に含まれていた非空行数
        found: usize,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `AnalyzerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、短文判定しきい値が0の場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use reqassist::{AnalyzerBuilder, ReqAssistError};
    ///
    /// let result = AnalyzerBuilder::new()
    ///     .with_short_content_threshold(0)  // 無効なしきい値
    ///     .build();
    ///
    /// match result {
    ///     Err(ReqAssistError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Ioエラーのテスト
    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ReqAssistError = io_err.into();

        match error {
            ReqAssistError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ReqAssistError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    // Utf8エラーのテスト
    #[test]
    fn test_utf8_error() {
        let invalid = vec![0xff, 0xfe, 0xfd];
        let utf8_err = String::from_utf8(invalid).unwrap_err();
        let error: ReqAssistError = utf8_err.into();

        match error {
            ReqAssistError::Utf8(_) => {}
            _ => panic!("Expected Utf8 error"),
        }
    }

    // InsufficientRowsエラーのテスト
    #[test]
    fn test_insufficient_rows_error() {
        let error = ReqAssistError::InsufficientRows { found: 3 };

        match error {
            ReqAssistError::InsufficientRows { found } => {
                assert_eq!(found, 3);
            }
            _ => panic!("Expected InsufficientRows error"),
        }
    }

    #[test]
    fn test_insufficient_rows_error_display() {
        let error = ReqAssistError::InsufficientRows { found: 2 };
        let error_msg = error.to_string();

        assert!(error_msg.contains("at least 5 lines"));
        assert!(error_msg.contains("found 2"));
    }

    // Configエラーのテスト
    #[test]
    fn test_config_error() {
        let error = ReqAssistError::Config("Invalid threshold: 0".to_string());

        match error {
            ReqAssistError::Config(msg) => {
                assert_eq!(msg, "Invalid threshold: 0");
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = ReqAssistError::Config("short threshold must be nonzero".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("short threshold must be nonzero"));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), ReqAssistError> {
            let _file = std::fs::File::open("nonexistent_file.csv")?;
            Ok(())
        }

        let result = io_operation();
        assert!(result.is_err());

        match result {
            Err(ReqAssistError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        // Io
        let io_err: ReqAssistError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        // InsufficientRows
        let rows_err = ReqAssistError::InsufficientRows { found: 0 };
        assert!(rows_err.to_string().starts_with("CSV file must have"));

        // Config
        let config_err = ReqAssistError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));
    }
}
