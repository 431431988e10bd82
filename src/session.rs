//! Session Module
//!
//! 現在の解析結果を所有し、GUIホストとの境界を担うセッション層。
//!
//! ホスト（表示層）はファイルパスの取得・スパン列の描画・ダイアログ
//! 表示のみを担当する外部協力者であり、このモジュールはそれらに依存
//! しない形で「変換の実行」「文書置換の通知」「保存」を提供します。
//! 同期・単一スレッドで動作し、`&mut self`メソッドにより変換は常に
//! 同時に1件のみ実行されます。

use crate::builder::{Analysis, Analyzer};
use crate::error::ReqAssistError;
use crate::types::{MarkdownDocument, ProjectMetadata};
use std::fmt;
use std::fs;
use std::path::Path;

/// 行数不足時に文書へ置かれるプレースホルダーメッセージ
pub(crate) const INSUFFICIENT_LINES_MESSAGE: &str = "CSV file must have at least 5 lines.";

/// 文書置換時に呼び出されるコールバック型
pub type ReplaceCallback = Box<dyn FnMut(&MarkdownDocument)>;

/// 解析セッション
///
/// 現在の解析結果一式を排他的に所有します。新しい変換のたびに結果は
/// 丸ごと置き換えられ、部分更新は行われません。読み込み系の失敗は
/// プレースホルダー文書への置換で局所的に回復し、呼び出し元へは
/// 伝播しません。保存の失敗のみ`Err`として返されます。
pub struct Session {
    /// 解析ファサード
    analyzer: Analyzer,

    /// 現在の解析結果
    analysis: Analysis,

    /// 文書置換時の通知コールバック
    on_replace: Option<ReplaceCallback>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("analyzer", &self.analyzer)
            .field("analysis", &self.analysis)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// 新しいセッションを生成する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use reqassist::{AnalyzerBuilder, Session};
    ///
    /// # fn main() -> Result<(), reqassist::ReqAssistError> {
    /// let analyzer = AnalyzerBuilder::new().build()?;
    /// let mut session = Session::new(analyzer);
    /// session.convert_csv("...");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            analysis: Analysis::empty(),
            on_replace: None,
        }
    }

    /// 文書置換時の通知コールバックを登録する
    ///
    /// 変換の成功・失敗（プレースホルダー置換）を問わず、文書が
    /// 置き換えられるたびに新しい文書への参照とともに呼び出されます。
    pub fn set_on_replace<F>(&mut self, callback: F)
    where
        F: FnMut(&MarkdownDocument) + 'static,
    {
        self.on_replace = Some(Box::new(callback));
    }

    /// CSVテキストを変換し、セッション状態を置き換える
    ///
    /// 成功時は解析結果一式が置き換えられます。行数不足の場合は文書
    /// のみがプレースホルダーに置き換えられ、メタデータ・要約・提案は
    /// 直前の値を保ちます。いずれの場合も置換通知が発火します。
    pub fn convert_csv(&mut self, csv: &str) {
        match self.analyzer.analyze_str(csv) {
            Ok(analysis) => {
                self.analysis = analysis;
            }
            Err(ReqAssistError::InsufficientRows { .. }) => {
                self.analysis.document = MarkdownDocument::placeholder(INSUFFICIENT_LINES_MESSAGE);
            }
            Err(e) => {
                self.analysis.document =
                    MarkdownDocument::placeholder(&format!("Error reading file: {}", e));
            }
        }
        self.notify_replace();
    }

    /// CSVファイルを読み込んで変換する
    ///
    /// 読み込み失敗（ファイル不存在、権限、エンコーディング）は文書の
    /// プレースホルダー置換で回復し、エラーは返しません。
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) {
        match fs::read_to_string(path) {
            Ok(csv) => self.convert_csv(&csv),
            Err(e) => {
                self.analysis.document =
                    MarkdownDocument::placeholder(&format!("Error reading file: {}", e));
                self.notify_replace();
            }
        }
    }

    /// 現在のMarkdown文書をファイルへ保存する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 保存に成功した場合
    /// * `Err(ReqAssistError::Config)` - 保存対象の文書が無い場合
    /// * `Err(ReqAssistError::Io)` - 書き込みに失敗した場合。
    ///   セッション内の状態は影響を受けません。
    pub fn save_markdown<P: AsRef<Path>>(&self, path: P) -> Result<(), ReqAssistError> {
        if self.analysis.document.is_empty() {
            return Err(ReqAssistError::Config(
                "no document to save".to_string(),
            ));
        }
        fs::write(path, self.analysis.document.to_plain_text())?;
        Ok(())
    }

    /// 現在の要約をファイルへ保存する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 保存に成功した場合
    /// * `Err(ReqAssistError::Config)` - 保存対象の要約が無い場合
    /// * `Err(ReqAssistError::Io)` - 書き込みに失敗した場合
    pub fn save_summary<P: AsRef<Path>>(&self, path: P) -> Result<(), ReqAssistError> {
        if self.analysis.summary.is_empty() {
            return Err(ReqAssistError::Config("no summary to save".to_string()));
        }
        fs::write(path, &self.analysis.summary)?;
        Ok(())
    }

    /// 現在の解析結果への参照を取得
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// 現在の文書への参照を取得
    pub fn document(&self) -> &MarkdownDocument {
        &self.analysis.document
    }

    /// 現在のメタデータへの参照を取得
    pub fn metadata(&self) -> &ProjectMetadata {
        &self.analysis.metadata
    }

    /// 現在の要約文への参照を取得
    pub fn summary(&self) -> &str {
        &self.analysis.summary
    }

    /// 現在の改善提案への参照を取得
    pub fn suggestions(&self) -> &str {
        &self.analysis.suggestions
    }

    /// Markdown保存ダイアログの推奨ファイル名（`<fileName>.md`）
    pub fn suggested_markdown_name(&self) -> String {
        self.analysis.metadata.markdown_file_name()
    }

    /// 要約保存ダイアログの推奨ファイル名（`<fileName>_要約.txt`）
    pub fn suggested_summary_name(&self) -> String {
        self.analysis.metadata.summary_file_name()
    }

    /// 置換通知を発火する
    fn notify_replace(&mut self) {
        if let Some(callback) = self.on_replace.as_mut() {
            callback(&self.analysis.document);
        }
    }
}
