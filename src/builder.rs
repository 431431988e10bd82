//! Builder Module
//!
//! Fluent Builder APIを提供し、`Analyzer`インスタンスを段階的に構築する。

use crate::api::BlankLinePolicy;
use crate::converter;
use crate::error::ReqAssistError;
use crate::heading_map::HeadingMap;
use crate::suggestions;
use crate::summarizer::{self, SummarySections};
use crate::types::{MarkdownDocument, ProjectMetadata};
use std::io::{Read, Write};

/// 解析処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct AnalyzerConfig {
    /// 見出し直前の空行挿入ポリシー
    pub blank_line_policy: BlankLinePolicy,

    /// 「内容が短い」と判定する文字数しきい値
    pub short_content_threshold: usize,

    /// 性能・セキュリティ深掘り判定の文字数しきい値
    pub metric_content_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            blank_line_policy: BlankLinePolicy::EveryHeading,
            short_content_threshold: 30,
            metric_content_threshold: 50,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Analyzer`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use reqassist::{AnalyzerBuilder, BlankLinePolicy};
///
/// # fn main() -> Result<(), reqassist::ReqAssistError> {
/// let analyzer = AnalyzerBuilder::new()
///     .with_blank_line_policy(BlankLinePolicy::FirstHeadingOnly)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnalyzerBuilder {
    /// 内部設定（構築中）
    config: AnalyzerConfig,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 空行ポリシー: すべての見出しの直前に空行を挿入
    /// - 短文判定しきい値: 30文字
    /// - 深掘り判定しきい値: 50文字
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// 見出し直前の空行挿入ポリシーを指定する
    ///
    /// # 引数
    ///
    /// * `policy: BlankLinePolicy`: 空行挿入ポリシー
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use reqassist::{AnalyzerBuilder, BlankLinePolicy};
    ///
    /// let builder = AnalyzerBuilder::new()
    ///     .with_blank_line_policy(BlankLinePolicy::FirstHeadingOnly);
    /// ```
    pub fn with_blank_line_policy(mut self, policy: BlankLinePolicy) -> Self {
        self.config.blank_line_policy = policy;
        self
    }

    /// 「内容が短い」と判定する文字数しきい値を指定する
    ///
    /// 見出しの結合済み内容がこの文字数未満（かつ非空）の場合、
    /// 具体化を促す改善提案が追加されます。
    ///
    /// # 引数
    ///
    /// * `threshold: usize`: 文字数しきい値（デフォルト: 30）
    pub fn with_short_content_threshold(mut self, threshold: usize) -> Self {
        self.config.short_content_threshold = threshold;
        self
    }

    /// 性能・セキュリティ深掘り判定の文字数しきい値を指定する
    ///
    /// 性能要求・セキュリティ要件見出しの内容がこの文字数未満
    /// （かつ非空）の場合、数値目標や具体策を促す提案が追加されます。
    ///
    /// # 引数
    ///
    /// * `threshold: usize`: 文字数しきい値（デフォルト: 50）
    pub fn with_metric_content_threshold(mut self, threshold: usize) -> Self {
        self.config.metric_content_threshold = threshold;
        self
    }

    /// 設定を検証し、`Analyzer`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Analyzer)`: 設定が有効な場合、Analyzerインスタンス
    /// * `Err(ReqAssistError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `ReqAssistError::Config(String)`: 設定の検証に失敗した場合
    ///   * いずれかのしきい値が0
    ///   * 短文判定しきい値が深掘り判定しきい値より大きい
    pub fn build(self) -> Result<Analyzer, ReqAssistError> {
        if self.config.short_content_threshold == 0 {
            return Err(ReqAssistError::Config(
                "short content threshold must be nonzero".to_string(),
            ));
        }

        if self.config.metric_content_threshold == 0 {
            return Err(ReqAssistError::Config(
                "metric content threshold must be nonzero".to_string(),
            ));
        }

        if self.config.short_content_threshold > self.config.metric_content_threshold {
            return Err(ReqAssistError::Config(format!(
                "short content threshold ({}) must not exceed metric content threshold ({})",
                self.config.short_content_threshold, self.config.metric_content_threshold
            )));
        }

        Ok(Analyzer::new(self.config))
    }
}

/// 解析結果一式
///
/// 3ステージパイプライン（変換・抽出・要約/提案）の出力を保持する
/// 値オブジェクトです。各フィールドは前段の出力のみから計算され、
/// 後から変更されることはありません。
#[derive(Debug, Clone)]
pub struct Analysis {
    /// 役割付きMarkdown文書
    pub document: MarkdownDocument,

    /// プロジェクトメタデータ
    pub metadata: ProjectMetadata,

    /// 見出し対応表
    pub headings: HeadingMap,

    /// 抽出済み要約スロット
    pub sections: SummarySections,

    /// 要約文
    pub summary: String,

    /// 改善提案（改行結合済み）
    pub suggestions: String,
}

impl Analysis {
    /// 初期状態（変換前）の解析結果を生成する
    pub(crate) fn empty() -> Self {
        let headings = HeadingMap::default();
        Self {
            document: MarkdownDocument::default(),
            sections: SummarySections::extract(&headings),
            headings,
            metadata: ProjectMetadata::default(),
            summary: String::new(),
            suggestions: String::new(),
        }
    }

    /// Markdownプレーンテキストを取得
    pub fn markdown(&self) -> String {
        self.document.to_plain_text()
    }

    /// 解析結果一式をJSON文字列として取得する
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "file_name": "要件定義書_ProjectX",
    ///   "project_name": "ProjectX",
    ///   "markdown": "\n# 目的\nテスト目的です\n",
    ///   "spans": [{ "text": "\n# 目的\n", "role": "Heading1" }, ...],
    ///   "headings": { "目的": ["テスト目的です"] },
    ///   "sections": { "purpose": "テスト目的です", ... },
    ///   "summary": "...",
    ///   "suggestions": "..."
    /// }
    /// ```
    pub fn to_json(&self) -> Result<String, ReqAssistError> {
        use serde_json::json;

        let mut headings = serde_json::Map::new();
        for (title, lines) in self.headings.iter() {
            headings.insert(title.to_string(), json!(lines));
        }

        let value = json!({
            "file_name": self.metadata.file_name(),
            "project_name": self.metadata.project_name(),
            "markdown": self.document.to_plain_text(),
            "spans": self.document.spans(),
            "headings": headings,
            "sections": self.sections,
            "summary": self.summary,
            "suggestions": self.suggestions,
        });

        serde_json::to_string_pretty(&value)
            .map_err(|e| ReqAssistError::Config(format!("JSON serialization error: {}", e)))
    }
}

/// 解析処理のファサード
///
/// 要件定義CSVをMarkdown・要約・改善提案へ変換するためのメイン
/// エントリーポイントです。`AnalyzerBuilder`を使用して構築された設定に
/// 基づいて3ステージパイプラインを実行します。
///
/// # 使用例
///
/// ```rust,no_run
/// use reqassist::AnalyzerBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), reqassist::ReqAssistError> {
/// let analyzer = AnalyzerBuilder::new().build()?;
/// let input = File::open("requirements.csv")?;
/// let analysis = analyzer.analyze(input)?;
/// println!("{}", analysis.summary);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    /// 解析設定
    config: AnalyzerConfig,
}

impl Analyzer {
    pub(crate) fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// CSVテキストを解析する
    ///
    /// # 引数
    ///
    /// * `csv` - 入力CSVテキスト
    ///
    /// # 戻り値
    ///
    /// * `Ok(Analysis)` - 解析結果一式
    /// * `Err(ReqAssistError::InsufficientRows)` - 非空行が5行未満の場合
    ///
    /// # 処理フロー
    ///
    /// 1. CSV→Markdown変換（メタデータ確定）
    /// 2. Markdown→見出し対応表の抽出
    /// 3. 要約スロット抽出と要約文構築
    /// 4. 改善提案の生成
    pub fn analyze_str(&self, csv: &str) -> Result<Analysis, ReqAssistError> {
        let (document, metadata) = converter::convert(csv, self.config.blank_line_policy)?;

        let plain_text = document.to_plain_text();
        let headings = HeadingMap::extract(&plain_text);

        // 要約対象が無い場合は定型メッセージのみ（提案は生成しない）
        if converter::split_non_empty_lines(&plain_text).is_empty() {
            return Ok(Analysis {
                document,
                metadata,
                sections: SummarySections::extract(&headings),
                headings,
                summary: summarizer::NO_CONTENT_MESSAGE.to_string(),
                suggestions: String::new(),
            });
        }

        let sections = SummarySections::extract(&headings);
        let summary = summarizer::build_summary(&sections, &metadata);
        let suggestions = suggestions::generate_suggestions(
            &headings,
            &sections,
            &summary,
            self.config.short_content_threshold,
            self.config.metric_content_threshold,
        );

        Ok(Analysis {
            document,
            metadata,
            headings,
            sections,
            summary,
            suggestions,
        })
    }

    /// リーダーからCSVを読み込んで解析する
    ///
    /// # 引数
    ///
    /// * `input` - CSVを読み込むためのリーダー（Readトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Analysis)` - 解析結果一式
    /// * `Err(ReqAssistError)` - 読み込み・デコード・解析に失敗した場合
    pub fn analyze<R: Read>(&self, mut input: R) -> Result<Analysis, ReqAssistError> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        let csv = String::from_utf8(buffer)?;
        self.analyze_str(&csv)
    }

    /// CSVをMarkdown形式へ変換して書き出す
    ///
    /// # 引数
    ///
    /// * `input` - CSVを読み込むためのリーダー（Readトレイトを実装）
    /// * `output` - Markdown出力先のライター（Writeトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 変換に成功した場合
    /// * `Err(ReqAssistError)` - エラーが発生した場合
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), ReqAssistError> {
        let analysis = self.analyze(input)?;
        output.write_all(analysis.markdown().as_bytes())?;
        output.flush()?;
        Ok(())
    }

    /// CSVをMarkdown形式の文字列に変換する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use reqassist::AnalyzerBuilder;
    ///
    /// # fn main() -> Result<(), reqassist::ReqAssistError> {
    /// let analyzer = AnalyzerBuilder::new().build()?;
    /// let input = File::open("requirements.csv")?;
    /// let markdown = analyzer.convert_to_string(input)?;
    /// println!("{}", markdown);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, ReqAssistError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer)?;
        Ok(result)
    }
}
