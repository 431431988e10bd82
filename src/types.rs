//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use crate::api::SpanRole;
use serde::Serialize;

/// 要件定義書マーカー文字列
///
/// メタデータ行（2行目）の2列目がこの値と完全一致する場合、
/// 保存ファイル名は「要件定義書_<プロジェクト名>」形式になります。
pub(crate) const DOC_MARKER: &str = "要件定義書";

/// 要件定義書ファイル名のプレフィックス
pub(crate) const FILE_NAME_PREFIX: &str = "要件定義書_";

/// マーカーが見つからない場合のデフォルトファイル名
pub(crate) const DEFAULT_FILE_NAME: &str = "converted";

/// 見出しレベル
///
/// CSVの大・中・小項目列に対応する見出しの深さを表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeadingLevel {
    /// 大項目（`#`）
    Dai,
    /// 中項目（`##`）
    Chu,
    /// 小項目（`###`）
    Sho,
}

impl HeadingLevel {
    /// Markdownの見出しマーカー（`#`の並び）を取得
    pub fn marker(&self) -> &'static str {
        match self {
            HeadingLevel::Dai => "#",
            HeadingLevel::Chu => "##",
            HeadingLevel::Sho => "###",
        }
    }

    /// 対応するスパン役割を取得
    pub fn role(&self) -> SpanRole {
        match self {
            HeadingLevel::Dai => SpanRole::Heading1,
            HeadingLevel::Chu => SpanRole::Heading2,
            HeadingLevel::Sho => SpanRole::Heading3,
        }
    }
}

/// 役割付きテキストスパン
///
/// `text`は改行を含む出力チャンクそのもので、役割（`role`)は表示層での
/// 色・フォント解決に使用されます。プレーンテキスト化はスパンの連結です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    /// 出力テキスト（改行を含む）
    pub text: String,
    /// 意味的役割
    pub role: SpanRole,
}

impl StyledSpan {
    /// 新しいスパンを生成
    pub(crate) fn new(text: String, role: SpanRole) -> Self {
        Self { text, role }
    }
}

/// 役割付きスパンの列として表現されたMarkdown文書
///
/// 変換ステージの出力であり、表示層へはスパン列として、抽出ステージへは
/// プレーンテキストとして渡されます。役割情報はプレーンテキスト化の際に
/// 失われます（見出しは再解析時に`#`の並びでのみ認識されます）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkdownDocument {
    /// スパン列（出力順）
    spans: Vec<StyledSpan>,
}

impl MarkdownDocument {
    /// 空の文書を生成
    pub(crate) fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// プレースホルダーメッセージのみを含む文書を生成
    ///
    /// 行数不足やファイル読み込み失敗の回復時に使用されます。
    pub(crate) fn placeholder(message: &str) -> Self {
        Self {
            spans: vec![StyledSpan::new(message.to_string(), SpanRole::Body)],
        }
    }

    /// スパンを末尾に追加
    pub(crate) fn push(&mut self, text: String, role: SpanRole) {
        self.spans.push(StyledSpan::new(text, role));
    }

    /// スパン列への参照を取得
    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    /// 文書が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// プレーンテキストとして取得（役割情報は失われる）
    pub fn to_plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// 変換時に確定するプロジェクトメタデータ
///
/// 保存ファイル名と要約のプロジェクト名行の両方で使用されます。
/// 変換のたびに上書きされます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    /// 保存時のベースファイル名
    file_name: String,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ProjectMetadata {
    /// メタデータ行（2行目）からファイル名を決定する
    ///
    /// 2列目が「要件定義書」と完全一致し、かつ3列目が存在する場合は
    /// 「要件定義書_<3列目>」、それ以外は「converted」になります。
    /// マーカー不一致はエラーではありません。
    pub(crate) fn from_metadata_line(line: &str) -> Self {
        let columns: Vec<&str> = line.split(',').collect();
        let file_name = if columns.len() > 2 && columns[1] == DOC_MARKER {
            format!("{}{}", FILE_NAME_PREFIX, columns[2])
        } else {
            DEFAULT_FILE_NAME.to_string()
        };
        Self { file_name }
    }

    /// 保存時のベースファイル名を取得
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// プロジェクト名を取得（マーカープレフィックスを除去）
    pub fn project_name(&self) -> String {
        self.file_name.replace(FILE_NAME_PREFIX, "")
    }

    /// Markdown保存時の推奨ファイル名（`<fileName>.md`）
    pub fn markdown_file_name(&self) -> String {
        format!("{}.md", self.file_name)
    }

    /// 要約保存時の推奨ファイル名（`<fileName>_要約.txt`）
    pub fn summary_file_name(&self) -> String {
        format!("{}_要約.txt", self.file_name)
    }
}
