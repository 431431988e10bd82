//! CSV to Markdown Converter Module
//!
//! 要件定義CSVを役割付きMarkdown文書へ変換するモジュール（第1ステージ）。
//!
//! CSVの各行は5列以上で構成され、2〜5列目（0始まりで1〜4）が
//! 大項目・中項目・小項目・詳細の4つの意味列です。先頭4行は
//! ヘッダー・メタデータ行として内容にかかわらずスキップされます。

use crate::api::{BlankLinePolicy, SpanRole};
use crate::error::ReqAssistError;
use crate::types::{HeadingLevel, MarkdownDocument, ProjectMetadata};

/// 変換に必要な最低非空行数
pub(crate) const MIN_LINES: usize = 5;

/// データ行の開始インデックス（0始まり、先頭4行は固定ヘッダー）
const DATA_START_INDEX: usize = 4;

/// データ行に必要な最低列数
const MIN_COLUMNS: usize = 5;

/// テキストを非空行に分割する
///
/// あらゆる改行形式（LF、CR、CRLF）で分割し、空行を除外します。
/// CRLFは分割後に空文字列を生成するため、除外により自然に処理されます。
pub(crate) fn split_non_empty_lines(text: &str) -> Vec<&str> {
    text.split(['\n', '\r']).filter(|l| !l.is_empty()).collect()
}

/// 列値が「存在する」かを判定
///
/// 空文字列およびリテラル`-`は欠損扱いで、出力を生成しません。
fn is_present(value: &str) -> bool {
    !value.is_empty() && value != "-"
}

/// CSVテキストをMarkdown文書とプロジェクトメタデータへ変換する
///
/// # 引数
///
/// * `csv` - 入力CSVテキスト（UTF-8、カンマ区切り、クォート非対応）
/// * `policy` - 見出し直前の空行挿入ポリシー
///
/// # 戻り値
///
/// * `Ok((MarkdownDocument, ProjectMetadata))` - 変換結果と確定済みメタデータ
/// * `Err(ReqAssistError::InsufficientRows)` - 非空行が5行未満の場合
///
/// # 処理フロー
///
/// 1. 非空行への分割と行数チェック
/// 2. 2行目からのファイル名決定
/// 3. 5行目以降の各行を見出し・詳細スパンとして出力
///    （5列未満の行はエラーではなくスキップ）
///
/// 1つのCSV行は、存在する列の数に応じて0〜4本の出力行を生成します。
pub(crate) fn convert(
    csv: &str,
    policy: BlankLinePolicy,
) -> Result<(MarkdownDocument, ProjectMetadata), ReqAssistError> {
    let lines = split_non_empty_lines(csv);

    if lines.len() < MIN_LINES {
        return Err(ReqAssistError::InsufficientRows {
            found: lines.len(),
        });
    }

    let metadata = ProjectMetadata::from_metadata_line(lines[1]);

    let mut document = MarkdownDocument::new();
    for line in &lines[DATA_START_INDEX..] {
        let columns: Vec<&str> = line.split(',').collect();
        if columns.len() < MIN_COLUMNS {
            continue;
        }

        let dai = columns[1].trim();
        let chu = columns[2].trim();
        let sho = columns[3].trim();
        let shosai = columns[4].trim();

        let mut first_heading_in_row = true;
        let headings = [
            (HeadingLevel::Dai, dai),
            (HeadingLevel::Chu, chu),
            (HeadingLevel::Sho, sho),
        ];
        for (level, value) in headings {
            if !is_present(value) {
                continue;
            }
            let blank_before = match policy {
                BlankLinePolicy::EveryHeading => true,
                BlankLinePolicy::FirstHeadingOnly => {
                    first_heading_in_row && !document.is_empty()
                }
            };
            let text = if blank_before {
                format!("\n{} {}\n", level.marker(), value)
            } else {
                format!("{} {}\n", level.marker(), value)
            };
            document.push(text, level.role());
            first_heading_in_row = false;
        }

        if is_present(shosai) {
            document.push(format!("{}\n", shosai), SpanRole::Body);
        }
    }

    Ok((document, metadata))
}
