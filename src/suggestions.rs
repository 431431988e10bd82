//! Suggestion Generator Module
//!
//! 見出し対応表と生成済み要約文に対して改善規則を適用し、重複排除・
//! ソート済みの改善提案リストを生成するモジュール（第3ステージ後半）。
//!
//! 各規則は独立に評価され、0件または1件の提案を追加します。重複は
//! セット意味論で自然に潰れ、最終出力は辞書順ソートにより同一入力に
//! 対してバイト単位で再現可能です。

use crate::heading_map::HeadingMap;
use crate::summarizer::{SummarySections, NO_ENTRY};
use std::collections::BTreeSet;

/// 提案が1件も無い場合の出力
pub(crate) const NO_SUGGESTIONS_MESSAGE: &str = "改善案はありません。";

/// 不足チェック対象のセクションラベル
const COMMON_SECTIONS: &[&str] = &[
    "目的",
    "関係者",
    "機能",
    "非機能",
    "技術仕様",
    "制約",
    "システム構成",
    "成果物",
    "品質",
    "拡張",
];

/// 改善提案を生成する
///
/// # 引数
///
/// * `map` - 見出し対応表
/// * `sections` - 抽出済み要約スロット
/// * `summary` - 生成済み要約文
/// * `short_threshold` - 「内容が短い」と判定する文字数しきい値
/// * `metric_threshold` - 性能・セキュリティ深掘り判定の文字数しきい値
///
/// # 戻り値
///
/// 辞書順ソート・重複排除済みの提案を改行で結合した文字列。提案が
/// 1件も無い場合は「改善案はありません。」を返します。
pub(crate) fn generate_suggestions(
    map: &HeadingMap,
    sections: &SummarySections,
    summary: &str,
    short_threshold: usize,
    metric_threshold: usize,
) -> String {
    // BTreeSetで重複排除と辞書順ソートを同時に行う
    let mut suggestions = BTreeSet::new();

    // 不足セクションの提案
    for section in COMMON_SECTIONS {
        let quoted = format!("{}は「記載がありません」", section);
        let phrased = format!("{}については、特に記載がありません。", section);
        if summary.contains(&quoted) || summary.contains(&phrased) {
            suggestions.insert(format!(
                "・'{}'に関する詳細な情報を追記しましょう。",
                section
            ));
        }
    }

    // 内容の具体性に関する提案
    for (heading, lines) in map.iter() {
        let combined = lines.join(" ");
        let combined = combined.trim();
        let length = combined.chars().count();
        if length > 0 && length < short_threshold {
            suggestions.insert(format!(
                "・'{}' の内容をより具体的に、詳細に記述しましょう。",
                heading
            ));
        }
    }

    // 機能要件・非機能要件の深掘り提案
    if summary.contains("機能要件は以下の通りです。")
        && sections.functional_requirements == NO_ENTRY
    {
        suggestions.insert(
            "・主要な機能要件を具体的に記述しましょう。各機能の入出力、処理内容、エラー時の挙動を明確にすると良いでしょう。"
                .to_string(),
        );
    }
    if summary.contains("非機能要件は以下の通りです。")
        && sections.non_functional_requirements == NO_ENTRY
    {
        suggestions.insert(
            "・性能、品質、セキュリティ、可用性など、非機能要件の具体的な数値目標や基準を明確にしましょう。"
                .to_string(),
        );
    }

    // 性能要求・セキュリティ要件の具体性チェック
    if heading_content_is_thin(map, "性能要求", metric_threshold) {
        suggestions.insert(
            "・性能要求には、応答時間、スループット、同時接続数など、具体的な数値目標を記述しましょう。"
                .to_string(),
        );
    }
    if heading_content_is_thin(map, "セキュリティ要件", metric_threshold) {
        suggestions.insert(
            "・セキュリティ要件には、認証、認可、データ暗号化、脆弱性対策など、具体的な対策を記述しましょう。"
                .to_string(),
        );
    }

    // 一般的な要件定義のベストプラクティス
    if !summary.contains("スコープ") {
        suggestions.insert(
            "・プロジェクトのスコープ（対象範囲と対象外範囲）を明確に定義しましょう。".to_string(),
        );
    }
    if !summary.contains("テスト") && !summary.contains("品質保証") {
        suggestions.insert(
            "・テスト計画や受け入れ基準、品質保証の方針について記述しましょう。".to_string(),
        );
    }
    if !summary.contains("運用") && !summary.contains("保守") {
        suggestions.insert(
            "・システム運用・保守に関する要件（ログ、監視、バックアップ、エラー通知など）を考慮しましょう。"
                .to_string(),
        );
    }
    if !summary.contains("ユーザー") && !summary.contains("関係者") {
        suggestions.insert(
            "・システムを利用するユーザーの種類や役割、権限について明確にしましょう。".to_string(),
        );
    }
    if !summary.contains("データ") && !summary.contains("情報") {
        suggestions.insert(
            "・扱うデータの種類、構造、保存期間、プライバシーに関する考慮事項などを記述しましょう。"
                .to_string(),
        );
    }

    if suggestions.is_empty() {
        NO_SUGGESTIONS_MESSAGE.to_string()
    } else {
        suggestions.into_iter().collect::<Vec<_>>().join("\n")
    }
}

/// キーワードに合致する最初の見出しの内容が非空かつしきい値未満かを判定
fn heading_content_is_thin(map: &HeadingMap, keyword: &str, threshold: usize) -> bool {
    let Some(title) = map.first_title_containing(keyword) else {
        return false;
    };
    let Some(lines) = map.get(title) else {
        return false;
    };
    let content = lines.concat();
    let length = content.chars().count();
    length > 0 && length < threshold
}
