//! Summarizer Module
//!
//! 見出し対応表に対してキーワード規則を適用し、要件定義の自然文要約を
//! 生成するモジュール（第3ステージ前半）。
//!
//! 各要約スロットは (キーワード優先リスト, マッチモード) の規則として
//! データ化されており、GUIから独立して単体でテスト可能です。

use crate::heading_map::HeadingMap;
use crate::types::ProjectMetadata;
use serde::Serialize;

/// 該当見出しが無い、または内容が空の場合のプレースホルダー
pub(crate) const NO_ENTRY: &str = "記載がありません";

/// 要約対象のMarkdownに内容が無い場合のメッセージ
pub(crate) const NO_CONTENT_MESSAGE: &str = "要約する内容がありません。";

/// スロット抽出のマッチモード
#[derive(Debug, Clone, Copy)]
pub(crate) enum MatchMode {
    /// キーワード優先順で最初に合致した見出しの内容を`。 `で結合して返す
    First,
    /// 合致した全見出しをタイトル辞書順に`・<title>: <content>`形式で列挙する
    All {
        /// 除外キーワード（タイトルに含まれる場合は合致から外す）
        exclude: &'static [&'static str],
    },
    /// 最初に合致した見出しの内容を改行を保持したまま返す
    Raw,
}

/// 要約スロットの抽出規則
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlotRule {
    /// キーワード優先リスト（先頭から順に試行）
    pub keywords: &'static [&'static str],
    /// マッチモード
    pub mode: MatchMode,
}

const NO_EXCLUDE: &[&str] = &[];

/// スロット抽出規則テーブル
///
/// キーワードと優先順は元の要件定義支援ツールの規則をそのまま保持する。
pub(crate) const PURPOSE_RULE: SlotRule = SlotRule {
    keywords: &["目的"],
    mode: MatchMode::First,
};
pub(crate) const PEOPLE_RULE: SlotRule = SlotRule {
    keywords: &["関係者", "体制", "登場人物"],
    mode: MatchMode::First,
};
pub(crate) const FUNCTIONAL_RULE: SlotRule = SlotRule {
    keywords: &["機能"],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const NON_FUNCTIONAL_RULE: SlotRule = SlotRule {
    keywords: &["非機能", "性能要求", "品質要求", "互換性要求", "保守性要求"],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const TECH_SPECS_RULE: SlotRule = SlotRule {
    keywords: &[
        "技術仕様",
        "動作環境",
        "必要なソフトウェア",
        "スクリプトファイル仕様",
        "コマンド実行順序",
    ],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const CONSTRAINTS_RULE: SlotRule = SlotRule {
    keywords: &["制約", "前提条件", "技術的制約", "コンテンツ制約"],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const DELIVERABLES_RULE: SlotRule = SlotRule {
    keywords: &["成果物", "納品物", "生成物"],
    mode: MatchMode::All {
        exclude: &["中間"],
    },
};
pub(crate) const QA_RULE: SlotRule = SlotRule {
    keywords: &["テスト", "チェックポイント", "エラー処理"],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const SCALABILITY_RULE: SlotRule = SlotRule {
    keywords: &["拡張", "展開", "将来的な拡張", "カスタマイズポイント"],
    mode: MatchMode::All { exclude: NO_EXCLUDE },
};
pub(crate) const DIRECTORY_RULE: SlotRule = SlotRule {
    keywords: &["ディレクトリ構造"],
    mode: MatchMode::Raw,
};
pub(crate) const FLOW_RULE: SlotRule = SlotRule {
    keywords: &["処理フロー"],
    mode: MatchMode::First,
};

/// Markdownのコードブロック記号と前後空白を除去する
fn clean_content(text: &str) -> String {
    text.replace("```", "").trim().to_string()
}

/// 抽出規則を見出し対応表へ適用する
pub(crate) fn extract_slot(map: &HeadingMap, rule: &SlotRule) -> String {
    match rule.mode {
        MatchMode::First => first_match(map, rule.keywords),
        MatchMode::All { exclude } => all_matches(map, rule.keywords, exclude),
        MatchMode::Raw => raw_match(map, rule.keywords),
    }
}

/// キーワード優先順で最初に合致した見出しの結合済み内容を返す
///
/// キーワードごとにタイトル初出順で最初の合致見出しを調べ、クリーニング後
/// の内容が非空であればそれを返します。空なら次のキーワードを試します。
fn first_match(map: &HeadingMap, keywords: &[&str]) -> String {
    for key in keywords {
        if let Some(title) = map.first_title_containing(key) {
            if let Some(lines) = map.get(title) {
                let content = clean_content(&lines.join("。 "));
                if !content.is_empty() {
                    return content;
                }
            }
        }
    }
    NO_ENTRY.to_string()
}

/// いずれかのキーワードに合致した全見出しの内容を列挙して返す
///
/// 合致見出しはタイトル辞書順で走査されるため、出力は入力の発見順に
/// 依存せず決定的です。除外キーワードを含むタイトルは合致から外れます。
fn all_matches(map: &HeadingMap, keywords: &[&str], exclude: &[&str]) -> String {
    let matched: Vec<&str> = map
        .titles_sorted()
        .into_iter()
        .filter(|title| {
            let include = keywords.iter().any(|k| title.contains(k));
            let excluded = exclude.iter().any(|k| title.contains(k));
            include && !excluded
        })
        .collect();

    if matched.is_empty() {
        return NO_ENTRY.to_string();
    }

    let mut result = String::new();
    for title in matched {
        if let Some(lines) = map.get(title) {
            if lines.is_empty() {
                continue;
            }
            let cleaned = clean_content(&lines.join(", "));
            if !cleaned.is_empty() {
                result.push_str(&format!("・{}: {}\n", title, cleaned));
            }
        }
    }

    if result.is_empty() {
        NO_ENTRY.to_string()
    } else {
        result
    }
}

/// 最初に合致した見出しの内容を改行を保持したまま返す
///
/// ディレクトリ構造のような整形済み内容のために使用されます。
fn raw_match(map: &HeadingMap, keywords: &[&str]) -> String {
    for key in keywords {
        if let Some(title) = map.first_title_containing(key) {
            if let Some(lines) = map.get(title) {
                let cleaned = clean_content(&lines.join("\n"));
                return if cleaned.is_empty() {
                    NO_ENTRY.to_string()
                } else {
                    cleaned
                };
            }
        }
    }
    NO_ENTRY.to_string()
}

/// 見出し対応表から導出された要約スロットの集合
///
/// 各スロットは独立にキーワード検索で計算され、該当が無い場合は
/// プレースホルダー「記載がありません」を保持します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySections {
    /// 目的
    pub purpose: String,
    /// 関係者・体制
    pub people: String,
    /// 機能要件
    pub functional_requirements: String,
    /// 非機能要件
    pub non_functional_requirements: String,
    /// 技術仕様
    pub tech_specs: String,
    /// 制約事項
    pub constraints: String,
    /// 成果物
    pub deliverables: String,
    /// 品質保証
    pub qa: String,
    /// 拡張性
    pub scalability: String,
    /// ディレクトリ構造（改行保持）
    pub directory_structure: String,
    /// 処理フロー
    pub processing_flow: String,
}

impl SummarySections {
    /// 見出し対応表から全スロットを抽出する
    pub(crate) fn extract(map: &HeadingMap) -> Self {
        Self {
            purpose: extract_slot(map, &PURPOSE_RULE),
            people: extract_slot(map, &PEOPLE_RULE),
            functional_requirements: extract_slot(map, &FUNCTIONAL_RULE),
            non_functional_requirements: extract_slot(map, &NON_FUNCTIONAL_RULE),
            tech_specs: extract_slot(map, &TECH_SPECS_RULE),
            constraints: extract_slot(map, &CONSTRAINTS_RULE),
            deliverables: extract_slot(map, &DELIVERABLES_RULE),
            qa: extract_slot(map, &QA_RULE),
            scalability: extract_slot(map, &SCALABILITY_RULE),
            directory_structure: extract_slot(map, &DIRECTORY_RULE),
            processing_flow: extract_slot(map, &FLOW_RULE),
        }
    }
}

/// 内容の有無に応じて定型の要約セクション文を生成する
fn format_summary_section(content: &str, section_name: &str, prefix: &str) -> String {
    if content == NO_ENTRY {
        format!("{}については、特に記載がありません。", section_name)
    } else {
        format!("{}\n{}", prefix, content)
    }
}

/// システム構成セクション（ディレクトリ構造＋処理フロー）を生成する
fn format_system_config(sections: &SummarySections) -> String {
    if sections.directory_structure == NO_ENTRY && sections.processing_flow == NO_ENTRY {
        return "最終的なシステム構成については、特に記載がありません。".to_string();
    }

    let mut result = String::from("最終的なシステム構成は以下の通りです。\n");
    if sections.directory_structure != NO_ENTRY {
        let indented: Vec<String> = sections
            .directory_structure
            .split('\n')
            .map(|l| format!("    {}", l))
            .collect();
        result.push_str(&format!("・ディレクトリ構造:\n{}\n", indented.join("\n")));
    }
    if sections.processing_flow != NO_ENTRY {
        result.push_str(&format!("・処理フロー: {}\n", sections.processing_flow));
    }
    result
}

/// 抽出済みスロットとメタデータから要約文を構築する
///
/// 各セクションは固定順で常に出力されます。該当内容が無いセクションも
/// 省略されず、定型の「記載がありません」文になります。
pub(crate) fn build_summary(sections: &SummarySections, metadata: &ProjectMetadata) -> String {
    let tech_specs_summary = format_summary_section(
        &sections.tech_specs,
        "開発に必要な技術仕様",
        "開発に必要な技術仕様は以下の通りです。",
    );
    let constraints_summary = format_summary_section(
        &sections.constraints,
        "制約事項",
        "制約事項として以下の内容が挙げられています。",
    );
    let deliverables_summary =
        format_summary_section(&sections.deliverables, "成果物", "成果物は以下の通りです。");
    let qa_summary = format_summary_section(
        &sections.qa,
        "開発後の品質保証",
        "開発後の品質保証は、以下の方針で進められます。",
    );
    let scalability_summary = format_summary_section(
        &sections.scalability,
        "将来的な拡張性",
        "将来的な拡張性として、以下の点が考慮されています。",
    );
    let system_config_summary = format_system_config(sections);

    let mut summary = String::new();
    summary.push_str(&format!(
        "この要件定義は「{}」プロジェクトに関するもので、\n",
        metadata.project_name()
    ));
    summary.push_str(&format!("目的は「{}」であり、\n", sections.purpose));
    summary.push_str(&format!("関わる人は「{}」です。\n\n", sections.people));
    summary.push_str("機能要件は以下の通りです。\n");
    summary.push_str(&sections.functional_requirements);
    summary.push_str("\n非機能要件は以下の通りです。\n");
    summary.push_str(&sections.non_functional_requirements);
    summary.push_str(&format!("\n{}", tech_specs_summary));
    summary.push_str(&format!("\n{}", constraints_summary));
    summary.push_str(&format!("\n{}", system_config_summary));
    summary.push_str(&format!("\n{}", deliverables_summary));
    summary.push_str(&format!("\n{}", qa_summary));
    summary.push_str(&format!("\n{}", scalability_summary));

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(text: &str) -> HeadingMap {
        HeadingMap::extract(text)
    }

    #[test]
    fn test_clean_content_strips_code_fences() {
        assert_eq!(clean_content("```code```"), "code");
        assert_eq!(clean_content("  text  "), "text");
        assert_eq!(clean_content("```"), "");
    }

    #[test]
    fn test_first_match_priority_order() {
        let map = map_from("# 体制\n5名の開発チーム\n# 関係者\n営業部\n");
        // 優先リストは「関係者」が先頭なので「体制」より優先される
        let result = first_match(&map, &["関係者", "体制"]);
        assert_eq!(result, "営業部");
    }

    #[test]
    fn test_first_match_joins_with_kuten() {
        let map = map_from("# 目的\n在庫を管理する\n工数を削減する\n");
        let result = first_match(&map, &["目的"]);
        assert_eq!(result, "在庫を管理する。 工数を削減する");
    }

    #[test]
    fn test_first_match_falls_through_empty_content() {
        // 先頭キーワードの合致見出しが空なら次のキーワードを試す
        let map = map_from("# 関係者\n# 体制\n開発チーム\n");
        let result = first_match(&map, &["関係者", "体制"]);
        assert_eq!(result, "開発チーム");
    }

    #[test]
    fn test_first_match_no_entry() {
        let map = map_from("# 概要\n内容\n");
        assert_eq!(first_match(&map, &["目的"]), NO_ENTRY);
    }

    #[test]
    fn test_all_matches_sorted_title_order() {
        let map = map_from("# 検索機能\n検索する\n# 一覧機能\n一覧する\n");
        let result = all_matches(&map, &["機能"], &[]);
        // タイトル辞書順（一覧機能 < 検索機能）
        assert_eq!(
            result,
            "・一覧機能: 一覧する\n・検索機能: 検索する\n"
        );
    }

    #[test]
    fn test_all_matches_exclusion() {
        let map = map_from("# 成果物\n最終レポート\n# 中間成果物\nドラフト\n");
        let result = all_matches(&map, &["成果物"], &["中間"]);
        assert_eq!(result, "・成果物: 最終レポート\n");
    }

    #[test]
    fn test_all_matches_no_entry_when_all_empty() {
        let map = map_from("# 機能\n");
        assert_eq!(all_matches(&map, &["機能"], &[]), NO_ENTRY);
    }

    #[test]
    fn test_all_matches_joins_lines_with_comma() {
        let map = map_from("# 機能\n検索\n登録\n");
        assert_eq!(all_matches(&map, &["機能"], &[]), "・機能: 検索, 登録\n");
    }

    #[test]
    fn test_raw_match_preserves_newlines() {
        let map = map_from("# ディレクトリ構造\nsrc/\nsrc/main.rs\n");
        let result = raw_match(&map, &["ディレクトリ構造"]);
        assert_eq!(result, "src/\nsrc/main.rs");
    }

    #[test]
    fn test_raw_match_returns_no_entry_on_empty_first_match() {
        let map = map_from("# ディレクトリ構造\n");
        assert_eq!(raw_match(&map, &["ディレクトリ構造"]), NO_ENTRY);
    }

    #[test]
    fn test_extract_sections_all_missing() {
        let map = map_from("# 概要\nツールの概要\n");
        let sections = SummarySections::extract(&map);
        assert_eq!(sections.purpose, NO_ENTRY);
        assert_eq!(sections.functional_requirements, NO_ENTRY);
        assert_eq!(sections.directory_structure, NO_ENTRY);
    }

    #[test]
    fn test_format_summary_section() {
        assert_eq!(
            format_summary_section(NO_ENTRY, "成果物", "成果物は以下の通りです。"),
            "成果物については、特に記載がありません。"
        );
        assert_eq!(
            format_summary_section("・成果物: レポート\n", "成果物", "成果物は以下の通りです。"),
            "成果物は以下の通りです。\n・成果物: レポート\n"
        );
    }

    #[test]
    fn test_system_config_both_missing() {
        let map = map_from("# 概要\n内容\n");
        let sections = SummarySections::extract(&map);
        assert_eq!(
            format_system_config(&sections),
            "最終的なシステム構成については、特に記載がありません。"
        );
    }

    #[test]
    fn test_system_config_directory_indented() {
        let map = map_from("# ディレクトリ構造\nsrc/\nsrc/lib.rs\n# 処理フロー\n読み込み後に変換する\n");
        let sections = SummarySections::extract(&map);
        let config = format_system_config(&sections);
        assert!(config.starts_with("最終的なシステム構成は以下の通りです。\n"));
        assert!(config.contains("・ディレクトリ構造:\n    src/\n    src/lib.rs\n"));
        assert!(config.contains("・処理フロー: 読み込み後に変換する\n"));
    }

    #[test]
    fn test_build_summary_contains_fixed_sections() {
        let map = map_from("# 目的\nテスト目的です\n");
        let sections = SummarySections::extract(&map);
        let metadata = ProjectMetadata::from_metadata_line("x,要件定義書,ProjectX,,");
        let summary = build_summary(&sections, &metadata);

        assert!(summary.contains("この要件定義は「ProjectX」プロジェクトに関するもので、"));
        assert!(summary.contains("目的は「テスト目的です」であり、"));
        assert!(summary.contains("関わる人は「記載がありません」です。"));
        assert!(summary.contains("機能要件は以下の通りです。"));
        assert!(summary.contains("非機能要件は以下の通りです。"));
        assert!(summary.contains("開発に必要な技術仕様については、特に記載がありません。"));
        assert!(summary.contains("将来的な拡張性については、特に記載がありません。"));
    }

    #[test]
    fn test_build_summary_deterministic() {
        let map = map_from("# 検索機能\n検索する\n# 一覧機能\n一覧する\n# 目的\n管理\n");
        let sections = SummarySections::extract(&map);
        let metadata = ProjectMetadata::default();
        let s1 = build_summary(&sections, &metadata);
        let s2 = build_summary(&SummarySections::extract(&map), &metadata);
        assert_eq!(s1, s2);
    }
}
