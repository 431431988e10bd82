//! Heading Map Extractor Module
//!
//! 生成済みMarkdownのプレーンテキストを再解析し、見出しタイトルから
//! 本文行リストへの対応表を構築するモジュール（第2ステージ）。
//!
//! 再解析は意図的に非可逆です。見出しは行頭の`#`の並びでのみ認識され、
//! 見出しレベル（H1/H2/H3）の区別は失われます。

use crate::converter::split_non_empty_lines;

/// 見出しタイトルから本文行リストへの対応表
///
/// キーは`#`を除去しトリミングした見出しタイトルの文字列そのものです。
/// 同一タイトルの見出しが再出現した場合、既存エントリの内容は空リストで
/// 上書きされます（後勝ち）。タイトルの初出順が保持されるため、
/// キーワード検索は決定的に動作します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingMap {
    /// (タイトル, 本文行リスト) の列（タイトル初出順）
    entries: Vec<(String, Vec<String>)>,
}

impl HeadingMap {
    /// Markdownプレーンテキストから対応表を構築する
    ///
    /// # 解析規則
    ///
    /// * 非空行のみを対象とする（空行除外規則は変換ステージと同一）
    /// * `#`で始まる行は見出し行。`#`をすべて除去しトリミングした結果を
    ///   現在の見出しキーとし、エントリを空リストで初期化・上書きする
    /// * それ以外の行は、現在の見出しが有効な場合にトリミングして追記する
    /// * 最初の見出しより前の行は黙って破棄される
    pub(crate) fn extract(text: &str) -> Self {
        let mut map = HeadingMap::default();
        // 現在の見出しはスキャン中のローカル累積値として持ち回る
        let mut current: Option<usize> = None;

        for line in split_non_empty_lines(text) {
            if line.starts_with('#') {
                let title = line.replace('#', "");
                current = Some(map.start_heading(title.trim()));
            } else if let Some(idx) = current {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    map.entries[idx].1.push(trimmed.to_string());
                }
            }
        }

        map
    }

    /// 見出しエントリを開始する（後勝ち上書き）
    ///
    /// 既存タイトルなら内容を空にしてそのインデックスを、新規なら末尾に
    /// 追加してそのインデックスを返します。
    fn start_heading(&mut self, title: &str) -> usize {
        if let Some(idx) = self.entries.iter().position(|(t, _)| t == title) {
            self.entries[idx].1.clear();
            idx
        } else {
            self.entries.push((title.to_string(), Vec::new()));
            self.entries.len() - 1
        }
    }

    /// タイトルが一致するエントリの本文行を取得
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, lines)| lines.as_slice())
    }

    /// 全エントリをタイトル初出順に走査する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(t, lines)| (t.as_str(), lines.as_slice()))
    }

    /// タイトルを辞書順ソートで取得（決定的な全件マッチ走査用）
    pub fn titles_sorted(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.entries.iter().map(|(t, _)| t.as_str()).collect();
        titles.sort_unstable();
        titles
    }

    /// キーワードを含む最初のタイトルを取得（タイトル初出順）
    pub fn first_title_containing(&self, keyword: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t.contains(keyword))
            .map(|(t, _)| t.as_str())
    }

    /// エントリ数を取得
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうかを判定
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty_text() {
        let map = HeadingMap::extract("");
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_extract_basic() {
        let text = "\n# 目的\nテスト目的です\n\n## 機能\n機能Aを提供する\n機能Bを提供する\n";
        let map = HeadingMap::extract(text);

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("目的").unwrap(),
            &["テスト目的です".to_string()]
        );
        assert_eq!(
            map.get("機能").unwrap(),
            &["機能Aを提供する".to_string(), "機能Bを提供する".to_string()]
        );
    }

    #[test]
    fn test_heading_levels_are_indistinguishable() {
        // `#`の本数にかかわらず同じ抽出結果になる
        let map1 = HeadingMap::extract("# 機能\n内容\n");
        let map3 = HeadingMap::extract("### 機能\n内容\n");
        assert_eq!(map1, map3);
    }

    #[test]
    fn test_last_wins_overwrite() {
        let text = "## 機能\n古い内容\n## 他\n別の内容\n## 機能\n新しい内容\n";
        let map = HeadingMap::extract(text);

        // エントリは1つだけで、最後の出現に続く行のみを含む
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("機能").unwrap(), &["新しい内容".to_string()]);
    }

    #[test]
    fn test_lines_before_first_heading_are_discarded() {
        let text = "前置きの行\n# 目的\n本文\n";
        let map = HeadingMap::extract(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("目的").unwrap(), &["本文".to_string()]);
    }

    #[test]
    fn test_body_lines_are_trimmed() {
        let text = "# 目的\n  前後に空白  \n";
        let map = HeadingMap::extract(text);
        assert_eq!(map.get("目的").unwrap(), &["前後に空白".to_string()]);
    }

    #[test]
    fn test_whitespace_only_body_lines_are_dropped() {
        let text = "# 目的\n   \n本文\n";
        let map = HeadingMap::extract(text);
        assert_eq!(map.get("目的").unwrap(), &["本文".to_string()]);
    }

    #[test]
    fn test_titles_sorted_is_deterministic() {
        let text = "# うさぎ\nu\n# あひる\na\n# かめ\nk\n";
        let map = HeadingMap::extract(text);
        assert_eq!(map.titles_sorted(), vec!["あひる", "うさぎ", "かめ"]);
    }

    #[test]
    fn test_first_title_containing_uses_insertion_order() {
        let text = "# 性能要求\np\n# 品質要求\nq\n";
        let map = HeadingMap::extract(text);
        assert_eq!(map.first_title_containing("要求"), Some("性能要求"));
        assert_eq!(map.first_title_containing("無関係"), None);
    }

    #[test]
    fn test_heading_with_empty_title() {
        // `#`のみの行はタイトル空文字列のエントリになる
        let map = HeadingMap::extract("#\n内容\n");
        assert_eq!(map.get("").unwrap(), &["内容".to_string()]);
    }
}
