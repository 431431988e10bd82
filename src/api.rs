//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::Serialize;

/// テキストスパンの意味的役割
///
/// 変換結果の各スパンが持つ意味的役割を表します。表示色やフォントの
/// 解決はホスト（表示層）の責務であり、パイプライン本体は役割のみを
/// 保持します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum SpanRole {
    /// 大項目見出し（`# `）
    ///
    /// CSVの大項目（dai）列から生成された見出しです。
    /// 表示層ではアクセントカラーで描画されることを想定しています。
    Heading1,

    /// 中項目見出し（`## `）
    Heading2,

    /// 小項目見出し（`### `）
    Heading3,

    /// 本文（詳細内容）
    ///
    /// CSVの詳細（shosai）列から生成された本文行です。
    /// 表示層では既定色で描画されることを想定しています。
    Body,
}

impl SpanRole {
    /// 見出し役割かどうかを判定
    pub fn is_heading(&self) -> bool {
        !matches!(self, SpanRole::Body)
    }
}

/// 見出し直前の空行挿入ポリシー
///
/// CSVの1行から複数の見出し（大・中・小）が同時に生成される場合に、
/// それぞれの見出しの直前に空行を挿入するかどうかを指定します。
/// この挙動には互換性のない2つの系譜が存在するため、明示的な設定項目と
/// して公開しています。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlankLinePolicy {
    /// すべての見出しの直前に空行を挿入（デフォルト）
    ///
    /// 大・中・小の各見出しが、それぞれ独立に直前の空行を伴って
    /// 出力されます。
    ///
    /// # 出力例
    ///
    /// ```markdown
    ///
    /// # 大項目
    ///
    /// ## 中項目
    /// 詳細内容
    /// ```
    EveryHeading,

    /// CSV行内の最初の見出しの直前にのみ空行を挿入
    ///
    /// 1つのCSV行から複数の見出しが生成される場合、空行は最初の見出しの
    /// 直前にのみ挿入されます。さらに、それまでの出力が空の場合
    /// （文書の先頭）には空行を挿入しません。
    ///
    /// # 出力例
    ///
    /// ```markdown
    ///
    /// # 大項目
    /// ## 中項目
    /// 詳細内容
    /// ```
    FirstHeadingOnly,
}
