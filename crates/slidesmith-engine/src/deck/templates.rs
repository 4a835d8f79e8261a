//! Starter documents and the slide template catalogue.

use serde::Serialize;

use super::paging::PAGE_NUMBER_PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Basic,
    Layout,
    Special,
}

/// A named slide skeleton that can be dropped into a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TemplateCategory,
    pub html: String,
}

/// The three-slide deck a new document starts from.
pub fn default_document() -> String {
    r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>A4横向きスライド</title>
    <link rel="stylesheet" href="css/slide-styles.css">
</head>
<body>
    <!-- スライド1 -->
    <div class="slide">
        <h1>プレゼンテーションタイトル</h1>

        <h2>概要</h2>

        <ul>
            <li><span class="highlight">目的</span> - このプレゼンテーションの目的</li>
            <li><span class="highlight">対象</span> - 想定している聴衆</li>
            <li><span class="highlight">構成</span> - 発表の流れと内容</li>
        </ul>

        <p class="center">
            <strong>始めましょう</strong>
        </p>

        <div class="footer">
            2025年9月 - スライド 1/3
        </div>
    </div>

    <!-- スライド2 -->
    <div class="slide">
        <h1>主要なポイント</h1>

        <h2>重要な項目</h2>

        <ul>
            <li><span class="highlight">項目1</span> - 最初の重要な点</li>
            <li><span class="highlight">項目2</span> - 二番目のポイント</li>
            <li><span class="highlight">項目3</span> - 三番目の要素</li>
        </ul>

        <div class="footer">
            2025年9月 - スライド 2/3
        </div>
    </div>

    <!-- スライド3 -->
    <div class="slide">
        <h1>まとめ</h1>

        <h2>結論</h2>

        <ul>
            <li><span class="highlight">成果</span> - 達成できた結果</li>
            <li><span class="highlight">次のステップ</span> - 今後の展開</li>
        </ul>

        <p class="center">
            <strong>ご清聴ありがとうございました</strong>
        </p>

        <div class="footer">
            2025年9月 - スライド 3/3
        </div>
    </div>
</body>
</html>"#
        .to_string()
}

fn footer() -> String {
    format!(
        "        <div class=\"footer\">\n            {PAGE_NUMBER_PLACEHOLDER}\n        </div>"
    )
}

fn slide(comment: &str, class: &str, body: &str) -> String {
    format!(
        "\n    <!-- {comment} -->\n    <div class=\"{class}\">\n{body}\n\n{}\n    </div>",
        footer()
    )
}

/// The slide added by "new slide": title, subtitle, bullet list and a
/// placeholder footer.
pub fn new_slide_template() -> String {
    slide(
        "新しいスライド",
        "slide",
        r#"        <h1>新しいスライド</h1>

        <h2>サブタイトル</h2>

        <ul>
            <li><span class="highlight">ポイント1</span> - 最初のポイント</li>
            <li><span class="highlight">ポイント2</span> - 二番目のポイント</li>
            <li><span class="highlight">ポイント3</span> - 三番目のポイント</li>
        </ul>

        <p class="template-description">
            ここに追加の説明を記入してください。<br>
            <small class="template-hint">画像を挿入すると左右2分割レイアウトになります</small>
        </p>"#,
    )
}

fn title_template() -> String {
    slide(
        "タイトルスライド",
        "slide",
        r#"        <div class="title-page-container">
            <h1 class="title-page-title">プレゼンテーションタイトル</h1>
            <p class="title-page-subtitle">サブタイトル</p>
            <p class="title-page-meta">発表者名</p>
        </div>"#,
    )
}

fn two_column_template() -> String {
    slide(
        "2カラム",
        "slide",
        r#"        <h1>2カラムレイアウト</h1>

        <div class="split">
            <div class="left">
                <h2>左側</h2>
                <p>左カラムの内容</p>
            </div>
            <div class="right">
                <h2>右側</h2>
                <p>右カラムの内容</p>
            </div>
        </div>"#,
    )
}

fn image_text_template() -> String {
    slide(
        "画像+テキスト",
        "slide slide-split",
        r#"        <div class="slide-split-content">
            <h1>画像とテキスト</h1>
            <ul>
                <li>ポイント1</li>
                <li>ポイント2</li>
            </ul>
        </div>
        <div class="slide-image">
            <p class="image-placeholder">ここに画像を挿入</p>
        </div>"#,
    )
}

fn quote_template() -> String {
    slide(
        "引用",
        "slide",
        r#"        <h1>引用</h1>

        <div class="quote-container">
            <p class="quote-text">「ここに引用文を入力」</p>
            <p class="quote-author">引用元</p>
        </div>"#,
    )
}

/// Every template, in display order.
pub fn catalogue() -> Vec<SlideTemplate> {
    vec![
        SlideTemplate {
            id: "standard",
            name: "標準",
            category: TemplateCategory::Basic,
            html: new_slide_template(),
        },
        SlideTemplate {
            id: "title",
            name: "タイトル",
            category: TemplateCategory::Basic,
            html: title_template(),
        },
        SlideTemplate {
            id: "two-column",
            name: "2カラム",
            category: TemplateCategory::Layout,
            html: two_column_template(),
        },
        SlideTemplate {
            id: "image-text",
            name: "画像+テキスト",
            category: TemplateCategory::Layout,
            html: image_text_template(),
        },
        SlideTemplate {
            id: "quote",
            name: "引用",
            category: TemplateCategory::Special,
            html: quote_template(),
        },
    ]
}

/// Looks a template up by id.
pub fn template_by_id(id: &str) -> Option<SlideTemplate> {
    catalogue().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{extract_slides, get_slide_title};

    #[test]
    fn default_document_has_three_slides() {
        let doc = default_document();
        let slides = extract_slides(&doc);
        assert_eq!(slides.len(), 3);
        assert_eq!(get_slide_title(&slides[2].html), "まとめ");
    }

    #[test]
    fn every_template_is_exactly_one_slide_with_placeholder_footer() {
        for template in catalogue() {
            let slides = extract_slides(&template.html);
            assert_eq!(slides.len(), 1, "template {}", template.id);
            assert!(template.html.contains(PAGE_NUMBER_PLACEHOLDER));
            assert!(template.html.starts_with("\n    <!-- "));
        }
    }

    #[test]
    fn template_ids_are_unique_and_resolvable() {
        let all = catalogue();
        for t in &all {
            assert_eq!(template_by_id(t.id).as_ref(), Some(t));
        }
        assert!(template_by_id("missing").is_none());
    }
}
