//! # Slide Stylesheet
//!
//! The stylesheet shipped with every deck, parameterised by page size. It is
//! also the source of truth for which CSS classes the validator treats as
//! defined.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CLASS_SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-zA-Z][a-zA-Z0-9_-]*)").unwrap());

/// Pixels per millimetre at 96 dpi, rounded as browsers commonly do.
const PX_PER_MM: f64 = 3.78;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideSize {
    #[default]
    #[serde(rename = "a4-landscape")]
    A4Landscape,
    #[serde(rename = "16-9")]
    Widescreen,
}

impl SlideSize {
    pub fn id(self) -> &'static str {
        match self {
            SlideSize::A4Landscape => "a4-landscape",
            SlideSize::Widescreen => "16-9",
        }
    }

    pub fn width(self) -> &'static str {
        match self {
            SlideSize::A4Landscape => "297mm",
            SlideSize::Widescreen => "1920px",
        }
    }

    pub fn height(self) -> &'static str {
        match self {
            SlideSize::A4Landscape => "210mm",
            SlideSize::Widescreen => "1080px",
        }
    }

    /// Value for the `@page { size: … }` rule.
    pub fn page_size(self) -> &'static str {
        match self {
            SlideSize::A4Landscape => "A4 landscape",
            SlideSize::Widescreen => "1920px 1080px",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlideSize::A4Landscape => "A4 landscape",
            SlideSize::Widescreen => "16:9",
        }
    }

    /// Rendered slide width in CSS pixels.
    pub fn width_px(self) -> f64 {
        match self {
            SlideSize::A4Landscape => 297.0 * PX_PER_MM,
            SlideSize::Widescreen => 1920.0,
        }
    }
}

impl fmt::Display for SlideSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SlideSize {
    type Err = crate::fragments::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a4-landscape" | "a4" => Ok(SlideSize::A4Landscape),
            "16-9" | "widescreen" => Ok(SlideSize::Widescreen),
            other => Err(crate::fragments::UnknownVariant {
                kind: "slide size",
                value: other.to_string(),
            }),
        }
    }
}

/// Zoom that fits a slide into a preview pane `container_width` pixels
/// wide, never enlarging.
pub fn preview_scale(size: SlideSize, container_width: f64) -> f64 {
    (container_width / size.width_px()).min(1.0)
}

/// Every class named in a `.class` selector, first occurrence first.
pub fn extract_css_classes(css: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for caps in CLASS_SELECTOR_RE.captures_iter(css) {
        let class = &caps[1];
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
    classes
}

fn page_css(size: SlideSize) -> String {
    let (w, h) = (size.width(), size.height());
    format!(
        r#"/* {label} slides */
body {{
    margin: 0;
    padding: 0;
    font-family: 'Hiragino Kaku Gothic Pro', 'Meiryo', sans-serif;
    background: #f0f0f0;
}}

.slide {{
    width: {w};
    height: {h};
    min-height: {h};
    max-height: {h};
    background: white;
    box-shadow: 0 4px 20px rgba(0,0,0,0.15);
    margin: 20px auto;
    padding: 40px;
    box-sizing: border-box;
    display: flex;
    flex-direction: column;
    justify-content: center;
    position: relative;
    break-after: always;
    break-inside: avoid;
    overflow: hidden;
}}

@media print {{
    body {{ background: white !important; margin: 0 !important; }}
    .slide {{
        box-shadow: none !important;
        margin: 0 !important;
        width: {w} !important;
        height: {h} !important;
    }}
}}

@page {{
    size: {page};
    margin: 0;
}}
"#,
        label = size.label(),
        page = size.page_size(),
    )
}

const SLIDE_CSS: &str = r#"
.slide:last-child {
    break-after: auto;
}

.slide h1, .slide-title {
    font-size: 48px;
    color: #2c3e50;
    text-align: center;
    margin-bottom: 30px;
    border-bottom: 4px solid #3498db;
    padding-bottom: 20px;
}

.slide h2, .slide-subtitle {
    font-size: 36px;
    color: #34495e;
    margin-bottom: 25px;
    padding-left: 20px;
    border-left: 6px solid #e74c3c;
}

.slide-text {
    font-size: 24px;
    line-height: 1.8;
    padding-left: 20px;
}

.slide-list {
    font-size: 22px;
    line-height: 1.8;
    padding-left: 40px;
}

.slide-list-item {
    margin-bottom: 15px;
}

.highlight {
    background: linear-gradient(transparent 60%, #fff59d 60%);
    padding: 2px 4px;
}

.center {
    text-align: center;
}

.footer {
    position: absolute;
    bottom: 20px;
    right: 30px;
    font-size: 18px;
    color: #7f8c8d;
}

.slide.slide-split {
    justify-content: flex-start;
}

.slide-split-content {
    display: flex;
    flex-direction: row;
    align-items: stretch;
    gap: 40px;
    flex: 1;
}

.slide-content {
    flex: 1;
    display: flex;
    flex-direction: column;
    justify-content: center;
    min-width: 0;
}

.slide-image {
    flex: 1;
    display: flex;
    align-items: center;
    justify-content: center;
    min-width: 0;
}

.slide-img,
.slide-image img {
    max-width: 100%;
    max-height: 100%;
    object-fit: contain;
    border-radius: 8px;
}

.slide-split h1 {
    font-size: 36px;
    margin-bottom: 20px;
}
"#;

const TEMPLATE_CSS: &str = r#"
.template-description {
    margin-top: 40px;
    font-size: 24px;
    padding-left: 20px;
}

.template-hint {
    color: #7f8c8d;
}

.title-page-container {
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
    height: 100%;
}

.title-page-title {
    font-size: 48px;
}

.title-page-subtitle {
    font-size: 32px;
    color: #7f8c8d;
}

.title-page-meta {
    font-size: 20px;
    color: #95a5a6;
}

.image-placeholder {
    text-align: center;
    color: #95a5a6;
}

.split {
    display: flex;
    gap: 40px;
    flex: 1;
}

.split .left,
.split .right {
    flex: 1;
    min-width: 0;
}

.quote-container {
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
    padding: 40px;
}

.quote-text {
    font-size: 36px;
    font-style: italic;
    text-align: center;
}

.quote-author {
    font-size: 24px;
    color: #7f8c8d;
    text-align: right;
    width: 100%;
}
"#;

const FRAGMENT_CSS: &str = r#"
.slide-table-container {
    margin: 20px 0;
    overflow-x: auto;
}

.slide-table {
    width: 100%;
    border-collapse: collapse;
    font-size: 20px;
}

.slide-table th,
.slide-table td {
    padding: 10px 14px;
    text-align: left;
}

.slide-table-caption {
    caption-side: top;
    font-weight: bold;
    margin-bottom: 8px;
}

.slide-table-simple th {
    border-bottom: 2px solid #2c3e50;
}

.slide-table-bordered th,
.slide-table-bordered td {
    border: 1px solid #bdc3c7;
}

.slide-table-striped tbody tr:nth-child(even) {
    background: #f4f6f7;
}

.slide-table-highlight th {
    background: #3498db;
    color: white;
}

.slide-table-minimal td {
    border-bottom: 1px solid #ecf0f1;
}

.slide-chart-container {
    position: relative;
    margin: 20px auto;
    text-align: center;
}

.chart-config {
    display: none;
}

.slide-code-block-container {
    margin: 20px 0;
    font-size: 18px;
}

.slide-code-block-container pre {
    margin: 0;
    padding: 16px;
    border-radius: 6px;
    overflow-x: auto;
}

.line-numbers {
    counter-reset: line;
}

.slide-code-block-default pre {
    background: #f5f5f5;
}

.slide-code-block-minimal pre {
    border: 1px solid #dcdde1;
}

.slide-code-block-dark pre {
    background: #2d2d2d;
    color: #ccc;
}

.slide-code-block-transparent pre {
    background: transparent;
}

.slide-code-block-caption {
    font-size: 16px;
    color: #7f8c8d;
    margin-top: 8px;
    text-align: center;
}

.slide-equation-inline {
    display: inline-block;
}

.slide-equation-block {
    margin: 20px 0;
    font-size: 28px;
}

.slide-equation-block-left,
.slide-equation-caption-left {
    text-align: left;
}

.slide-equation-block-center,
.slide-equation-caption-center {
    text-align: center;
}

.slide-equation-block-right,
.slide-equation-caption-right {
    text-align: right;
}

.slide-equation-caption {
    font-size: 16px;
    color: #7f8c8d;
}
"#;

/// The full shipped stylesheet for `size`.
pub fn slide_styles_css(size: SlideSize) -> String {
    let mut css = page_css(size);
    css.push_str(SLIDE_CSS);
    css.push_str(TEMPLATE_CSS);
    css.push_str(FRAGMENT_CSS);
    css
}
