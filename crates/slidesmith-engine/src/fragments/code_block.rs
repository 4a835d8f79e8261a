use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;
use super::escape::escape_html;

/// Language ids understood by the client-side highlighter, in menu order.
pub const CODE_LANGUAGES: &[&str] = &[
    "javascript", "typescript", "jsx", "tsx", "html", "css", "scss", "sass", "python", "java",
    "cpp", "c", "csharp", "go", "rust", "php", "ruby", "swift", "json", "xml", "yaml", "markdown",
    "sql", "bash", "shell", "plaintext",
];

/// Language id that gets no highlighting class.
pub const PLAINTEXT: &str = "plaintext";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockStyle {
    #[default]
    Default,
    Minimal,
    Dark,
    Transparent,
}

impl CodeBlockStyle {
    pub const ALL: [CodeBlockStyle; 4] = [
        CodeBlockStyle::Default,
        CodeBlockStyle::Minimal,
        CodeBlockStyle::Dark,
        CodeBlockStyle::Transparent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CodeBlockStyle::Default => "default",
            CodeBlockStyle::Minimal => "minimal",
            CodeBlockStyle::Dark => "dark",
            CodeBlockStyle::Transparent => "transparent",
        }
    }
}

impl fmt::Display for CodeBlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeBlockStyle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "code block style",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockConfig {
    pub code: String,
    pub language: String,
    pub style: CodeBlockStyle,
    pub show_line_numbers: bool,
    pub start_line_number: u32,
    pub caption: Option<String>,
    /// Pixel height after which the block scrolls.
    pub max_height: Option<u32>,
}

impl Default for CodeBlockConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: PLAINTEXT.to_string(),
            style: CodeBlockStyle::default(),
            show_line_numbers: false,
            start_line_number: 1,
            caption: None,
            max_height: None,
        }
    }
}

pub fn generate_code_block_html(config: &CodeBlockConfig) -> String {
    let mut container = format!(
        "<div class=\"slide-code-block-container slide-code-block-{}\"",
        config.style
    );
    if let Some(h) = config.max_height {
        container.push_str(&format!(" style=\"max-height: {h}px; overflow-y: auto;\""));
    }
    container.push('>');

    let pre = if config.show_line_numbers {
        "<pre class=\"line-numbers\">"
    } else {
        "<pre>"
    };

    let mut code_attrs = String::new();
    if config.language != PLAINTEXT && !config.language.is_empty() {
        code_attrs.push_str(&format!(" class=\"language-{}\"", config.language));
    }
    if config.show_line_numbers && config.start_line_number != 1 {
        code_attrs.push_str(&format!(" data-start=\"{}\"", config.start_line_number));
    }

    let caption = config
        .caption
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| {
            format!(
                "\n  <div class=\"slide-code-block-caption\">{}</div>",
                escape_html(c)
            )
        })
        .unwrap_or_default();

    format!(
        "{container}\n  {pre}<code{code_attrs}>{}</code></pre>{caption}\n</div>",
        escape_html(&config.code)
    )
}
