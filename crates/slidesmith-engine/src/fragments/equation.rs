use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;
use super::escape::{escape_attribute, escape_html};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationDisplay {
    Inline,
    #[default]
    Block,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl EquationAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            EquationAlignment::Left => "left",
            EquationAlignment::Center => "center",
            EquationAlignment::Right => "right",
        }
    }
}

impl fmt::Display for EquationAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquationAlignment {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(EquationAlignment::Left),
            "center" => Ok(EquationAlignment::Center),
            "right" => Ok(EquationAlignment::Right),
            other => Err(UnknownVariant {
                kind: "alignment",
                value: other.to_string(),
            }),
        }
    }
}

/// A LaTeX equation rendered client-side from its `data-latex` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationConfig {
    pub latex: String,
    pub display: EquationDisplay,
    pub alignment: EquationAlignment,
    pub caption: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatexError {
    #[error("LaTeX source is empty")]
    Empty,
    #[error("unbalanced braces: {open} opening, {close} closing")]
    UnbalancedBraces { open: usize, close: usize },
}

/// Cheap pre-flight check before handing LaTeX to the renderer.
pub fn validate_latex(latex: &str) -> Result<(), LatexError> {
    if latex.trim().is_empty() {
        return Err(LatexError::Empty);
    }
    let open = latex.matches('{').count();
    let close = latex.matches('}').count();
    if open != close {
        return Err(LatexError::UnbalancedBraces { open, close });
    }
    Ok(())
}

pub fn generate_equation_html(config: &EquationConfig) -> String {
    let mut attrs = format!("data-latex=\"{}\"", escape_attribute(&config.latex));
    if config.display == EquationDisplay::Block {
        attrs.push_str(&format!(" data-alignment=\"{}\"", config.alignment));
    }
    if let Some(label) = config.label.as_deref().filter(|l| !l.is_empty()) {
        attrs.push_str(&format!(" data-label=\"{}\"", escape_attribute(label)));
    }

    match config.display {
        EquationDisplay::Inline => format!("<span class=\"slide-equation-inline\" {attrs}></span>"),
        EquationDisplay::Block => {
            let align = config.alignment;
            let caption = config
                .caption
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| {
                    format!(
                        "<div class=\"slide-equation-caption slide-equation-caption-{align}\">{}</div>",
                        escape_html(c)
                    )
                })
                .unwrap_or_default();
            format!("<div class=\"slide-equation-block slide-equation-block-{align}\" {attrs}></div>{caption}")
        }
    }
}
