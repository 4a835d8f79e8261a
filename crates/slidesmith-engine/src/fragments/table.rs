use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;
use super::escape::escape_html;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    #[default]
    Simple,
    Bordered,
    Striped,
    Highlight,
    Minimal,
}

impl TableStyle {
    pub const ALL: [TableStyle; 5] = [
        TableStyle::Simple,
        TableStyle::Bordered,
        TableStyle::Striped,
        TableStyle::Highlight,
        TableStyle::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableStyle::Simple => "simple",
            TableStyle::Bordered => "bordered",
            TableStyle::Striped => "striped",
            TableStyle::Highlight => "highlight",
            TableStyle::Minimal => "minimal",
        }
    }
}

impl fmt::Display for TableStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStyle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "table style",
                value: s.to_string(),
            })
    }
}

/// A placeholder table. `rows` counts the header row when there is one.
///
/// Callers keep `rows` within 1..=20 and `columns` within 1..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub rows: usize,
    pub columns: usize,
    pub style: TableStyle,
    pub has_header: bool,
    pub caption: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            style: TableStyle::default(),
            has_header: true,
            caption: None,
        }
    }
}

pub fn generate_table_html(config: &TableConfig) -> String {
    let header = if config.has_header {
        let cells: Vec<String> = (1..=config.columns)
            .map(|c| format!("        <th>列{c}</th>"))
            .collect();
        format!(
            "    <thead>\n      <tr>\n{}\n      </tr>\n    </thead>\n",
            cells.join("\n")
        )
    } else {
        String::new()
    };

    // Data rows carry their position in the whole table, header included.
    let (data_rows, first_row) = if config.has_header {
        (config.rows.saturating_sub(1), 2)
    } else {
        (config.rows, 1)
    };
    let body: Vec<String> = (first_row..first_row + data_rows)
        .map(|r| {
            let cells: Vec<String> = (1..=config.columns)
                .map(|c| format!("        <td>データ{r}-{c}</td>"))
                .collect();
            format!("      <tr>\n{}\n      </tr>", cells.join("\n"))
        })
        .collect();

    let caption = config
        .caption
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!("    <caption class=\"slide-table-caption\">{}</caption>\n", escape_html(c)))
        .unwrap_or_default();

    format!(
        "<div class=\"slide-table-container\">\n  <table class=\"slide-table slide-table-{}\">\n{caption}{header}    <tbody>\n{}\n    </tbody>\n  </table>\n</div>",
        config.style,
        body.join("\n")
    )
}
