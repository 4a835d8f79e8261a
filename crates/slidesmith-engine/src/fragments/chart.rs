//! Chart placeholders: a canvas plus the chart configuration embedded as
//! JSON for the client-side renderer.

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CHART_WIDTH: u32 = 600;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
    Bubble,
    Scatter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Everything the renderer needs; serialised verbatim into the fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data: ChartData,
    /// Renderer options, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// `chart-{epoch ms}-{9 random chars}`.
pub fn new_chart_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("chart-{}-{}", Utc::now().timestamp_millis(), &random[..9])
}

/// JSON for embedding inside `<script>`: `<`, `>` and `&` become `\u` escapes
/// so the payload can never close the element.
fn script_safe_json(config: &ChartConfig) -> String {
    let json = match serde_json::to_string(config) {
        Ok(json) => json,
        Err(e) => {
            warn!("chart config could not be serialised: {e}");
            "{}".to_string()
        }
    };
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

pub fn generate_chart_html(config: &ChartConfig) -> String {
    generate_chart_html_with_id(config, &new_chart_id())
}

/// As [`generate_chart_html`] with a caller-chosen id.
pub fn generate_chart_html_with_id(config: &ChartConfig, chart_id: &str) -> String {
    let width = config.width.unwrap_or(DEFAULT_CHART_WIDTH);
    let height = config.height.unwrap_or(DEFAULT_CHART_HEIGHT);
    format!(
        "<div class=\"slide-chart-container\" data-chart-id=\"{chart_id}\">\n    <canvas id=\"chart-{chart_id}\" width=\"{width}\" height=\"{height}\"></canvas>\n    <script type=\"application/json\" class=\"chart-config\">{}</script>\n</div>",
        script_safe_json(config)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use regex::Regex;

    fn sample() -> ChartConfig {
        ChartConfig {
            chart_type: ChartType::Bar,
            title: Some("Sales <2025> & more".to_string()),
            data: ChartData {
                labels: vec!["Q1".into(), "Q2".into()],
                datasets: vec![ChartDataset {
                    label: "Units".into(),
                    data: vec![10.0, 20.5],
                    ..ChartDataset::default()
                }],
            },
            ..ChartConfig::default()
        }
    }

    #[test]
    fn fragment_with_fixed_id() {
        assert_snapshot!(generate_chart_html_with_id(&sample(), "c1"), @r#"
        <div class="slide-chart-container" data-chart-id="c1">
            <canvas id="chart-c1" width="600" height="400"></canvas>
            <script type="application/json" class="chart-config">{"type":"bar","title":"Sales \u003c2025\u003e \u0026 more","data":{"labels":["Q1","Q2"],"datasets":[{"label":"Units","data":[10.0,20.5]}]}}</script>
        </div>
        "#);
    }

    #[test]
    fn explicit_size_is_used() {
        let config = ChartConfig {
            width: Some(800),
            height: Some(300),
            ..sample()
        };
        let html = generate_chart_html_with_id(&config, "c2");
        assert!(html.contains(r#"width="800" height="300""#));
        assert!(html.contains(r#""width":800,"height":300"#));
    }

    #[test]
    fn embedded_json_parses_back_after_unescaping() {
        let html = generate_chart_html_with_id(&sample(), "c3");
        let start = html.find("class=\"chart-config\">").unwrap() + "class=\"chart-config\">".len();
        let end = html.find("</script>").unwrap();
        let parsed: ChartConfig = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn generated_ids_have_timestamp_and_random_suffix() {
        let re = Regex::new(r"^chart-[0-9]+-[0-9a-f]{9}$").unwrap();
        let a = new_chart_id();
        assert!(re.is_match(&a), "{a}");
        assert_ne!(a, new_chart_id());
    }

    #[test]
    fn polar_area_serialises_camel_case() {
        assert_eq!(
            serde_json::to_string(&ChartType::PolarArea).unwrap(),
            "\"polarArea\""
        );
    }
}
