use std::collections::BTreeMap;

use serde_json::Value;

use super::{escape, fmt_money};

const PIE_COLORS: [&str; 6] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#F97316",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Uniform ordered series behind the bar and pie renderings.
///
/// Accepts either a category→value mapping or an array of
/// `{name, value}` records; values are coerced from JSON numbers or
/// strings, defaulting to 0 when they don't parse.
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<ChartPoint>,
}

impl Series {
    pub fn from_points(points: Vec<ChartPoint>) -> Self {
        Self { points }
    }

    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        Self {
            points: map
                .iter()
                .map(|(name, value)| ChartPoint {
                    name: name.clone(),
                    value: *value,
                })
                .collect(),
        }
    }

    /// Normalizes a loosely-typed aggregate payload.
    pub fn from_json(value: &Value) -> Self {
        let points = match value {
            Value::Object(map) => map
                .iter()
                .map(|(name, v)| ChartPoint {
                    name: name.clone(),
                    value: coerce(v),
                })
                .collect(),
            Value::Array(records) => records
                .iter()
                .map(|record| ChartPoint {
                    name: record
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    value: record.get("value").map(coerce).unwrap_or(0.0),
                })
                .collect(),
            _ => Vec::new(),
        };
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn max(&self) -> f64 {
        self.points.iter().fold(0.0_f64, |acc, p| acc.max(p.value))
    }

    fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Bar width per point as a percentage of the series maximum.
    /// All zero when the maximum isn't positive, so an empty or
    /// all-zero series renders flat instead of dividing by zero.
    pub fn bar_widths(&self) -> Vec<f64> {
        let max = self.max();
        self.points
            .iter()
            .map(|p| if max > 0.0 { p.value / max * 100.0 } else { 0.0 })
            .collect()
    }

    /// Share of the series total per point, 0 when the total isn't
    /// positive.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.points
            .iter()
            .map(|p| {
                if total > 0.0 {
                    p.value / total * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Horizontal bars scaled to the maximum value in the series.
    pub fn bar_html(&self) -> String {
        if self.is_empty() {
            return r#"<p class="empty">No data available</p>"#.to_string();
        }
        let widths = self.bar_widths();
        let mut out = String::new();
        for (point, width) in self.points.iter().zip(widths) {
            out.push_str(&format!(
                r#"<div class="bar-label"><span>{}</span><span>{}</span></div>
<div class="bar-track"><div class="bar-fill" style="width: {:.1}%"></div></div>
"#,
                escape(&point.name),
                fmt_money(point.value),
                width
            ));
        }
        out
    }

    /// Pie-style legend with a percentage of the total per entry.
    pub fn pie_html(&self) -> String {
        if self.is_empty() {
            return r#"<p class="empty">No data available</p>"#.to_string();
        }
        let percentages = self.percentages();
        let mut out = String::new();
        for (i, (point, pct)) in self.points.iter().zip(percentages).enumerate() {
            out.push_str(&format!(
                r#"<div class="legend-row"><span class="swatch" style="background: {}"></span><span>{}</span><span class="muted">{} ({:.1}%)</span></div>
"#,
                PIE_COLORS[i % PIE_COLORS.len()],
                escape(&point.name),
                fmt_money(point.value),
                pct
            ));
        }
        out
    }
}

fn coerce(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(values: &[(&str, f64)]) -> Series {
        Series::from_points(
            values
                .iter()
                .map(|(name, value)| ChartPoint {
                    name: name.to_string(),
                    value: *value,
                })
                .collect(),
        )
    }

    #[test]
    fn bar_widths_are_fractions_of_the_maximum() {
        let s = series(&[("Tech", 50.0), ("Energy", 100.0), ("Health", 25.0)]);
        assert_eq!(s.bar_widths(), vec![50.0, 100.0, 25.0]);
    }

    #[test]
    fn bar_widths_are_zero_when_the_maximum_is_zero() {
        let s = series(&[("Tech", 0.0), ("Energy", 0.0)]);
        assert_eq!(s.bar_widths(), vec![0.0, 0.0]);
        assert!(series(&[]).bar_widths().is_empty());
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let s = series(&[("A", 10.0), ("B", 20.0), ("C", 70.0)]);
        let pcts = s.percentages();
        assert!((pcts.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!((pcts[2] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_are_zero_when_the_total_is_zero() {
        let s = series(&[("A", 0.0), ("B", 0.0)]);
        assert_eq!(s.percentages(), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_series_renders_a_placeholder_not_a_panic() {
        let s = Series::default();
        assert!(s.bar_html().contains("No data available"));
        assert!(s.pie_html().contains("No data available"));
    }

    #[test]
    fn json_map_and_record_array_normalize_identically() {
        let from_map = Series::from_json(&json!({"Tech": 60.0, "Energy": 40.0}));
        let from_records = Series::from_json(&json!([
            {"name": "Energy", "value": 40.0},
            {"name": "Tech", "value": 60.0},
        ]));
        let mut map_points = from_map.points.clone();
        map_points.sort_by(|a, b| a.name.cmp(&b.name));
        let mut record_points = from_records.points.clone();
        record_points.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(map_points, record_points);
    }

    #[test]
    fn string_values_are_coerced_and_garbage_defaults_to_zero() {
        let s = Series::from_json(&json!({"Tech": "12.5", "Energy": "oops", "Other": null}));
        let mut points = s.points.clone();
        points.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(points[0].value, 0.0); // Energy
        assert_eq!(points[1].value, 0.0); // Other
        assert_eq!(points[2].value, 12.5); // Tech
    }

    #[test]
    fn bar_html_scales_against_the_maximum() {
        let s = series(&[("Tech", 50.0), ("Energy", 100.0)]);
        let html = s.bar_html();
        assert!(html.contains("width: 50.0%"));
        assert!(html.contains("width: 100.0%"));
    }
}
