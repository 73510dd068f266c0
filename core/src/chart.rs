//! Grouped bar chart option
//!
//! Builds the ECharts option object for the county/category bar chart. The
//! web UI hands it to `setOption`; the CLI writes it to disk.

use evalboard_types::{ChartRow, ColorMap};
use serde_json::{Value, json};

/// ECharts option with one bar series per category.
///
/// Counties run along the x-axis in row order and every label is shown. A
/// county without a value for a category gets a `null` bar.
pub fn bar_chart_option(rows: &[ChartRow], categories: &[String], colors: &ColorMap) -> Value {
    let counties: Vec<&str> = rows.iter().map(|r| r.county.as_str()).collect();

    let series: Vec<Value> = categories
        .iter()
        .map(|category| {
            let data: Vec<Option<f64>> = rows.iter().map(|r| r.get(category)).collect();
            json!({
                "type": "bar",
                "name": category,
                "data": data,
                "itemStyle": { "color": colors.color_for(category) },
            })
        })
        .collect();

    json!({
        "grid": { "left": 60, "right": 30, "top": 50, "bottom": 40 },
        "tooltip": { "trigger": "axis" },
        "legend": { "top": 0, "right": 0, "data": categories },
        "xAxis": {
            "type": "category",
            "data": counties,
            "axisLabel": { "interval": 0, "fontSize": 12 },
        },
        "yAxis": { "type": "value" },
        "series": series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reshape::ChartData;
    use evalboard_types::{DEFAULT_BAR_COLOR, EvaluationRecord};

    fn sample() -> ChartData {
        ChartData::from_records(&[
            EvaluationRecord::new("A", "m1", 10.0),
            EvaluationRecord::new("A", "m2", 20.0),
            EvaluationRecord::new("B", "m1", 5.0),
        ])
    }

    #[test]
    fn one_series_per_category_with_null_gaps() {
        let data = sample();
        let option = bar_chart_option(&data.rows, &data.categories, &ColorMap::new());

        assert_eq!(option["xAxis"]["data"], json!(["A", "B"]));
        let series = option["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["name"], "m1");
        assert_eq!(series[0]["data"], json!([10.0, 5.0]));
        assert_eq!(series[1]["name"], "m2");
        assert_eq!(series[1]["data"], json!([20.0, null]));
    }

    #[test]
    fn colors_come_from_config_with_fallback() {
        let data = sample();
        let colors: ColorMap = [("m1", "#0088FE")].into_iter().collect();
        let option = bar_chart_option(&data.rows, &data.categories, &colors);

        assert_eq!(option["series"][0]["itemStyle"]["color"], "#0088FE");
        assert_eq!(option["series"][1]["itemStyle"]["color"], DEFAULT_BAR_COLOR);
    }

    #[test]
    fn empty_rows_produce_empty_series() {
        let option = bar_chart_option(&[], &[], &ColorMap::new());
        assert_eq!(option["series"], json!([]));
        assert_eq!(option["legend"]["data"], json!([]));
    }
}
