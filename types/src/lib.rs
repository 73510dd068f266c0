//! Shared data model for the evaluation dashboard
//!
//! This crate contains the serializable types exchanged between the native
//! core (evalboard-core), the CLI and the WASM frontend (evalboard-ui).

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Bar color used when a category has no entry in the color config.
pub const DEFAULT_BAR_COLOR: &str = "#FFBB28";

/// Key holding the county name in a serialized [`ChartRow`]. Never a category.
pub const COUNTY_KEY: &str = "county";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard settings shared by the CLI and the web frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL the endpoint paths are joined onto, e.g. `http://localhost:8000`
    #[serde(default)]
    pub api_base_url: String,
}

impl DashboardConfig {
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// One row returned by the data endpoint.
///
/// The server returns whole table rows; columns other than these three are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub county: String,
    pub model_category: String,
    pub evaluation_results: f64,
}

impl EvaluationRecord {
    pub fn new(county: impl Into<String>, model_category: impl Into<String>, value: f64) -> Self {
        Self {
            county: county.into(),
            model_category: model_category.into(),
            evaluation_results: value,
        }
    }
}

/// Enumerable choices for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub evaluation_methods: Vec<String>,
    #[serde(default)]
    pub ages: Vec<f64>,
    #[serde(default, deserialize_with = "deserialize_periods")]
    pub training_periods: Vec<i64>,
    #[serde(default)]
    pub counties: Vec<String>,
}

/// Whole training period for a numeric value; fractions are truncated.
pub fn period_from_f64(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

/// Periods may arrive as `2020` or `2020.0` depending on the column type.
fn deserialize_periods<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPeriod {
        Int(i64),
        Float(f64),
    }

    Vec::<RawPeriod>::deserialize(deserializer)?
        .into_iter()
        .map(|raw| match raw {
            RawPeriod::Int(period) => Ok(period),
            RawPeriod::Float(value) => period_from_f64(value).ok_or_else(|| {
                let msg = format!("training period {value} is not a finite number");
                <D::Error as serde::de::Error>::custom(msg)
            }),
        })
        .collect()
}

/// Category to color lookup served by the color config endpoint.
///
/// Entries may be `null` when the server has no color configured for a
/// category; those fall back to [`DEFAULT_BAR_COLOR`] like missing entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap(HashMap<String, Option<String>>);

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) {
        self.0.insert(category.into(), Some(color.into()));
    }

    /// Color for a category, falling back to [`DEFAULT_BAR_COLOR`]
    pub fn color_for(&self, category: &str) -> &str {
        self.0
            .get(category)
            .and_then(|c| c.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_BAR_COLOR)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref().unwrap_or(DEFAULT_BAR_COLOR)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// The user's current filter choices.
///
/// Numeric fields are `None` until options load or after a value failed to
/// parse. County order is the order counties were (re)selected in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub method: String,
    pub age: Option<f64>,
    pub period: Option<i64>,
    pub counties: Vec<String>,
}

impl Selection {
    /// Defaults for a freshly loaded option set: first of each list, every county.
    pub fn from_options(options: &FilterOptions) -> Self {
        Self {
            method: options.evaluation_methods.first().cloned().unwrap_or_default(),
            age: options.ages.first().copied(),
            period: options.training_periods.first().copied(),
            counties: options.counties.clone(),
        }
    }

    /// Fetch guard: every field set and at least one county chosen.
    pub fn is_complete(&self) -> bool {
        !self.method.is_empty()
            && self.age.is_some_and(f64::is_finite)
            && self.period.is_some()
            && !self.counties.is_empty()
    }

    pub fn contains_county(&self, county: &str) -> bool {
        self.counties.iter().any(|c| c == county)
    }
}

/// Wire form of a complete [`Selection`] for the data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuery {
    pub evaluation_method: String,
    pub age: f64,
    pub training_period: i64,
    pub counties: Vec<String>,
}

impl DataQuery {
    /// Returns `None` when the selection does not pass the fetch guard.
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        if !selection.is_complete() {
            return None;
        }
        Some(Self {
            evaluation_method: selection.method.clone(),
            age: selection.age?,
            training_period: selection.period?,
            counties: selection.counties.clone(),
        })
    }

    /// Query string pairs. `counties` repeats once per county rather than
    /// being joined into a single value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3 + self.counties.len());
        pairs.push(("evaluation_method", self.evaluation_method.clone()));
        pairs.push(("age", self.age.to_string()));
        pairs.push(("training_period", self.training_period.to_string()));
        pairs.extend(self.counties.iter().map(|c| ("counties", c.clone())));
        pairs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chart Rows
// ─────────────────────────────────────────────────────────────────────────────

/// One county's values, keyed by model category.
///
/// Categories keep the order they were first set in. Serializes flat, as
/// `{"county": "A", "m1": 10.0, ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartRow {
    pub county: String,
    values: Vec<(String, f64)>,
}

impl ChartRow {
    pub fn new(county: impl Into<String>) -> Self {
        Self {
            county: county.into(),
            values: Vec::new(),
        }
    }

    /// Set a category's value, overwriting any earlier value in place.
    ///
    /// Returns `false` without storing anything for the reserved
    /// [`COUNTY_KEY`].
    pub fn set(&mut self, category: &str, value: f64) -> bool {
        if category == COUNTY_KEY {
            return false;
        }
        match self.values.iter_mut().find(|(c, _)| c == category) {
            Some((_, v)) => *v = value,
            None => self.values.push((category.to_string(), value)),
        }
        true
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| *v)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(COUNTY_KEY, &self.county)?;
        for (category, value) in &self.values {
            map.serialize_entry(category, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_selection() -> Selection {
        Selection {
            method: "mape".to_string(),
            age: Some(37.5),
            period: Some(2020),
            counties: vec!["Taipei".to_string(), "Tainan".to_string()],
        }
    }

    #[test]
    fn records_ignore_extra_columns() {
        let json = r#"{"county":"A","model_category":"m1","evaluation_results":1.5,"AGE":30,"evaluation_method":"x"}"#;
        let record: EvaluationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, EvaluationRecord::new("A", "m1", 1.5));
    }

    #[test]
    fn color_map_falls_back_for_missing_and_null() {
        let colors: ColorMap = serde_json::from_str(r##"{"m1":"#123456","m2":null}"##).unwrap();
        assert_eq!(colors.color_for("m1"), "#123456");
        assert_eq!(colors.color_for("m2"), DEFAULT_BAR_COLOR);
        assert_eq!(colors.color_for("m3"), DEFAULT_BAR_COLOR);
    }

    #[test]
    fn data_query_requires_complete_selection() {
        let mut selection = full_selection();
        assert!(DataQuery::from_selection(&selection).is_some());

        selection.age = Some(f64::NAN);
        assert!(DataQuery::from_selection(&selection).is_none());
    }

    #[test]
    fn query_pairs_repeat_counties() {
        let query = DataQuery::from_selection(&full_selection()).unwrap();
        let pairs = query.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("evaluation_method", "mape".to_string()),
                ("age", "37.5".to_string()),
                ("training_period", "2020".to_string()),
                ("counties", "Taipei".to_string()),
                ("counties", "Tainan".to_string()),
            ]
        );
    }

    #[test]
    fn whole_ages_format_without_fraction() {
        let mut selection = full_selection();
        selection.age = Some(5.0);
        let query = DataQuery::from_selection(&selection).unwrap();
        assert_eq!(query.query_pairs()[1], ("age", "5".to_string()));
    }

    #[test]
    fn fractional_training_periods_decode() {
        let json = r#"{"evaluation_methods":["x"],"ages":[5],"training_periods":[2020.0,2021],"counties":["C1"]}"#;
        let options: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.training_periods, vec![2020, 2021]);
        assert_eq!(options.ages, vec![5.0]);
    }

    #[test]
    fn training_periods_truncate_fractions() {
        let json = r#"{"training_periods":[2019.7]}"#;
        let options: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.training_periods, vec![2019]);
        assert_eq!(period_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn non_numeric_training_period_is_rejected() {
        let json = r#"{"training_periods":["2020"]}"#;
        assert!(serde_json::from_str::<FilterOptions>(json).is_err());
    }

    #[test]
    fn county_key_is_never_a_category() {
        let mut row = ChartRow::new("A");
        assert!(!row.set(COUNTY_KEY, 1.0));
        assert!(row.set("m1", 2.0));

        assert_eq!(row.categories().collect::<Vec<_>>(), vec!["m1"]);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"county": "A", "m1": 2.0}));
    }

    #[test]
    fn chart_row_serializes_flat() {
        let mut row = ChartRow::new("A");
        row.set("m1", 10.0);
        row.set("m2", 20.0);
        row.set("m1", 12.0);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"county": "A", "m1": 12.0, "m2": 20.0}));
        assert_eq!(row.categories().collect::<Vec<_>>(), vec!["m1", "m2"]);
    }
}
