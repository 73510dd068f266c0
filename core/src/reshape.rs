//! Record reshaping
//!
//! Turns the flat records returned by the data endpoint into one chart row
//! per county with one column per model category.

use evalboard_types::{COUNTY_KEY, ChartRow, EvaluationRecord};
use hashbrown::{HashMap, HashSet};

/// Rows and legend categories for one data response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub rows: Vec<ChartRow>,
    pub categories: Vec<String>,
}

impl ChartData {
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        let rows = reshape(records);
        let categories = categories(&rows);
        Self { rows, categories }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group records by county.
///
/// Rows come out in the order each county first appears. A repeated
/// `(county, category)` pair overwrites the earlier value. Records whose
/// category is the reserved `county` key are skipped.
pub fn reshape(records: &[EvaluationRecord]) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if record.model_category == COUNTY_KEY {
            tracing::warn!(county = %record.county, "Skipping record with reserved category name");
            continue;
        }
        let idx = *index.entry(record.county.as_str()).or_insert_with(|| {
            rows.push(ChartRow::new(record.county.as_str()));
            rows.len() - 1
        });
        rows[idx].set(&record.model_category, record.evaluation_results);
    }

    rows
}

/// Union of category keys across rows, in first-seen order.
pub fn categories(rows: &[ChartRow]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::new();

    for category in rows.iter().flat_map(|row| row.categories()) {
        if seen.insert(category) {
            ordered.push(category.to_string());
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(county: &str, category: &str, value: f64) -> EvaluationRecord {
        EvaluationRecord::new(county, category, value)
    }

    #[test]
    fn groups_by_county_in_first_seen_order() {
        let records = vec![
            rec("A", "m1", 10.0),
            rec("A", "m2", 20.0),
            rec("B", "m1", 5.0),
        ];
        let data = ChartData::from_records(&records);

        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].county, "A");
        assert_eq!(data.rows[0].get("m1"), Some(10.0));
        assert_eq!(data.rows[0].get("m2"), Some(20.0));
        assert_eq!(data.rows[1].county, "B");
        assert_eq!(data.rows[1].get("m1"), Some(5.0));
        assert_eq!(data.rows[1].get("m2"), None);
        assert_eq!(data.categories, vec!["m1", "m2"]);
    }

    #[test]
    fn later_duplicate_overwrites() {
        let rows = reshape(&[rec("A", "m1", 1.0), rec("A", "m1", 2.0)]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("m1"), Some(2.0));
    }

    #[test]
    fn interleaved_counties_keep_first_appearance_order() {
        let rows = reshape(&[
            rec("B", "m1", 1.0),
            rec("A", "m1", 2.0),
            rec("B", "m2", 3.0),
        ]);
        let counties: Vec<_> = rows.iter().map(|r| r.county.as_str()).collect();
        assert_eq!(counties, vec!["B", "A"]);
        assert_eq!(rows[0].get("m2"), Some(3.0));
    }

    #[test]
    fn fully_grouped_input_has_every_category_per_county() {
        let mut records = Vec::new();
        for county in ["A", "B", "C"] {
            for category in ["m1", "m2"] {
                records.push(rec(county, category, 1.0));
            }
        }
        let data = ChartData::from_records(&records);

        assert_eq!(data.rows.len(), 3);
        for row in &data.rows {
            assert_eq!(row.categories().collect::<Vec<_>>(), vec!["m1", "m2"]);
        }
    }

    #[test]
    fn categories_union_across_rows() {
        let rows = reshape(&[
            rec("A", "m2", 1.0),
            rec("B", "m1", 1.0),
            rec("B", "m2", 1.0),
            rec("C", "m3", 1.0),
        ]);
        assert_eq!(categories(&rows), vec!["m2", "m1", "m3"]);
    }

    #[test]
    fn reserved_county_category_is_skipped() {
        let data = ChartData::from_records(&[
            rec("A", "county", 1.0),
            rec("A", "m1", 2.0),
            rec("B", "county", 3.0),
        ]);

        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.categories, vec!["m1"]);
        assert_eq!(
            serde_json::to_value(&data.rows[0]).unwrap(),
            serde_json::json!({"county": "A", "m1": 2.0})
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        let data = ChartData::from_records(&[]);
        assert!(data.is_empty());
        assert!(data.categories.is_empty());
    }
}
