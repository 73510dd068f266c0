//! Filter state store
//!
//! Holds the option lists served by the filters endpoint and the user's
//! current [`Selection`]. Text coming from form controls is parsed here, so
//! everything downstream sees typed values.

use evalboard_types::{DataQuery, FilterOptions, Selection, period_from_f64};

use super::error::SelectionError;

#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    options: Option<FilterOptions>,
    selection: Selection,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        self.options.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.options.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the option lists and reset the selection to their defaults.
    /// Calling it again simply resets again.
    pub fn load_options(&mut self, options: FilterOptions) {
        self.selection = Selection::from_options(&options);
        self.options = Some(options);
    }

    pub fn set_method(&mut self, value: &str) {
        self.selection.method = value.to_string();
    }

    /// Parse and store an age. Ages may be fractional. On a parse failure
    /// the age is cleared, which keeps the fetch guard closed.
    pub fn set_age(&mut self, value: &str) -> Result<(), SelectionError> {
        match value.trim().parse::<f64>() {
            Ok(age) => {
                self.selection.age = Some(age);
                Ok(())
            }
            Err(source) => {
                self.selection.age = None;
                Err(SelectionError::InvalidAge {
                    value: value.to_string(),
                    source,
                })
            }
        }
    }

    /// Parse and store a training period as an integer. On a parse failure
    /// the period is cleared.
    pub fn set_period(&mut self, value: &str) -> Result<(), SelectionError> {
        match parse_period(value) {
            Some(period) => {
                self.selection.period = Some(period);
                Ok(())
            }
            None => {
                self.selection.period = None;
                Err(SelectionError::InvalidPeriod {
                    value: value.to_string(),
                })
            }
        }
    }

    /// Remove the county if selected, otherwise append it. Returns whether
    /// the county is selected afterwards. An empty result is allowed.
    pub fn toggle_county(&mut self, county: &str) -> bool {
        let counties = &mut self.selection.counties;
        if let Some(pos) = counties.iter().position(|c| c == county) {
            counties.remove(pos);
            false
        } else {
            counties.push(county.to_string());
            true
        }
    }

    /// Query for the data endpoint, or `None` while the fetch guard is closed.
    pub fn fetch_query(&self) -> Option<DataQuery> {
        DataQuery::from_selection(&self.selection)
    }
}

/// Integer parse that also accepts a whole-number float form such as "2020.0"
fn parse_period(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(period) = value.parse::<i64>() {
        return Some(period);
    }
    value.parse::<f64>().ok().and_then(period_from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FilterOptions {
        FilterOptions {
            evaluation_methods: vec!["x".to_string(), "y".to_string()],
            ages: vec![5.0, 7.5],
            training_periods: vec![2020, 2021],
            counties: vec!["C1".to_string(), "C2".to_string()],
        }
    }

    fn loaded_store() -> FilterStore {
        let mut store = FilterStore::new();
        store.load_options(options());
        store
    }

    #[test]
    fn load_options_selects_defaults() {
        let store = loaded_store();
        let selection = store.selection();

        assert_eq!(selection.method, "x");
        assert_eq!(selection.age, Some(5.0));
        assert_eq!(selection.period, Some(2020));
        assert_eq!(selection.counties, vec!["C1", "C2"]);
        assert!(selection.is_complete());
        assert!(store.fetch_query().is_some());
    }

    #[test]
    fn load_options_again_resets_selection() {
        let mut store = loaded_store();
        store.set_method("y");
        store.toggle_county("C1");

        store.load_options(options());
        assert_eq!(store.selection().method, "x");
        assert_eq!(store.selection().counties, vec!["C1", "C2"]);
    }

    #[test]
    fn nothing_loaded_means_no_query() {
        let store = FilterStore::new();
        assert!(!store.is_loaded());
        assert!(store.fetch_query().is_none());
    }

    #[test]
    fn age_is_parsed_as_float() {
        let mut store = loaded_store();
        store.set_age("37.5").unwrap();
        assert_eq!(store.selection().age, Some(37.5));
    }

    #[test]
    fn invalid_age_clears_field_and_closes_guard() {
        let mut store = loaded_store();
        let err = store.set_age("abc").unwrap_err();

        assert!(matches!(err, SelectionError::InvalidAge { .. }));
        assert_eq!(store.selection().age, None);
        assert!(store.fetch_query().is_none());
    }

    #[test]
    fn period_is_parsed_as_integer() {
        let mut store = loaded_store();
        store.set_period("2021").unwrap();
        assert_eq!(store.selection().period, Some(2021));

        store.set_period("2019.0").unwrap();
        assert_eq!(store.selection().period, Some(2019));

        assert!(store.set_period("soon").is_err());
        assert_eq!(store.selection().period, None);
    }

    #[test]
    fn toggle_county_is_its_own_inverse() {
        let mut store = loaded_store();
        let before = store.selection().counties.clone();

        for county in ["C1", "C2", "C3"] {
            store.toggle_county(county);
            store.toggle_county(county);

            let mut after = store.selection().counties.clone();
            let mut expected = before.clone();
            after.sort();
            expected.sort();
            assert_eq!(after, expected, "double toggle of {county}");
        }
    }

    #[test]
    fn toggling_every_county_off_is_allowed() {
        let mut store = loaded_store();
        assert!(!store.toggle_county("C1"));
        assert!(!store.toggle_county("C2"));

        assert!(store.selection().counties.is_empty());
        assert!(store.fetch_query().is_none());

        assert!(store.toggle_county("C2"));
        assert_eq!(store.selection().counties, vec!["C2"]);
    }
}
