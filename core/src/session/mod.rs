//! Dashboard session
//!
//! The fetch-trigger policy as a reducer: operations mutate the owned state
//! and return the [`Effect`]s the caller must run. Results are fed back
//! through the `on_*` methods. Nothing here performs I/O, so the same state
//! machine backs the web UI, the CLI and the tests.

mod driver;


pub use driver::SessionDriver;

use evalboard_types::{ChartRow, ColorMap, DataQuery, EvaluationRecord, FilterOptions, Selection};

use crate::filters::{FilterStore, SelectionError};
use crate::gateway::GatewayError;
use crate::reshape::ChartData;
use crate::upload::PendingUpload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not started; nothing requested yet
    #[default]
    Idle,
    /// Color config requested, waiting for the user to upload a file
    AwaitingUpload,
    /// Upload accepted, filter options requested
    AwaitingFilters,
    /// Options loaded; every selection change re-checks the fetch guard
    Ready,
}

/// Outbound work requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadColorConfig,
    Upload(PendingUpload),
    LoadFilters,
    LoadData { seq: u64, query: DataQuery },
}

#[derive(Debug, Default)]
pub struct DashboardSession {
    phase: Phase,
    store: FilterStore,
    colors: ColorMap,
    pending_file: Option<PendingUpload>,
    uploaded: bool,
    chart: ChartData,
    /// Sequence number of the most recent data request
    latest_seq: u64,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        self.store.options()
    }

    pub fn selection(&self) -> &Selection {
        self.store.selection()
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn pending_file(&self) -> Option<&PendingUpload> {
        self.pending_file.as_ref()
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.chart.rows
    }

    pub fn categories(&self) -> &[String] {
        &self.chart.categories
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Startup and Upload
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter `AwaitingUpload` and request the color config. Only the first
    /// call has any effect.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.phase = Phase::AwaitingUpload;
        tracing::info!("Dashboard session started");
        vec![Effect::LoadColorConfig]
    }

    pub fn on_color_config(&mut self, result: Result<ColorMap, GatewayError>) {
        match result {
            Ok(colors) => {
                tracing::debug!(categories = colors.len(), "Color config loaded");
                self.colors = colors;
            }
            Err(e) => {
                tracing::error!(error = %e, endpoint = e.endpoint(), "Error fetching color config")
            }
        }
    }

    /// Remember the file to upload. Replaces any earlier choice.
    pub fn select_file(&mut self, file: PendingUpload) {
        tracing::debug!(file = %file.file_name, bytes = file.len(), "Upload file selected");
        self.pending_file = Some(file);
    }

    /// Request an upload of the selected file. Ignored without a selected
    /// file or once the session has moved past `AwaitingUpload`.
    pub fn upload(&mut self) -> Vec<Effect> {
        if self.phase != Phase::AwaitingUpload {
            tracing::debug!(phase = ?self.phase, "Upload ignored outside AwaitingUpload");
            return Vec::new();
        }
        match &self.pending_file {
            Some(file) => vec![Effect::Upload(file.clone())],
            None => {
                tracing::warn!("Upload requested without a selected file");
                Vec::new()
            }
        }
    }

    pub fn on_upload(&mut self, result: Result<(), GatewayError>) -> Vec<Effect> {
        if let Err(e) = result {
            tracing::error!(error = %e, endpoint = e.endpoint(), "Error uploading file");
            return Vec::new();
        }
        if self.phase != Phase::AwaitingUpload {
            return Vec::new();
        }
        tracing::info!("File uploaded successfully");
        self.uploaded = true;
        self.phase = Phase::AwaitingFilters;
        vec![Effect::LoadFilters]
    }

    pub fn on_filters(&mut self, result: Result<FilterOptions, GatewayError>) -> Vec<Effect> {
        let options = match result {
            Ok(options) => options,
            Err(e) => {
                tracing::error!(error = %e, endpoint = e.endpoint(), "Error fetching filters");
                return Vec::new();
            }
        };
        if !matches!(self.phase, Phase::AwaitingFilters | Phase::Ready) {
            return Vec::new();
        }

        tracing::info!(
            methods = options.evaluation_methods.len(),
            ages = options.ages.len(),
            periods = options.training_periods.len(),
            counties = options.counties.len(),
            "Filter options loaded"
        );
        self.store.load_options(options);
        self.phase = Phase::Ready;
        self.request_data()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Changes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_method(&mut self, value: &str) -> Vec<Effect> {
        if !self.accepts_selection_changes() {
            return Vec::new();
        }
        self.store.set_method(value);
        self.request_data()
    }

    pub fn set_age(&mut self, value: &str) -> Vec<Effect> {
        if !self.accepts_selection_changes() {
            return Vec::new();
        }
        let result = self.store.set_age(value);
        self.log_rejected(result);
        self.request_data()
    }

    pub fn set_period(&mut self, value: &str) -> Vec<Effect> {
        if !self.accepts_selection_changes() {
            return Vec::new();
        }
        let result = self.store.set_period(value);
        self.log_rejected(result);
        self.request_data()
    }

    pub fn toggle_county(&mut self, county: &str) -> Vec<Effect> {
        if !self.accepts_selection_changes() {
            return Vec::new();
        }
        let selected = self.store.toggle_county(county);
        tracing::debug!(county, selected, "County toggled");
        self.request_data()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a data response. Responses to anything but the latest request
    /// are dropped; failures leave the current rows in place.
    pub fn on_data(&mut self, seq: u64, result: Result<Vec<EvaluationRecord>, GatewayError>) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "Discarding stale data response");
            return;
        }
        match result {
            Ok(records) => {
                self.chart = ChartData::from_records(&records);
                tracing::debug!(
                    records = records.len(),
                    rows = self.chart.rows.len(),
                    categories = ?self.chart.categories,
                    "Filtered data"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, endpoint = e.endpoint(), "Error fetching filtered data")
            }
        }
    }

    fn accepts_selection_changes(&self) -> bool {
        if self.phase == Phase::Ready {
            return true;
        }
        tracing::debug!(phase = ?self.phase, "Selection change ignored before filters load");
        false
    }

    fn log_rejected(&self, result: Result<(), SelectionError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "Rejected selection input");
        }
    }

    /// Re-check the fetch guard and issue a numbered request if it passes
    fn request_data(&mut self) -> Vec<Effect> {
        match self.store.fetch_query() {
            Some(query) => {
                self.latest_seq += 1;
                vec![Effect::LoadData {
                    seq: self.latest_seq,
                    query,
                }]
            }
            None => {
                tracing::debug!("Selection incomplete, fetch suppressed");
                Vec::new()
            }
        }
    }
}
