//! Core logic for the evaluation dashboard
//!
//! Everything here is free of UI code so the web frontend and the CLI share
//! one implementation:
//!
//! - [`filters`]: option lists and the user's selection, parsed from form input
//! - [`session`]: the upload/filters/data state machine and its driver
//! - [`gateway`]: the HTTP client for the dashboard server, plus a scripted fake
//! - [`reshape`]: flat evaluation records to one chart row per county
//! - [`chart`]: the ECharts option for the grouped bar chart
//! - `context`: persisted configuration (native only)

pub mod chart;
pub mod filters;
pub mod gateway;
pub mod reshape;
pub mod session;
pub mod upload;

#[cfg(not(target_arch = "wasm32"))]
pub mod context;

// Re-exports for convenience
pub use evalboard_types::{
    ChartRow, ColorMap, DEFAULT_BAR_COLOR, DashboardConfig, DataQuery, EvaluationRecord,
    FilterOptions, Selection,
};
pub use filters::{FilterStore, SelectionError};
pub use gateway::{Gateway, GatewayCall, GatewayError, HttpGateway};
pub use reshape::{ChartData, categories, reshape};
pub use session::{DashboardSession, Effect, Phase, SessionDriver};
pub use upload::{PendingUpload, UploadError};
