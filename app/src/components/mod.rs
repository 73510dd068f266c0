//! UI Components

pub mod bar_chart;
pub mod filter_panel;
pub mod upload_form;

pub use bar_chart::BarChart;
pub use filter_panel::FilterPanel;
pub use upload_form::UploadForm;
