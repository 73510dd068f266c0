//! Remote data gateway
//!
//! Transport to the four dashboard endpoints. No caching, no retries and no
//! timeouts beyond whatever the underlying client applies.

mod error;
mod http;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::GatewayError;
pub use http::HttpGateway;

use evalboard_types::{ColorMap, DataQuery, EvaluationRecord, FilterOptions};

use crate::upload::PendingUpload;

pub const COLOR_CONFIG_PATH: &str = "color-config";
pub const FILTERS_PATH: &str = "filters";
pub const DATA_PATH: &str = "data";
pub const UPLOAD_PATH: &str = "upload";

/// Multipart field name the upload endpoint reads the file from
pub const UPLOAD_FIELD: &str = "file";

/// Outbound calls the dashboard makes.
///
/// Futures are not required to be `Send`; the browser client runs on a
/// single thread.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn color_config(&self) -> Result<ColorMap, GatewayError>;

    async fn filters(&self) -> Result<FilterOptions, GatewayError>;

    async fn data(&self, query: &DataQuery) -> Result<Vec<EvaluationRecord>, GatewayError>;

    async fn upload(&self, file: &PendingUpload) -> Result<(), GatewayError>;
}

/// A call as seen by a gateway, used for diagnostics and test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    ColorConfig,
    Filters,
    Data(DataQuery),
    Upload { file_name: String },
}
