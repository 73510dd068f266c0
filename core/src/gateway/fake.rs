//! Scripted in-memory gateway
//!
//! Serves fixed responses and records every call. Endpoints without a
//! scripted response fail with a 500 status.

use std::cell::RefCell;
use std::collections::VecDeque;

use evalboard_types::{ColorMap, DataQuery, EvaluationRecord, FilterOptions};

use super::{
    COLOR_CONFIG_PATH, DATA_PATH, FILTERS_PATH, Gateway, GatewayCall, GatewayError, UPLOAD_PATH,
};
use crate::upload::PendingUpload;

#[derive(Debug, Default)]
pub struct FakeGateway {
    colors: Option<ColorMap>,
    filters: Option<FilterOptions>,
    upload_ok: bool,
    /// Queued data responses; `None` entries fail. An empty queue answers
    /// with no records.
    data: RefCell<VecDeque<Option<Vec<EvaluationRecord>>>>,
    calls: RefCell<Vec<GatewayCall>>,
}

impl FakeGateway {
    /// A gateway where every endpoint succeeds with empty payloads
    pub fn healthy() -> Self {
        Self {
            colors: Some(ColorMap::new()),
            filters: Some(FilterOptions::default()),
            upload_ok: true,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, colors: ColorMap) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.colors = None;
        self
    }

    pub fn with_filters(mut self, filters: FilterOptions) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn without_filters(mut self) -> Self {
        self.filters = None;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.upload_ok = false;
        self
    }

    pub fn push_data(&self, records: Vec<EvaluationRecord>) {
        self.data.borrow_mut().push_back(Some(records));
    }

    pub fn push_data_failure(&self) {
        self.data.borrow_mut().push_back(None);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    /// Data queries issued so far, in order
    pub fn data_queries(&self) -> Vec<DataQuery> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GatewayCall::Data(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn server_error(endpoint: &str) -> GatewayError {
    GatewayError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
    }
}

impl Gateway for FakeGateway {
    async fn color_config(&self) -> Result<ColorMap, GatewayError> {
        self.record(GatewayCall::ColorConfig);
        self.colors
            .clone()
            .ok_or_else(|| server_error(COLOR_CONFIG_PATH))
    }

    async fn filters(&self) -> Result<FilterOptions, GatewayError> {
        self.record(GatewayCall::Filters);
        self.filters.clone().ok_or_else(|| server_error(FILTERS_PATH))
    }

    async fn data(&self, query: &DataQuery) -> Result<Vec<EvaluationRecord>, GatewayError> {
        self.record(GatewayCall::Data(query.clone()));
        match self.data.borrow_mut().pop_front() {
            Some(Some(records)) => Ok(records),
            Some(None) => Err(server_error(DATA_PATH)),
            None => Ok(Vec::new()),
        }
    }

    async fn upload(&self, file: &PendingUpload) -> Result<(), GatewayError> {
        self.record(GatewayCall::Upload {
            file_name: file.file_name.clone(),
        });
        if self.upload_ok {
            Ok(())
        } else {
            Err(server_error(UPLOAD_PATH))
        }
    }
}
