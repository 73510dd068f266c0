//! reqwest-backed gateway

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use evalboard_types::{ColorMap, DashboardConfig, DataQuery, EvaluationRecord, FilterOptions};

use super::{
    COLOR_CONFIG_PATH, DATA_PATH, FILTERS_PATH, Gateway, GatewayError, UPLOAD_FIELD, UPLOAD_PATH,
};
use crate::upload::PendingUpload;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: String,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let body = self.send(&endpoint, request).await?;
        serde_json::from_slice(&body).map_err(|source| GatewayError::Decode { endpoint, source })
    }
}

impl Gateway for HttpGateway {
    async fn color_config(&self) -> Result<ColorMap, GatewayError> {
        let endpoint = self.endpoint(COLOR_CONFIG_PATH);
        let request = self.client.get(&endpoint);
        self.get_json(endpoint, request).await
    }

    async fn filters(&self) -> Result<FilterOptions, GatewayError> {
        let endpoint = self.endpoint(FILTERS_PATH);
        let request = self.client.get(&endpoint);
        self.get_json(endpoint, request).await
    }

    async fn data(&self, query: &DataQuery) -> Result<Vec<EvaluationRecord>, GatewayError> {
        let endpoint = self.endpoint(DATA_PATH);
        tracing::debug!(counties = ?query.counties, "Sending counties");
        let request = self.client.get(&endpoint).query(&query.query_pairs());
        self.get_json(endpoint, request).await
    }

    async fn upload(&self, file: &PendingUpload) -> Result<(), GatewayError> {
        let endpoint = self.endpoint(UPLOAD_PATH);

        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|source| GatewayError::InvalidPart {
                    file_name: file.file_name.clone(),
                    source,
                })?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.client.post(&endpoint).multipart(form);
        self.send(&endpoint, request).await?;
        Ok(())
    }
}
