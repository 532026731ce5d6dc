//! `reqwest` transport speaking the SoftLayer REST convention.
//!
//! Calls map to `{base}/{service}[/{id}]/{method}.json`. Calls without
//! parameters are sent as `GET`; calls with parameters are sent as `POST`
//! with a `{"parameters": [...]}` body. Authentication uses HTTP basic auth
//! with the account username and API key.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigError, SoftLayerConfig};

use super::{ApiClient, ApiRequest, ClientFuture};

#[derive(Serialize)]
struct ParametersBody<'a> {
    parameters: &'a [Value],
}

/// HTTP implementation of [`ApiClient`].
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl HttpApiClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when credentials are absent and
    /// [`ConfigError::Invalid`] when the timeouts are unusable or the HTTP
    /// client cannot be built.
    pub fn new(config: &SoftLayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| ConfigError::Invalid(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Renders the endpoint URL for a request.
    #[must_use]
    pub fn url_for(&self, request: &ApiRequest) -> String {
        let mut url = format!("{}/{}", self.base_url, request.service);
        if let Some(id) = request.object_id {
            url.push_str(&format!("/{id}"));
        }
        url.push_str(&format!("/{}.json", request.method));
        url
    }
}

impl ApiClient for HttpApiClient {
    fn invoke<'a>(&'a self, request: &'a ApiRequest) -> ClientFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let url = self.url_for(request);
            debug!(
                service = %request.service,
                method = %request.method,
                object_id = ?request.object_id,
                "invoking provider method"
            );

            let mut builder = if request.parameters.is_empty() {
                self.http.get(&url)
            } else {
                self.http.post(&url).json(&ParametersBody {
                    parameters: &request.parameters,
                })
            };
            builder = builder.basic_auth(&self.username, Some(&self.api_key));
            if let Some(mask) = &request.object_mask {
                builder = builder.query(&[("objectMask", mask)]);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| request.transport_error(err.to_string()))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|err| request.transport_error(err.to_string()))?;

            if status.is_success() {
                return Ok(body.to_vec());
            }

            Err(crate::error::SoftLayerError::Api {
                service: request.service.clone(),
                method: request.method.clone(),
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            })
        })
    }
}
