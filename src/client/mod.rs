//! Remote API client abstraction.
//!
//! Every provider operation is a named method on a named service, optionally
//! bound to an object identifier. The [`ApiClient`] trait is the single seam
//! between the orchestration core and the transport; services only ever see
//! raw response bytes and hand them to [`crate::codec`].

mod http;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::error::SoftLayerError;

pub use http::HttpApiClient;

/// Future returned by client, service, and finder operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SoftLayerError>> + Send + 'a>>;

/// Shared handle to an API client, cheap to clone across services.
pub type SharedClient = Arc<dyn ApiClient>;

/// A single remote procedure call against a provider service.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// Service name, for example `SoftLayer_Virtual_Guest`.
    pub service: String,
    /// Method name, for example `getObject`.
    pub method: String,
    /// Object the call is bound to, when the method is instance scoped.
    pub object_id: Option<u64>,
    /// Positional method parameters.
    pub parameters: Vec<Value>,
    /// Optional object mask restricting the returned properties.
    pub object_mask: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no object binding and no parameters.
    #[must_use]
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            object_id: None,
            parameters: Vec::new(),
            object_mask: None,
        }
    }

    /// Binds the request to an object identifier.
    #[must_use]
    pub const fn object_id(mut self, id: u64) -> Self {
        self.object_id = Some(id);
        self
    }

    /// Sets the positional parameters.
    #[must_use]
    pub fn parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the object mask.
    #[must_use]
    pub fn object_mask(mut self, mask: impl Into<String>) -> Self {
        self.object_mask = Some(mask.into());
        self
    }

    /// Builds a transport error tagged with this request's service and method.
    #[must_use]
    pub fn transport_error(&self, message: impl Into<String>) -> SoftLayerError {
        SoftLayerError::Transport {
            service: self.service.clone(),
            method: self.method.clone(),
            message: message.into(),
        }
    }
}

/// Executes remote procedure calls against the provider.
///
/// Implementations must be safe to share between concurrent operations.
pub trait ApiClient: Send + Sync {
    /// Performs one round trip and returns the raw response body.
    fn invoke<'a>(&'a self, request: &'a ApiRequest) -> ClientFuture<'a, Vec<u8>>;
}

impl<C: ApiClient + ?Sized> ApiClient for Arc<C> {
    fn invoke<'a>(&'a self, request: &'a ApiRequest) -> ClientFuture<'a, Vec<u8>> {
        (**self).invoke(request)
    }
}
