//! Request dispatch.
//!
//! One trait, two implementations: a dry-run simulator that never touches
//! the network, and a real HTTP caller over an injected client. The choice
//! is made once per run.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rand::Rng;
use reqwest::Method;

use crate::error_handling::DispatchError;
use crate::request::RequestDescriptor;

/// Body bytes and status code of one dispatched request.
#[derive(Debug, Clone)]
pub struct DispatchResponse {
    /// Raw response body.
    pub body: Vec<u8>,
    /// HTTP status code.
    pub status: u16,
}

/// The capability to deliver one request and observe its response.
///
/// Delivery failure is an error; a response with any HTTP status, success
/// or not, is a normal return.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Attempts delivery of one descriptor.
    async fn call(&self, request: &RequestDescriptor) -> Result<DispatchResponse, DispatchError>;
}

/// Simulated dispatch: logs the request and fabricates a response.
pub struct DryRunDispatcher;

#[async_trait]
impl Dispatcher for DryRunDispatcher {
    async fn call(&self, request: &RequestDescriptor) -> Result<DispatchResponse, DispatchError> {
        info!("dry run, skipping request");
        info!("request URL: {}", request.url);
        info!("request method: {}", request.method);
        if let Some(body) = &request.body {
            info!("request body: {}", body);
        }

        // roughly a third of simulated calls come back as rejections
        let roll = rand::rng().random_range(0..10);
        if roll % 3 == 0 {
            Ok(DispatchResponse {
                body: b"BadRequest".to_vec(),
                status: 400,
            })
        } else {
            Ok(DispatchResponse {
                body: b"Success".to_vec(),
                status: 200,
            })
        }
    }
}

/// Real dispatch over HTTP(S) using an injected client.
///
/// Build the client with [`crate::initialization::init_client`] so timeout
/// and TLS behavior stay consistent across the application.
pub struct HttpDispatcher {
    client: Arc<reqwest::Client>,
}

impl HttpDispatcher {
    /// Wraps a configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        HttpDispatcher { client }
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn call(&self, request: &RequestDescriptor) -> Result<DispatchResponse, DispatchError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| DispatchError::InvalidMethod(request.method.clone()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        debug!("{} {} -> {}", request.method, request.url, status);

        let body = response.bytes().await.map_err(DispatchError::BodyRead)?;
        Ok(DispatchResponse {
            body: body.to_vec(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::builder()
            .url("https://internal.example.com/api/users/123".to_string())
            .build()
    }

    #[tokio::test]
    async fn test_dry_run_vocabulary() {
        let dispatcher = DryRunDispatcher;

        // the simulated outcome is random, so sample it
        for _ in 0..50 {
            let response = dispatcher.call(&descriptor()).await.unwrap();
            match response.status {
                200 => assert_eq!(response.body, b"Success"),
                400 => assert_eq!(response.body, b"BadRequest"),
                other => panic!("unexpected simulated status {}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_http_dispatcher_rejects_malformed_method() {
        let client = Arc::new(reqwest::Client::new());
        let dispatcher = HttpDispatcher::new(client);

        let request = RequestDescriptor::builder()
            .method("GE T")
            .url("https://internal.example.com/api".to_string())
            .build();

        let error = dispatcher.call(&request).await.err().unwrap();
        assert!(matches!(error, DispatchError::InvalidMethod(_)));
    }
}
