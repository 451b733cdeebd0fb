//! Browser fetch transport.

use crate::services::http::{ApiRequest, Method, RawResponse, Transport, TransportError};
use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::RequestCredentials;

/// [`Transport`] backed by `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut req = match request.method {
            Method::Get => Request::get(&request.path),
            Method::Post => Request::post(&request.path),
            Method::Delete => Request::delete(&request.path),
        }
        .credentials(RequestCredentials::SameOrigin);
        for (name, value) in request.headers() {
            req = req.header(name, value);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = resp.status();
        let url = resp.url();
        let content_type = resp.headers().get("content-type");
        let body = resp
            .text()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        Ok(RawResponse {
            status,
            content_type,
            url,
            body,
        })
    }
}
