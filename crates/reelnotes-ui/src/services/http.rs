//! HTTP client for the review API.
//!
//! # Design
//! - Requests go through a [`Transport`] so the classification logic runs
//!   natively in tests; the browser build plugs in a fetch transport.
//! - [`classify`] is the single place that turns a raw response into a typed
//!   payload or an [`ApiError`]. Order matters: status, then content type,
//!   then JSON decoding, then the application `success` flag.

use crate::core::film::FilmId;
use crate::core::location::PageLocation;
use crate::error::ApiError;
use crate::i18n::LocaleCode;
use async_trait::async_trait;
use reelnotes_api_models::{
    Acknowledged, Acknowledgement, InteractionRequest, InteractionResponse, LikeToggleResponse,
    ReviewsResponse,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Header marking requests as AJAX so the server answers 401 instead of redirecting.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");
/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method subset used by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// DELETE.
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A request ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL or same-origin path.
    pub path: String,
    /// Serialised JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Headers to send. `Content-Type` only accompanies a body.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = vec![REQUESTED_WITH];
        if self.body.is_some() {
            headers.push(("Content-Type", JSON_CONTENT_TYPE));
        }
        headers
    }
}

/// What came back, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Final URL after redirects.
    pub url: String,
    /// Body text.
    pub body: String,
}

/// The request never produced a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport failure: {detail}")]
pub struct TransportError {
    /// Backend detail.
    pub detail: String,
}

impl TransportError {
    /// Wrap any displayable backend error.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Sends requests. Implementations attach same-origin credentials and the
/// [`REQUESTED_WITH`] and JSON content-type headers.
#[async_trait(?Send)]
pub trait Transport {
    /// Perform one request.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Turn a raw response into a payload.
///
/// `origin` is the page the request was made from; it is carried through the
/// login redirect on a 401.
///
/// # Errors
///
/// See [`ApiError`] for the taxonomy.
pub fn classify<R>(response: &RawResponse, origin: &PageLocation, login_path: &str) -> Result<R, ApiError>
where
    R: DeserializeOwned + Acknowledged,
{
    if response.status == 401 {
        return Err(ApiError::AuthRequired {
            redirect_to: origin.login_redirect(login_path),
        });
    }
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|value| value.to_ascii_lowercase().contains(JSON_CONTENT_TYPE));
    if !is_json {
        if !response.url.is_empty() && response.url.contains(login_path) {
            return Err(ApiError::AuthRequired {
                redirect_to: response.url.clone(),
            });
        }
        return Err(ApiError::UnexpectedContent {
            status: response.status,
        });
    }
    let payload: R = serde_json::from_str(&response.body).map_err(|err| ApiError::Malformed {
        status: response.status,
        detail: err.to_string(),
    })?;
    if !payload.succeeded() {
        return Err(ApiError::Rejected {
            status: response.status,
            message: payload
                .message()
                .filter(|message| !message.trim().is_empty())
                .map(str::to_string),
        });
    }
    Ok(payload)
}

/// Typed client for the review API.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    login_path: String,
}

impl<T: Transport> ApiClient<T> {
    /// Build a client. `base_url` is prepended to every path (empty for same-origin).
    pub fn new(transport: T, base_url: impl Into<String>, login_path: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            login_path: login_path.into(),
        }
    }

    /// Underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn call<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        origin: &PageLocation,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned + Acknowledged,
    {
        let request = ApiRequest {
            method,
            path: self.url(path),
            body,
        };
        tracing::debug!(method = method.as_str(), path = %request.path, "api request");
        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(error = %err, path, "api request failed");
            ApiError::Network { detail: err.detail }
        })?;
        let result = classify(&response, origin, &self.login_path);
        if let Err(err) = &result {
            tracing::warn!(status = response.status, path, error = ?err, "api call unsuccessful");
        }
        result
    }

    /// `POST /api/like/{film}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn toggle_like(
        &self,
        film: FilmId,
        origin: &PageLocation,
    ) -> Result<LikeToggleResponse, ApiError> {
        self.call(Method::Post, &format!("/api/like/{film}"), None, origin)
            .await
    }

    /// `POST /api/interaction/{film}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; an unserialisable body is reported as `Malformed`.
    pub async fn save_interaction(
        &self,
        film: FilmId,
        body: &InteractionRequest,
        origin: &PageLocation,
    ) -> Result<InteractionResponse, ApiError> {
        let body = serde_json::to_string(body).map_err(|err| ApiError::Malformed {
            status: 0,
            detail: err.to_string(),
        })?;
        self.call(
            Method::Post,
            &format!("/api/interaction/{film}"),
            Some(body),
            origin,
        )
        .await
    }

    /// `DELETE /api/interaction/{film}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn delete_interaction(
        &self,
        film: FilmId,
        origin: &PageLocation,
    ) -> Result<Acknowledgement, ApiError> {
        self.call(
            Method::Delete,
            &format!("/api/interaction/{film}"),
            None,
            origin,
        )
        .await
    }

    /// `GET /api/reviews/{film}?page=&per_page=`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn fetch_reviews(
        &self,
        film: FilmId,
        page: u32,
        per_page: u32,
        origin: &PageLocation,
    ) -> Result<ReviewsResponse, ApiError> {
        self.call(
            Method::Get,
            &format!("/api/reviews/{film}?page={page}&per_page={per_page}"),
            None,
            origin,
        )
        .await
    }

    /// `GET /language/{lang}`. Any completed response counts as success.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] when the request does not complete.
    pub async fn set_language(&self, language: LocaleCode) -> Result<(), ApiError> {
        let request = ApiRequest {
            method: Method::Get,
            path: self.url(&format!("/language/{}", language.code())),
            body: None,
        };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| ApiError::Network { detail: err.detail })?;
        tracing::debug!(status = response.status, lang = language.code(), "language switched");
        Ok(())
    }
}
