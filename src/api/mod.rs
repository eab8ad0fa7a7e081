//! Typed REST client for the storefront backend.
//!
//! One [`ApiClient`] is shared across the application. It holds the base URL
//! and the bearer token; endpoint groups live in the submodules: [`auth`],
//! [`payment`], [`user`], and [`admin`]. Failed requests surface the
//! backend-supplied `message` field, falling back to a generic string.

pub mod admin;
pub mod auth;
pub mod payment;
pub mod user;

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AppConfig;
use crate::errors::StorefrontError;

pub use payment::{
    ApplyCouponRequest, CheckoutApi, CouponQuote, CreatePaymentIntentRequest, PaymentIntentItem,
    PaymentIntentResponse, SaveOrderRequest,
};

/// Response envelope used by the auth endpoints: `{ "data": … }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the backend REST API.
///
/// Cloning is cheap; clones share the underlying connection pool and the
/// bearer token, so a token set by the auth session is visible to every
/// endpoint group.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Creates a client for the given base URL, e.g.
    /// `https://api.example.com/api`. No request timeout is configured; the
    /// transport's defaults apply.
    pub fn new(base_url: &str) -> Result<Self, StorefrontError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::new(&config.server_url)
    }

    /// Sets the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, StorefrontError> {
        let builder = match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            Err(StorefrontError::Backend(message))
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, StorefrontError> {
        self.execute(self.http.get(self.endpoint(path))).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StorefrontError> {
        self.execute(self.http.post(self.endpoint(path)).json(body))
            .await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StorefrontError> {
        self.execute(self.http.put(self.endpoint(path)).json(body))
            .await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StorefrontError> {
        self.execute(self.http.patch(self.endpoint(path)).json(body))
            .await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, StorefrontError> {
        self.execute(self.http.delete(self.endpoint(path))).await
    }
}
