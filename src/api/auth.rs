//! `/auth/*` endpoints: account creation, token exchange, profile.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, Envelope};
use crate::errors::StorefrontError;
use crate::models::UserProfile;

/// Payload for backend user-record creation at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct GetTokenRequest<'a> {
    email: &'a str,
}

impl ApiClient {
    /// `POST /auth/create-user` — creates the backend user record.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<(), StorefrontError> {
        let _: serde_json::Value = self.post_json("/auth/create-user", request).await?;
        Ok(())
    }

    /// `POST /auth/get-token` — exchanges a verified identity for a JWT.
    #[instrument(skip(self))]
    pub async fn get_token(&self, email: &str) -> Result<String, StorefrontError> {
        let envelope: Envelope<TokenResponse> = self
            .post_json("/auth/get-token", &GetTokenRequest { email })
            .await?;
        if envelope.data.token.is_empty() {
            return Err(StorefrontError::AuthError(
                "Token missing in response".to_string(),
            ));
        }
        Ok(envelope.data.token)
    }

    /// `GET /auth/me` — profile of the bearer-token holder.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile, StorefrontError> {
        let envelope: Envelope<UserProfile> = self.get_json("/auth/me").await?;
        Ok(envelope.data)
    }
}
