//! Authentication: an injected identity-provider capability plus the
//! backend token exchange.
//!
//! The identity provider verifies credentials; the backend then issues the
//! JWT actually used to authorize API calls (`POST /auth/get-token`). The
//! token is persisted so a session survives restarts.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::api::auth::CreateUserRequest;
use crate::api::ApiClient;
use crate::errors::{IdentityError, StorefrontError};
use crate::models::UserProfile;
use crate::storage::KeyValueStore;

const TOKEN_KEY: &str = "access-token";

/// Injected identity-provider capability (credential verification only;
/// opaque success/failure outcomes).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(), IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub password: String,
}

/// Session context: current profile and the bearer token authorizing API
/// calls. Owned by the application root and shared by reference.
pub struct AuthSession<I> {
    provider: Arc<I>,
    api: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    profile: RwLock<Option<UserProfile>>,
}

impl<I: IdentityProvider> AuthSession<I> {
    pub fn new(provider: Arc<I>, api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            provider,
            api,
            storage,
            profile: RwLock::new(None),
        }
    }

    /// Creates the backend user record, signs up with the identity provider,
    /// then establishes a session (token + profile).
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserProfile, StorefrontError> {
        self.api
            .create_user(&CreateUserRequest {
                name: input.name.clone(),
                email: input.email.clone(),
                contact: input.contact.clone(),
            })
            .await?;

        self.provider
            .sign_up(&input.email, &input.password, &input.name)
            .await?;

        self.establish(&input.email).await
    }

    /// Signs in with the identity provider and establishes a session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, StorefrontError> {
        self.provider.sign_in(email, password).await?;
        self.establish(email).await
    }

    /// Rehydrates a persisted session on startup. Returns `None`, after
    /// clearing the stale token, if no token is stored or the profile fetch
    /// fails; never an application-fatal error.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<UserProfile>, StorefrontError> {
        let Some(token) = self.storage.get(TOKEN_KEY)? else {
            return Ok(None);
        };

        self.api.set_token(token);
        match self.api.me().await {
            Ok(profile) => {
                self.set_profile(Some(profile.clone()));
                info!(user = %profile.id, "session restored");
                Ok(Some(profile))
            }
            Err(err) => {
                warn!(error = %err, "stored token rejected, clearing session");
                self.clear_session()?;
                Ok(None)
            }
        }
    }

    /// Signs out of the identity provider and drops the session state.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StorefrontError> {
        self.clear_session()?;
        self.provider.sign_out().await?;
        Ok(())
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.read().ok().and_then(|guard| guard.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.api.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.profile().is_some()
    }

    /// Fetches the JWT for `email`, persists it, and loads the profile. A
    /// profile failure clears the freshly stored token before propagating.
    async fn establish(&self, email: &str) -> Result<UserProfile, StorefrontError> {
        let token = self.api.get_token(email).await?;
        self.storage.set(TOKEN_KEY, &token)?;
        self.api.set_token(token);

        match self.api.me().await {
            Ok(profile) => {
                self.set_profile(Some(profile.clone()));
                info!(user = %profile.id, "session established");
                Ok(profile)
            }
            Err(err) => {
                self.clear_session()?;
                Err(err)
            }
        }
    }

    fn set_profile(&self, profile: Option<UserProfile>) {
        if let Ok(mut guard) = self.profile.write() {
            *guard = profile;
        }
    }

    fn clear_session(&self) -> Result<(), StorefrontError> {
        self.set_profile(None);
        self.api.clear_token();
        self.storage.remove(TOKEN_KEY)
    }
}
