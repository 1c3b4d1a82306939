//! Session Store
//!
//! Caches the signed-in `User` in a storage slot. Signing in or up is split
//! into `begin` and `finish` around `AuthRequest::complete`, so a reactive
//! caller can await the endpoint without holding the store borrowed.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::identity::{AuthFlow, IdentityApi, IdentityResponse};
use crate::models::User;
use crate::storage::KeyValueStorage;

/// Reject blank emails before anything reaches the endpoint
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    Ok(())
}

/// A started sign-in or sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub flow: AuthFlow,
    pub email: String,
}

impl AuthRequest {
    pub async fn send<A: IdentityApi + ?Sized>(&self, api: &A) -> AppResult<IdentityResponse> {
        match self.flow {
            AuthFlow::SignIn => api.login(&self.email).await,
            AuthFlow::SignUp => api.register(&self.email).await,
        }
    }

    /// Call the endpoint and hand the outcome to `finish`, which is expected
    /// to reach `SessionStore::finish`
    pub async fn complete<A, F>(self, api: &A, finish: F)
    where
        A: IdentityApi + ?Sized,
        F: FnOnce(AuthRequest, AppResult<IdentityResponse>),
    {
        let outcome = self.send(api).await;
        finish(self, outcome);
    }
}

pub struct SessionStore<S> {
    storage: S,
    key: String,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Pick up the user left in storage. An unreadable value is removed and
    /// the session starts signed out.
    pub fn restore(storage: S, config: &AppConfig) -> Self {
        let key = config.user_storage_key.clone();
        let user = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    let err = AppError::CorruptedState {
                        key: key.clone(),
                        message: e.to_string(),
                    };
                    log::error!("Clearing stored session: {}", err);
                    if let Err(e) = storage.remove(&key) {
                        log::warn!("Could not clear {}: {}", key, e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("Could not read session: {}", e);
                None
            }
        };
        if let Some(user) = &user {
            log::info!("restored session for {}", user.email);
        }

        Self {
            storage,
            key,
            user,
            loading: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the email and mark a request in flight. A second request
    /// while one is pending is allowed.
    pub fn begin(&mut self, flow: AuthFlow, email: &str) -> AppResult<AuthRequest> {
        validate_email(email)?;
        self.loading = true;
        self.error = None;
        Ok(AuthRequest {
            flow,
            email: email.to_string(),
        })
    }

    /// Apply the endpoint's outcome. Failures leave the current user as is
    /// and keep the message for display.
    pub fn finish(&mut self, request: AuthRequest, outcome: AppResult<IdentityResponse>) {
        self.loading = false;
        match outcome {
            Ok(response) => {
                let user = User {
                    id: response.user_id(request.flow),
                    email: request.email,
                };
                log::info!("{:?} succeeded for {}", request.flow, user.email);
                self.persist(&user);
                self.user = Some(user);
            }
            Err(e) => {
                log::warn!("{:?} failed: {}", request.flow, e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("signed out {}", user.email);
        }
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("Could not clear {}: {}", self.key, e);
        }
    }

    fn persist(&self, user: &User) {
        let written = serde_json::to_string(user)
            .map_err(|e| AppError::Storage(e.to_string()))
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = written {
            log::warn!("Session kept in memory only: {}", e);
        }
    }
}
