//! Identity Endpoint Client
//!
//! Mock sign-in/sign-up against a public test API. Nothing here is a real
//! credential check: the response only seeds the local `User` id.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Used when the response carries no usable id
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignIn,
    SignUp,
}

impl AuthFlow {
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthFlow::SignIn => "/login",
            AuthFlow::SignUp => "/register",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthFlow::SignIn => "Login",
            AuthFlow::SignUp => "Sign Up",
        }
    }
}

/// The fields of the endpoint's answer we care about, read leniently
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityResponse {
    pub token: Option<String>,
    pub id: Option<i64>,
}

/// Leading ASCII digits of a string, as an integer
fn numeric_prefix(raw: &str) -> Option<i64> {
    let digits: String = raw.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl IdentityResponse {
    pub fn from_json(value: &Value) -> Self {
        let token = match value.get("token") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let id = match value.get("id") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => numeric_prefix(s),
            _ => None,
        };
        Self { token, id }
    }

    fn token_id(&self) -> Option<i64> {
        self.token.as_deref().and_then(numeric_prefix)
    }

    /// Sign-in reads the token first, sign-up the id; either falls back to
    /// the other field and then to `DEFAULT_USER_ID`.
    pub fn user_id(&self, flow: AuthFlow) -> i64 {
        let found = match flow {
            AuthFlow::SignIn => self.token_id().or(self.id),
            AuthFlow::SignUp => self.id.or_else(|| self.token_id()),
        };
        found.unwrap_or(DEFAULT_USER_ID)
    }
}

#[async_trait(?Send)]
pub trait IdentityApi {
    async fn login(&self, email: &str) -> AppResult<IdentityResponse>;
    async fn register(&self, email: &str) -> AppResult<IdentityResponse>;
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// reqwest-backed client for the ReqRes test API
#[derive(Debug, Clone)]
pub struct ReqResClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl ReqResClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    async fn post(&self, flow: AuthFlow, email: &str) -> AppResult<IdentityResponse> {
        let url = self.config.endpoint(flow.endpoint());
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&CredentialsBody {
                email,
                password: &self.config.placeholder_password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let body: Value = response.json().await?;
        Ok(IdentityResponse::from_json(&body))
    }
}

#[async_trait(?Send)]
impl IdentityApi for ReqResClient {
    async fn login(&self, email: &str) -> AppResult<IdentityResponse> {
        self.post(AuthFlow::SignIn, email).await
    }

    async fn register(&self, email: &str) -> AppResult<IdentityResponse> {
        self.post(AuthFlow::SignUp, email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sign_in_reads_token_prefix() {
        let response = IdentityResponse::from_json(&json!({ "token": "42abc" }));
        assert_eq!(response.user_id(AuthFlow::SignIn), 42);
    }

    #[test]
    fn test_opaque_token_falls_back_to_default() {
        let response = IdentityResponse::from_json(&json!({ "token": "QpwL5tke4Pnpja7X4" }));
        assert_eq!(response.user_id(AuthFlow::SignIn), DEFAULT_USER_ID);
    }

    #[test]
    fn test_sign_up_reads_id() {
        let response = IdentityResponse::from_json(&json!({ "id": 4, "token": "QpwL5tke4Pnpja7X4" }));
        assert_eq!(response.user_id(AuthFlow::SignUp), 4);
        assert_eq!(response.user_id(AuthFlow::SignIn), 4);
    }

    #[test]
    fn test_non_conformant_response_uses_defaults() {
        let response = IdentityResponse::from_json(&json!({ "unexpected": true }));
        assert_eq!(response, IdentityResponse::default());
        assert_eq!(response.user_id(AuthFlow::SignUp), DEFAULT_USER_ID);

        let response = IdentityResponse::from_json(&json!(["not", "an", "object"]));
        assert_eq!(response.user_id(AuthFlow::SignIn), DEFAULT_USER_ID);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(AuthFlow::SignIn.endpoint(), "/login");
        assert_eq!(AuthFlow::SignUp.endpoint(), "/register");
    }
}
