//! Password sign-in against the backend's auth endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pawfect_core::traits::{Identity, IdentityProvider};

use crate::error::AuthError;
use crate::rest::DEFAULT_TIMEOUT_SECS;

/// Identity provider backed by `{base_url}/auth/v1`.
pub struct RestAuth {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpData<'a>,
}

#[derive(Serialize)]
struct SignUpData<'a> {
    full_name: &'a str,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Session returned by sign-in. Sign-up returns either a session or,
/// when email confirmation is pending, the bare user.
#[derive(Deserialize)]
struct SessionResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestAuth {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/{path}", self.base_url))
            .header("apikey", &self.api_key)
            .header(
                "Authorization",
                format!("Bearer {}", bearer.unwrap_or(&self.api_key)),
            )
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    AuthError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<AuthErrorBody>(&body)
            .ok()
            .and_then(|b| b.error_description.or(b.msg).or(b.message))
            .unwrap_or_else(|| body.trim().to_string());
        if status == 400 || status == 401 || status == 422 {
            return Err(AuthError::InvalidCredentials(message));
        }
        Err(AuthError::Rejected { status, message })
    }

    fn identity_from(session: SessionResponse, email: &str) -> Result<Identity, AuthError> {
        let (id, label) = match session.user {
            Some(user) => (user.id, user.email),
            None => match session.id {
                Some(id) => (id, session.email),
                None => {
                    return Err(AuthError::MalformedResponse(
                        "response carries no user id".into(),
                    ))
                }
            },
        };

        let mut identity = Identity::new(&id, label.as_deref().unwrap_or(email));
        identity.access_token = session.access_token;
        Ok(identity)
    }
}

#[async_trait]
impl IdentityProvider for RestAuth {
    #[instrument(skip_all, fields(grant = "password"))]
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<Identity> {
        let response = self
            .post(
                "token?grant_type=password",
                &Credentials { email, password },
                None,
            )
            .await?;
        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let identity = Self::identity_from(session, email)?;
        tracing::info!(user = %identity.id, "signed in");
        Ok(identity)
    }

    #[instrument(skip_all)]
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> anyhow::Result<Identity> {
        let request = SignUpRequest {
            email,
            password,
            data: SignUpData { full_name },
        };
        let response = self.post("signup", &request, None).await?;
        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let identity = Self::identity_from(session, email)?;
        if identity.access_token.is_none() {
            tracing::info!(user = %identity.id, "account created, confirmation pending");
        }
        Ok(identity)
    }

    #[instrument(skip_all, fields(user = %identity.id))]
    async fn sign_out(&self, identity: &Identity) -> anyhow::Result<()> {
        let Some(token) = identity.access_token.as_deref() else {
            return Ok(());
        };
        self.post("logout", &serde_json::json!({}), Some(token))
            .await?;
        Ok(())
    }
}
