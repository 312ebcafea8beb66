use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    error::AuthError,
    storage::{AUTH_TOKEN_KEY, EMAIL_KEY, Storage},
};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_api: String,
}

impl AuthClient {
    pub fn new(base_api: impl Into<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_api: base_api.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_api.trim_end_matches('/'), path)
    }

    #[instrument(name = "login", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.request_token("login", email, password).await
    }

    #[instrument(name = "signup", skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.request_token("signup", email, password).await
    }

    async fn request_token(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        let res = self
            .client
            .post(self.url(path))
            .json(&Credentials { email, password })
            .send()
            .await?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AuthError::InvalidCredentials);
            }
            s if !s.is_success() => return Err(AuthError::Status(s)),
            _ => {}
        }

        let body: TokenResponse = res.json().await?;
        match body.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => {
                warn!("auth: success response without token");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    #[instrument(name = "update_password", skip(self, token, new_password))]
    pub async fn update_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<String, AuthError> {
        let res = self
            .client
            .post(self.url("api/user/update-password"))
            .bearer_auth(token)
            .json(&Credentials {
                email,
                password: new_password,
            })
            .send()
            .await?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AuthError::MissingToken);
            }
            s if !s.is_success() => return Err(AuthError::Status(s)),
            _ => {}
        }

        let body: MessageResponse = res.json().await?;
        Ok(body.message)
    }
}

/// The logged-in user's token and email, kept in durable storage.
pub struct AuthSession {
    client: AuthClient,
    storage: Arc<dyn Storage>,
}

impl AuthSession {
    pub fn new(client: AuthClient, storage: Arc<dyn Storage>) -> Self {
        Self { client, storage }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let token = self.client.login(email, password).await?;
        self.save(email, &token)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let token = self.client.signup(email, password).await?;
        self.save(email, &token)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        self.storage.remove(EMAIL_KEY)?;
        info!("auth: logged out");
        Ok(())
    }

    pub fn token(&self) -> Result<String, AuthError> {
        self.storage
            .get(AUTH_TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)
    }

    pub fn email(&self) -> Result<String, AuthError> {
        self.storage
            .get(EMAIL_KEY)?
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::MissingToken)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_ok() && self.email().is_ok()
    }

    pub async fn update_password(&self, new_password: &str) -> Result<String, AuthError> {
        let email = self.email()?;
        let token = self.token()?;
        self.client
            .update_password(&email, &token, new_password)
            .await
    }

    fn save(&self, email: &str, token: &str) -> Result<(), AuthError> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        self.storage.set(EMAIL_KEY, email)?;
        info!(email, "auth: session saved");
        Ok(())
    }
}
