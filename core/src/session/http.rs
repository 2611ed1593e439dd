//! Session source backed by the platform's REST auth API.
//!
//! * `GET  {base}/auth/session` with a bearer token returns the session.
//! * `POST {base}/auth/login` exchanges credentials for a token.
//! * `POST {base}/auth/logout` revokes the token.

use std::time::Duration;

use async_trait::async_trait;
use eagle_common::access::{Credentials, Session};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::{SessionError, SessionSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

pub struct HttpSessionSource {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpSessionSource {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, SessionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
        })
    }

    /// The bearer token currently held, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/{path}", self.base_url)
    }

    async fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn get_session(&self) -> Result<Session, SessionError> {
        if self.token.read().await.is_none() {
            return Ok(Session::anonymous());
        }

        let request = self.authorised(self.client.get(self.endpoint("session"))).await;
        let response = request.send().await?;

        match response.status() {
            // expired or revoked token
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("auth service rejected token, treating caller as anonymous");
                Ok(Session::anonymous())
            }
            status if status.is_success() => decode(response).await,
            status => Err(SessionError::Status(status.as_u16())),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), SessionError> {
        let response = self
            .client
            .post(self.endpoint("login"))
            .json(credentials)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SessionError::LoginRejected(
                format!("credentials for {} were not accepted", credentials.email),
            )),
            status if status.is_success() => {
                let LoginResponse { token } = decode(response).await?;
                *self.token.write().await = Some(token);
                Ok(())
            }
            status => Err(SessionError::Status(status.as_u16())),
        }
    }

    async fn logout(&self) -> Result<(), SessionError> {
        if self.token.read().await.is_none() {
            return Ok(());
        }

        let request = self.authorised(self.client.post(self.endpoint("logout"))).await;
        let result = request.send().await;
        *self.token.write().await = None;

        let response = result?;
        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(SessionError::Status(status.as_u16()))
        }
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, SessionError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SessionError::Payload(e.to_string()))
}
