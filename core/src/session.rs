//! In-memory authentication session.
//!
//! The session is either empty or holds a non-empty bearer token. Once set,
//! the token lives until the owning value is dropped; there is no logout,
//! expiry, or refresh.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::Credentials;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Log in and store the returned token.
    ///
    /// On failure the session is left exactly as it was.
    pub fn login<T: Transport>(
        &mut self,
        client: &ApiClient,
        transport: &T,
        credentials: &Credentials,
    ) -> Result<String, ApiError> {
        let request = client.build_login(credentials)?;
        tracing::debug!("logging in");
        let token = client.parse_login(transport.execute(request)?)?;
        self.token = Some(token.clone());
        tracing::info!("session established");
        Ok(token)
    }

    /// Register the account, then log in with the same credentials.
    pub fn signup<T: Transport>(
        &mut self,
        client: &ApiClient,
        transport: &T,
        credentials: &Credentials,
    ) -> Result<String, ApiError> {
        let request = client.build_signup(credentials)?;
        tracing::debug!("signing up");
        client.parse_signup(transport.execute(request)?)?;
        self.login(client, transport, credentials)
    }
}
