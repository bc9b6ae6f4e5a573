//! Sign-in state.
//!
//! [`AuthSession`] ties the API client to the token store. It is the only
//! writer of the token: login and signup save it, logout clears it, and a
//! 401 from `/auth/me` clears it as well. No other endpoint's 401 is
//! treated specially.

use ps_types::{LoginRequest, ProfileUpdate, SignupRequest, User};
use thiserror::Error;

use crate::api::{ApiError, ParliaScopeApi};
use crate::token::{TokenStore, TokenStoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated { token: String, user: User },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] TokenStoreError),

    #[error("not signed in")]
    NotAuthenticated,
}

impl SessionError {
    /// Text suitable for showing to the user as-is.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Store(err) => err.to_string(),
            Self::NotAuthenticated => "Please sign in first.".to_string(),
        }
    }
}

pub struct AuthSession<A, S> {
    api: A,
    store: S,
    state: AuthState,
}

impl<A, S> AuthSession<A, S>
where
    A: ParliaScopeApi,
    S: TokenStore,
{
    /// Start signed out; call [`Self::restore`] to pick up a stored token.
    pub const fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            state: AuthState::Unauthenticated,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { token, .. } => Some(token),
            AuthState::Unauthenticated => None,
        }
    }

    pub const fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated { user, .. } => Some(user),
            AuthState::Unauthenticated => None,
        }
    }

    /// The token, or `NotAuthenticated`.
    ///
    /// # Errors
    /// `SessionError::NotAuthenticated` when signed out.
    pub fn require_token(&self) -> Result<&str, SessionError> {
        self.token().ok_or(SessionError::NotAuthenticated)
    }

    /// Re-read the stored token and confirm it with `/auth/me`.
    ///
    /// # Errors
    /// Store failures, and API failures other than 401. On any error the
    /// stored token is left untouched.
    pub async fn restore(&mut self) -> Result<&AuthState, SessionError> {
        match self.store.load().await? {
            Some(token) => self.fetch_profile(token).await?,
            None => self.state = AuthState::Unauthenticated,
        }
        Ok(&self.state)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    /// Rejected credentials surface as `ApiError::Http` with the server's
    /// detail; the session and store are unchanged in that case.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, SessionError> {
        let response = self.api.login(&LoginRequest::new(email, password)).await?;
        tracing::info!(email, "signed in");
        self.adopt_token(response.access_token).await
    }

    /// Create an account and sign in with the token the backend returns.
    ///
    /// # Errors
    /// Same as [`Self::login`].
    pub async fn signup(&mut self, request: &SignupRequest) -> Result<&User, SessionError> {
        let response = self.api.signup(request).await?;
        tracing::info!(email = %request.email, "account created");
        self.adopt_token(response.access_token).await
    }

    /// Forget the token locally. The backend keeps no session to revoke.
    ///
    /// # Errors
    /// Store failures.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear().await?;
        self.state = AuthState::Unauthenticated;
        tracing::info!("signed out");
        Ok(())
    }

    /// Patch the profile and replace the cached user with the result.
    ///
    /// # Errors
    /// `NotAuthenticated` when signed out, otherwise API failures.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<&User, SessionError> {
        let token = self.require_token()?.to_string();
        let user = self.api.update_profile(&token, update).await?;
        self.state = AuthState::Authenticated { token, user };
        self.current_user()
    }

    async fn adopt_token(&mut self, token: String) -> Result<&User, SessionError> {
        self.store.save(&token).await?;
        self.fetch_profile(token).await?;
        self.current_user()
    }

    async fn fetch_profile(&mut self, token: String) -> Result<(), SessionError> {
        match self.api.me(&token).await {
            Ok(user) => {
                self.state = AuthState::Authenticated { token, user };
                Ok(())
            }
            Err(err) if err.is_unauthorized() => {
                tracing::warn!("stored token rejected by /auth/me, signing out");
                self.logout().await
            }
            Err(err) => Err(err.into()),
        }
    }

    fn current_user(&self) -> Result<&User, SessionError> {
        self.user().ok_or(SessionError::NotAuthenticated)
    }
}
