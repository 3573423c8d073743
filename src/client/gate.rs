use tracing::{debug, warn};

use crate::auth::dto::PublicUser;
use crate::client::{
    api::{ApiClient, ClientError},
    session::{SessionStore, Tier},
};

/// Terminal states of one gate pass. The loading phase is the awaited future
/// itself; every path resolves it.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// Token verified; render the protected view for this user.
    Authenticated(PublicUser),
    /// No usable token; redirect to login, keeping the path that was asked
    /// for so the login flow can return there.
    Unauthenticated { return_to: String },
}

/// Result of a successful login: the signed-in user and where to navigate.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: PublicUser,
    pub redirect_to: String,
}

const DEFAULT_POST_LOGIN_PATH: &str = "/dashboard";

/// Decides, per load of a protected view, whether it renders or redirects.
pub struct SessionGate<'a> {
    api: &'a ApiClient,
}

impl<'a> SessionGate<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// One verification pass for a protected view at `requested_path`.
    ///
    /// Any failure — missing token, rejected token, transport error — clears
    /// both storage tiers so the next pass starts clean, and resolves to
    /// `Unauthenticated`.
    pub async fn resolve(&self, store: &mut SessionStore, requested_path: &str) -> GateState {
        let Some(token) = store.token() else {
            debug!("no stored token");
            return GateState::Unauthenticated {
                return_to: requested_path.to_string(),
            };
        };

        match self.api.verify(&token).await {
            Ok(response) => GateState::Authenticated(response.user),
            Err(e) => {
                warn!(error = %e, "token verification failed");
                if let Err(e) = store.clear_all() {
                    warn!(error = %e, "failed to clear session store");
                }
                GateState::Unauthenticated {
                    return_to: requested_path.to_string(),
                }
            }
        }
    }

    /// Login flow: calls the login endpoint and writes the token and user
    /// snapshot into exactly the tier selected by `remember_me`. `return_to`
    /// is a path saved by an earlier gate pass; the outcome reports where to
    /// navigate next.
    pub async fn login(
        &self,
        store: &mut SessionStore,
        email: &str,
        password: &str,
        remember_me: bool,
        return_to: Option<&str>,
    ) -> Result<LoginOutcome, ClientError> {
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::Api {
                status: 400,
                message: "Please fill in all required fields".into(),
            });
        }

        let response = self.api.login(email, password).await?;

        let tier = if remember_me {
            Tier::Durable
        } else {
            Tier::Ephemeral
        };
        let user = response.user.clone();
        store
            .set(tier, response.token, response.user)
            .map_err(ClientError::Storage)?;

        debug!(remember_me, "login stored session");
        Ok(LoginOutcome {
            user,
            redirect_to: return_to.unwrap_or(DEFAULT_POST_LOGIN_PATH).to_string(),
        })
    }

    /// Tells the server (a no-op for stateless tokens) and discards the
    /// stored session either way.
    pub async fn logout(&self, store: &mut SessionStore) -> Result<(), ClientError> {
        if let Some(token) = store.token() {
            if let Err(e) = self.api.logout(&token).await {
                warn!(error = %e, "logout call failed; clearing local session anyway");
            }
        }
        store.clear_all().map_err(ClientError::Storage)
    }
}
