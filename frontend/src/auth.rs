//! The session guard run at the start of every protected page.

use crate::{
    api::{ApiClient, Transport},
    models::UserInfo,
    navigation,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    /// The page may be used. The user is unknown if the probe failed for a
    /// reason other than a missing session.
    Authenticated(Option<UserInfo>),
    /// The server rejected the session.
    Unauthorized,
}

/// Ask the server who is logged in.
///
/// Only a 401 counts as logged out. Any other failure is logged and the page
/// carries on without knowing the user.
pub async fn check_session<T: Transport>(client: &ApiClient<T>) -> SessionCheck {
    match client.user_info().await {
        Ok(user) => SessionCheck::Authenticated(Some(user)),
        Err(error) if error.is_unauthorized() => SessionCheck::Unauthorized,
        Err(error) => {
            tracing::warn!("could not check the session, continuing anyway: {error}");
            SessionCheck::Authenticated(None)
        }
    }
}

/// Check the session and send the browser to the login page if there is none.
///
/// Returns `None` after redirecting: the caller must stop initialising the
/// page. Otherwise returns the user, if known.
pub async fn require_auth<T: Transport>(client: &ApiClient<T>) -> Option<Option<UserInfo>> {
    match check_session(client).await {
        SessionCheck::Authenticated(user) => Some(user),
        SessionCheck::Unauthorized => {
            navigation::redirect_to_login();
            None
        }
    }
}

/// Log out on the server if possible, then go to the login page regardless.
pub async fn logout<T: Transport>(client: &ApiClient<T>) {
    if let Err(error) = client.logout().await {
        tracing::warn!("logout request failed: {error}");
    }
    navigation::redirect_to_login();
}
