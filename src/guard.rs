//! Route-guard helpers shared by every protected view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views must redirect to the login view on mount and whenever
//! the session drops to anonymous, and must render nothing while anonymous
//! so protected content never flashes before the redirect lands.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::gateway::AuthState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// What a protected view should do for the given auth state.
#[must_use]
pub fn guard_decision(state: &AuthState) -> GuardDecision {
    if state.is_authenticated() { GuardDecision::Render } else { GuardDecision::Redirect(LOGIN_PATH) }
}

/// Run `render` only when a session is held; `None` means render nothing.
pub fn render_protected<T, F>(state: &AuthState, render: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    match guard_decision(state) {
        GuardDecision::Render => Some(render()),
        GuardDecision::Redirect(_) => None,
    }
}

/// Redirect to `/login` on mount when anonymous, then on every transition
/// from authenticated to anonymous.
///
/// The task ends when the gateway (the sender side) is dropped. Abort the
/// returned handle when the view unmounts.
pub fn install_unauth_redirect<F>(mut auth: watch::Receiver<AuthState>, navigate: F) -> JoinHandle<()>
where
    F: Fn(&str) + Send + 'static,
{
    tokio::spawn(async move {
        let mut was_authenticated = auth.borrow_and_update().is_authenticated();
        if !was_authenticated {
            navigate(LOGIN_PATH);
        }

        while auth.changed().await.is_ok() {
            let now_authenticated = auth.borrow_and_update().is_authenticated();
            if was_authenticated && !now_authenticated {
                tracing::debug!(path = LOGIN_PATH, "session ended; redirecting");
                navigate(LOGIN_PATH);
            }
            was_authenticated = now_authenticated;
        }
    })
}
