//! Scoped provider session.
//!
//! A [`Session`] holds the provider exclusively from a successful login until
//! it is dropped. Logout runs exactly once on every exit path: explicit
//! [`close`](Session::close), early return, `?` propagation or unwinding.

use tracing::{debug, error, info, warn};

use crate::query::{self, QueryOutcome, RemoteQuery};
use crate::remote::RemoteProvider;
use crate::SourceError;

/// Lifecycle of a provider session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Closed,
}

/// Logged-in handle over a [`RemoteProvider`].
///
/// The handle borrows the provider mutably, so a second session on the same
/// provider cannot be opened while this one is alive.
pub struct Session<'a, P: RemoteProvider + ?Sized> {
    provider: &'a mut P,
    state: SessionState,
}

impl<'a, P: RemoteProvider + ?Sized> Session<'a, P> {
    /// Log in. A failed login is fatal and never yields a session.
    pub fn open(provider: &'a mut P) -> Result<Self, SourceError> {
        debug!("attempting provider login");

        let status = provider.login().map_err(|fault| {
            error!(%fault, "provider login faulted");
            SourceError::login_failure(format!("provider login failed: {fault}"))
        })?;

        if !status.is_ok() {
            error!(code = %status.code, message = %status.message, "provider login rejected");
            return Err(SourceError::login_failure(format!(
                "provider login failed: {status}"
            )));
        }

        info!("provider session established");
        Ok(Self {
            provider,
            state: SessionState::Active,
        })
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Run one query through the adapter.
    pub fn execute(&mut self, query: &RemoteQuery) -> QueryOutcome {
        query::execute(&mut *self.provider, query)
    }

    /// Log out now instead of at drop.
    pub fn close(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;

        debug!("attempting provider logout");
        match self.provider.logout() {
            Ok(status) if status.is_ok() => info!("provider session closed"),
            Ok(status) => {
                warn!(code = %status.code, message = %status.message, "provider logout rejected")
            }
            Err(fault) => warn!(%fault, "provider logout faulted"),
        }
    }
}

impl<P: RemoteProvider + ?Sized> Drop for Session<'_, P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Run `body` inside one provider session.
///
/// A login failure is returned without invoking `body`. Logout errors are
/// logged and never replace `body`'s result.
pub fn with_session<P, T, F>(provider: &mut P, body: F) -> Result<T, SourceError>
where
    P: RemoteProvider + ?Sized,
    F: FnOnce(&mut Session<'_, P>) -> Result<T, SourceError>,
{
    let mut session = Session::open(provider)?;
    let outcome = body(&mut session);
    session.close();
    outcome
}
