// ── Login screen ──

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::debug;

use super::ScreenState;
use super::scope::{self, CommandScope};
use crate::error::CoreError;
use crate::model::Session;
use crate::repository::ShelterRepository;
use crate::stream::StateStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Command {
    Submit,
}

/// Drives the login screen: `Loading → Success(Session) | Error(message)`.
pub struct LoginController<R> {
    inner: Arc<LoginInner<R>>,
}

struct LoginInner<R> {
    repo: Arc<R>,
    state: watch::Sender<ScreenState<Session>>,
    scope: CommandScope<Command>,
}

impl<R> Clone for LoginController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ShelterRepository> LoginController<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let (state, _) = watch::channel(ScreenState::Loading);
        Self {
            inner: Arc::new(LoginInner {
                repo,
                state,
                scope: CommandScope::new(),
            }),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On success the session is already persisted when the state flips to
    /// `Success`. Rejections carry the server's message verbatim.
    pub async fn submit(&self, user: &str, password: SecretString) {
        let token = self.inner.scope.begin(Command::Submit);
        debug!(user, "submitting login");

        let Some(result) = scope::run(&token, self.inner.repo.login(user, &password)).await else {
            debug!("login superseded or disposed");
            return;
        };
        self.inner.state.send_replace(result.into());
    }

    /// Back to `Loading`, dropping any in-flight submit.
    pub fn reset(&self) {
        self.inner.scope.begin(Command::Submit);
        self.inner.state.send_replace(ScreenState::Loading);
    }

    /// Forget the stored session and reset the screen.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.inner.repo.logout()?;
        self.reset();
        Ok(())
    }

    pub fn state(&self) -> ScreenState<Session> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Session>> {
        self.inner.state.subscribe()
    }

    pub fn changes(&self) -> StateStream<ScreenState<Session>> {
        StateStream::new(self.subscribe())
    }

    /// Cancel everything outstanding; later commands become no-ops.
    pub fn dispose(&self) {
        self.inner.scope.cancel_all();
    }
}
