// ── Registration screen ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::ScreenState;
use super::scope::{self, CommandScope};
use crate::error::CoreError;
use crate::model::NewShelter;
use crate::repository::ShelterRepository;
use crate::stream::StateStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Command {
    Submit,
}

/// Drives the sign-up screen: `Loading → Success(()) | Error(message)`.
pub struct RegisterController<R> {
    inner: Arc<RegisterInner<R>>,
}

struct RegisterInner<R> {
    repo: Arc<R>,
    state: watch::Sender<ScreenState<()>>,
    scope: CommandScope<Command>,
}

impl<R> Clone for RegisterController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Local checks run before anything is sent.
pub fn validate(shelter: &NewShelter) -> Result<(), CoreError> {
    let required = [
        ("name", &shelter.name),
        ("password", &shelter.password),
        ("phone number", &shelter.phone_number),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                field: field.into(),
                reason: "must not be empty".into(),
            });
        }
    }
    Ok(())
}

impl<R: ShelterRepository> RegisterController<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let (state, _) = watch::channel(ScreenState::Loading);
        Self {
            inner: Arc::new(RegisterInner {
                repo,
                state,
                scope: CommandScope::new(),
            }),
        }
    }

    /// Validate and submit a new shelter.
    pub async fn submit(&self, shelter: NewShelter) {
        let token = self.inner.scope.begin(Command::Submit);
        if let Err(e) = validate(&shelter) {
            if !token.is_cancelled() {
                self.inner.state.send_replace(ScreenState::Error(e.user_message()));
            }
            return;
        }
        debug!(name = %shelter.name, "registering shelter");

        let Some(result) = scope::run(&token, self.inner.repo.register(shelter)).await else {
            return;
        };
        self.inner.state.send_replace(result.into());
    }

    /// Back to `Loading`, dropping any in-flight submit.
    pub fn reset(&self) {
        self.inner.scope.begin(Command::Submit);
        self.inner.state.send_replace(ScreenState::Loading);
    }

    pub fn state(&self) -> ScreenState<()> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<()>> {
        self.inner.state.subscribe()
    }

    pub fn changes(&self) -> StateStream<ScreenState<()>> {
        StateStream::new(self.subscribe())
    }

    /// Cancel everything outstanding; later commands become no-ops.
    pub fn dispose(&self) {
        self.inner.scope.cancel_all();
    }
}
