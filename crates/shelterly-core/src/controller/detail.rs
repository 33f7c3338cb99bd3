// ── Shelter detail screen ──
//
// Loads one shelter, applies local field edits, and pushes the edited
// shelter back. Edits are pure transforms over the `Success` payload.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ScreenState;
use super::scope::{self, CommandScope};
use crate::error::CoreError;
use crate::model::{Address, Shelter, ShelterCategory};
use crate::repository::ShelterRepository;
use crate::stream::StateStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Command {
    Load,
    Save,
    Upload,
}

// ── FieldEdit ────────────────────────────────────────────────────

/// A single-field change to the loaded shelter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Password(String),
    Phone(String),
    Address(Address),
    Category(ShelterCategory),
    /// Only takes effect while the shelter has no photo.
    Photo(String),
}

impl FieldEdit {
    /// The shelter with this edit applied. `id` is never touched.
    pub fn apply(self, shelter: &Shelter) -> Shelter {
        let mut next = shelter.clone();
        match self {
            Self::Name(name) => next.name = name,
            Self::Password(password) => next.password = password,
            Self::Phone(phone) => next.phone_number = phone,
            Self::Address(address) => next.address = address,
            Self::Category(category) => next.category = category,
            Self::Photo(photo) => {
                if !next.has_photo() {
                    next.photo_url = photo;
                }
            }
        }
        next
    }
}

// ── SaveStatus ───────────────────────────────────────────────────

/// Outcome of the most recent `save()`; independent of the screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

// ── DetailController ─────────────────────────────────────────────

/// Drives the shelter detail screen.
pub struct DetailController<R> {
    inner: Arc<DetailInner<R>>,
}

struct DetailInner<R> {
    repo: Arc<R>,
    state: watch::Sender<ScreenState<Shelter>>,
    save_status: watch::Sender<SaveStatus>,
    scope: CommandScope<Command>,
}

impl<R> Clone for DetailController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ShelterRepository> DetailController<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let (state, _) = watch::channel(ScreenState::Loading);
        let (save_status, _) = watch::channel(SaveStatus::Idle);
        Self {
            inner: Arc::new(DetailInner {
                repo,
                state,
                save_status,
                scope: CommandScope::new(),
            }),
        }
    }

    /// Fetch the shelter with `id`.
    pub async fn load(&self, id: &str) {
        let token = self.inner.scope.begin(Command::Load);
        debug!(shelter_id = id, "loading shelter");

        let Some(result) = scope::run(&token, self.inner.repo.get_shelter(id)).await else {
            return;
        };
        let next = match result {
            Ok(shelter) => ScreenState::Success(shelter),
            Err(CoreError::NotFound { .. }) => {
                ScreenState::Error(format!("No shelter found with id: {id}"))
            }
            Err(e) => ScreenState::Error(e.user_message()),
        };
        self.inner.state.send_replace(next);
    }

    /// Apply `edit` to the loaded shelter.
    ///
    /// Returns whether the state changed. Outside `Success` this is a no-op.
    pub fn edit(&self, edit: FieldEdit) -> bool {
        self.inner.state.send_if_modified(|state| {
            let ScreenState::Success(shelter) = state else {
                return false;
            };
            let next = edit.apply(shelter);
            if next == *shelter {
                return false;
            }
            *shelter = next;
            true
        })
    }

    /// Push the edited shelter to the server.
    ///
    /// The screen state is left as is; the outcome is published on
    /// [`save_status`](Self::save_status).
    pub async fn save(&self) -> Result<(), CoreError> {
        let shelter = self.loaded("save")?;
        let token = self.inner.scope.begin(Command::Save);
        if token.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        self.inner.save_status.send_replace(SaveStatus::Saving);

        let id = shelter.id.clone();
        let Some(result) =
            scope::run(&token, self.inner.repo.update_shelter(&id, shelter)).await
        else {
            // A superseding save owns the status; only disposal clears it.
            if self.inner.scope.is_disposed() {
                self.inner.save_status.send_replace(SaveStatus::Idle);
            }
            return Err(CoreError::Cancelled);
        };

        match result {
            Ok(()) => {
                self.inner.save_status.send_replace(SaveStatus::Saved);
                Ok(())
            }
            Err(e) => {
                warn!(shelter_id = %id, error = %e, "save failed");
                self.inner
                    .save_status
                    .send_replace(SaveStatus::Failed(e.user_message()));
                Err(e)
            }
        }
    }

    /// Give the shelter a generated photo reference (if it has none) and
    /// upload `image` under the shelter's photo reference.
    pub async fn attach_photo(&self, image: Vec<u8>) -> Result<(), CoreError> {
        self.loaded("attach a photo")?;
        self.edit(FieldEdit::Photo(format!("{}.jpg", Uuid::new_v4())));
        let shelter = self.loaded("attach a photo")?;

        let file_name = shelter
            .photo_url
            .rsplit('/')
            .next()
            .unwrap_or(shelter.photo_url.as_str())
            .to_owned();
        let token = self.inner.scope.begin(Command::Upload);
        debug!(shelter_id = %shelter.id, %file_name, bytes = image.len(), "uploading photo");

        scope::run(
            &token,
            self.inner.repo.upload_photo(&shelter.id, image, &file_name),
        )
        .await
        .ok_or(CoreError::Cancelled)?
    }

    pub fn state(&self) -> ScreenState<Shelter> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Shelter>> {
        self.inner.state.subscribe()
    }

    pub fn changes(&self) -> StateStream<ScreenState<Shelter>> {
        StateStream::new(self.subscribe())
    }

    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.inner.save_status.subscribe()
    }

    /// Cancel everything outstanding; later commands become no-ops.
    pub fn dispose(&self) {
        self.inner.scope.cancel_all();
    }

    fn loaded(&self, action: &str) -> Result<Shelter, CoreError> {
        self.inner
            .state
            .borrow()
            .success()
            .cloned()
            .ok_or_else(|| CoreError::InvalidState {
                message: format!("no shelter loaded to {action}"),
            })
    }
}
