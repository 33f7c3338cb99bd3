// ── Shelter map / list screen ──

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;

use super::ScreenState;
use super::scope::{self, CommandScope};
use crate::error::CoreError;
use crate::model::Shelter;
use crate::repository::ShelterRepository;
use crate::stream::StateStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Command {
    Load,
}

/// Bottom panel of the map screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Drives the map screen: the full shelter list, the current selection,
/// the panel flag, and whether location access was granted.
pub struct MapController<R> {
    inner: Arc<MapInner<R>>,
}

struct MapInner<R> {
    repo: Arc<R>,
    shelters: watch::Sender<ScreenState<Arc<Vec<Shelter>>>>,
    selection: watch::Sender<Arc<Vec<Shelter>>>,
    panel: watch::Sender<PanelState>,
    location_permission: watch::Sender<bool>,
    scope: CommandScope<Command>,
}

impl<R> Clone for MapController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ShelterRepository> MapController<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let (shelters, _) = watch::channel(ScreenState::Loading);
        let (selection, _) = watch::channel(Arc::new(Vec::new()));
        let (panel, _) = watch::channel(PanelState::default());
        let (location_permission, _) = watch::channel(false);
        Self {
            inner: Arc::new(MapInner {
                repo,
                shelters,
                selection,
                panel,
                location_permission,
                scope: CommandScope::new(),
            }),
        }
    }

    /// Construct and start the initial load in the background.
    ///
    /// Fails with [`CoreError::InvalidState`] outside a tokio runtime.
    pub fn spawn(repo: Arc<R>) -> Result<Self, CoreError> {
        let runtime = Handle::try_current().map_err(|e| CoreError::InvalidState {
            message: format!("cannot start the shelter list load: {e}"),
        })?;
        let controller = Self::new(repo);
        let background = controller.clone();
        runtime.spawn(async move { background.load().await });
        Ok(controller)
    }

    /// Fetch the full shelter list.
    pub async fn load(&self) {
        let token = self.inner.scope.begin(Command::Load);
        let Some(result) = scope::run(&token, self.inner.repo.list_shelters()).await else {
            return;
        };
        if let Ok(list) = &result {
            debug!(count = list.len(), "shelter list loaded");
        }
        self.inner
            .shelters
            .send_replace(ScreenState::from(result.map(Arc::new)));
    }

    /// Select every loaded shelter whose name equals `name` exactly.
    ///
    /// Returns the new selection; empty when nothing matches or the list
    /// has not loaded.
    pub fn select_by_name(&self, name: &str) -> Arc<Vec<Shelter>> {
        let matches: Vec<Shelter> = self
            .inner
            .shelters
            .borrow()
            .success()
            .map(|list| list.iter().filter(|s| s.name == name).cloned().collect())
            .unwrap_or_default();
        let matches = Arc::new(matches);
        self.inner.selection.send_replace(Arc::clone(&matches));
        matches
    }

    /// Flip the panel between collapsed and expanded.
    pub fn toggle(&self) -> PanelState {
        let mut next = PanelState::default();
        self.inner.panel.send_modify(|panel| {
            *panel = panel.toggled();
            next = *panel;
        });
        next
    }

    pub fn set_location_permission(&self, granted: bool) {
        self.inner.location_permission.send_replace(granted);
    }

    pub fn shelters(&self) -> ScreenState<Arc<Vec<Shelter>>> {
        self.inner.shelters.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Arc<Vec<Shelter>>>> {
        self.inner.shelters.subscribe()
    }

    pub fn changes(&self) -> StateStream<ScreenState<Arc<Vec<Shelter>>>> {
        StateStream::new(self.subscribe())
    }

    pub fn selection(&self) -> watch::Receiver<Arc<Vec<Shelter>>> {
        self.inner.selection.subscribe()
    }

    pub fn panel(&self) -> watch::Receiver<PanelState> {
        self.inner.panel.subscribe()
    }

    pub fn location_permission(&self) -> watch::Receiver<bool> {
        self.inner.location_permission.subscribe()
    }

    /// Cancel everything outstanding; later commands become no-ops.
    pub fn dispose(&self) {
        self.inner.scope.cancel_all();
    }
}
