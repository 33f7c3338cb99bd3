// ── Command cancellation scope ──
//
// One root token per controller; one child token per in-flight command
// kind. Starting a command cancels the previous command of the same kind.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::trace;

pub(crate) struct CommandScope<K> {
    root: CancellationToken,
    active: Mutex<HashMap<K, CancellationToken>>,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> CommandScope<K> {
    pub(crate) fn new() -> Self {
        Self {
            root: CancellationToken::new(),
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Start a command of `kind`, superseding any outstanding one.
    pub(crate) fn begin(&self, kind: K) -> CancellationToken {
        let token = self.root.child_token();
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = active.insert(kind, token.clone()) {
            if !previous.is_cancelled() {
                trace!(?kind, "superseding in-flight command");
            }
            previous.cancel();
        }
        token
    }

    pub(crate) fn cancel_all(&self) {
        self.root.cancel();
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.root.is_cancelled()
    }
}

/// Drive `fut` unless `token` is cancelled first.
///
/// `None` means the command was cancelled and must not touch state.
pub(crate) async fn run<F, T>(token: &CancellationToken, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        out = fut => (!token.is_cancelled()).then_some(out),
    }
}

impl<K> Drop for CommandScope<K> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
