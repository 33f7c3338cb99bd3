//! Domain layer between `shelterly-api` and UI consumers (CLI, app shells).
//!
//! - **[`Repository`]**: single facade over the remote shelter API. Maps wire
//!   DTOs into the [`model`] types, persists the session on login, and
//!   attaches the bearer token to authenticated calls. Controllers depend on
//!   the [`ShelterRepository`] trait so tests can substitute a fixture double.
//!
//! - **[`SessionStore`]**: typed view over an injected [`KeyValueStore`]
//!   holding the `TOKEN` and `SHELTER_ID` entries. No global instance.
//!
//! - **Controllers** ([`controller`]): one per screen (login, detail, map,
//!   registration). Each publishes a [`ScreenState`] through `tokio::sync::watch`
//!   and runs its async commands inside a cancellation scope, so a superseded
//!   or disposed command never writes state.
//!
//! - **[`StateStream<T>`]**: subscription handle over a controller signal,
//!   with `current()` / `latest()` / `changed()` and a `Stream` adapter.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use controller::{
    DetailController, FieldEdit, LoginController, MapController, PanelState, RegisterController,
    SaveStatus, ScreenState,
};
pub use error::CoreError;
pub use model::{Address, NewShelter, Session, Shelter, ShelterCategory, ShelterRow};
pub use repository::{Repository, ShelterRepository};
pub use store::{
    KeyValueStore, MemoryCache, MemoryStore, SHELTER_ID_KEY, SessionStore, ShelterCache, TOKEN_KEY,
};
pub use stream::StateStream;
