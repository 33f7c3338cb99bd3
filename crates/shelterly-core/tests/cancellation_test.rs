//! Superseded and disposed commands never write state.
#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use common::{FakeRepository, VALID_PASSWORD, VALID_USER};
use shelterly_core::{
    CoreError, DetailController, LoginController, MapController, SaveStatus, ScreenState,
    ShelterRepository,
};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[tokio::test(start_paused = true)]
async fn newer_load_wins_over_slower_older_load() {
    let repo = FakeRepository::new().with_delays([secs(10), secs(1)]);
    let detail = DetailController::new(Arc::new(repo));

    tokio::join!(detail.load("nope"), detail.load("id"));

    assert_eq!(detail.state().success().unwrap().id, "id");
}

#[tokio::test(start_paused = true)]
async fn dispose_drops_in_flight_load() {
    let repo = FakeRepository::new().with_delays([secs(5)]);
    let map = MapController::new(Arc::new(repo));

    tokio::join!(map.load(), async { map.dispose() });

    assert_eq!(map.shelters(), ScreenState::Loading);
}

#[tokio::test(start_paused = true)]
async fn commands_after_dispose_are_no_ops() {
    let repo = Arc::new(FakeRepository::new());
    let login = LoginController::new(Arc::clone(&repo));

    login.dispose();
    login
        .submit(VALID_USER, SecretString::from(VALID_PASSWORD.to_owned()))
        .await;

    assert_eq!(login.state(), ScreenState::Loading);
    assert_eq!(repo.current_session().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_pending_login() {
    let repo = Arc::new(FakeRepository::new().with_delays([secs(5)]));
    let login = LoginController::new(Arc::clone(&repo));

    tokio::join!(
        login.submit(VALID_USER, SecretString::from(VALID_PASSWORD.to_owned())),
        async { login.reset() },
    );

    assert_eq!(login.state(), ScreenState::Loading);
    assert_eq!(repo.current_session().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn different_command_kinds_do_not_cancel_each_other() {
    let repo = Arc::new(FakeRepository::logged_in().with_delays([secs(1)]));
    let detail = DetailController::new(Arc::clone(&repo));
    detail.load("id").await;

    let (saved, ()) = tokio::join!(detail.save(), detail.load("id"));

    saved.unwrap();
    assert_eq!(repo.updates.lock().unwrap().len(), 1);
    assert!(detail.state().success().is_some());
}

#[tokio::test(start_paused = true)]
async fn dispose_during_save_clears_save_status() {
    let repo = Arc::new(FakeRepository::logged_in().with_delays([secs(0), secs(5)]));
    let detail = DetailController::new(Arc::clone(&repo));
    detail.load("id").await;
    let status = detail.save_status();

    let (saved, ()) = tokio::join!(detail.save(), async { detail.dispose() });

    assert!(matches!(saved, Err(CoreError::Cancelled)));
    assert_eq!(*status.borrow(), SaveStatus::Idle);
    assert!(repo.updates.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn save_after_dispose_never_reports_saving() {
    let repo = Arc::new(FakeRepository::logged_in());
    let detail = DetailController::new(Arc::clone(&repo));
    detail.load("id").await;
    let status = detail.save_status();

    detail.dispose();
    let saved = detail.save().await;

    assert!(matches!(saved, Err(CoreError::Cancelled)));
    assert_eq!(*status.borrow(), SaveStatus::Idle);
    assert!(!status.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn superseded_save_leaves_status_to_newer_save() {
    let repo = Arc::new(FakeRepository::logged_in().with_delays([secs(0), secs(5), secs(1)]));
    let detail = DetailController::new(Arc::clone(&repo));
    detail.load("id").await;

    let (first, second) = tokio::join!(detail.save(), detail.save());

    assert!(matches!(first, Err(CoreError::Cancelled)));
    second.unwrap();
    assert_eq!(*detail.save_status().borrow(), SaveStatus::Saved);
    assert_eq!(repo.updates.lock().unwrap().len(), 1);
}
