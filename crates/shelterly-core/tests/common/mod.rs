// Fixture repository shared by the controller tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use shelterly_core::{
    Address, CoreError, NewShelter, Session, SessionStore, Shelter, ShelterCategory,
    ShelterRepository,
};

pub const VALID_USER: &str = "validUser";
pub const VALID_PASSWORD: &str = "validPassword";
pub const TAKEN_NAME: &str = "Already Here";

/// In-memory `ShelterRepository` with canned scenarios.
///
/// Every call first sleeps for the next queued delay (if any), which lets
/// tests interleave commands deterministically under paused time.
pub struct FakeRepository {
    pub session: SessionStore,
    shelters: Vec<Shelter>,
    delays: Mutex<VecDeque<Duration>>,
    pub updates: Mutex<Vec<Shelter>>,
    pub uploads: Mutex<Vec<(String, usize, String)>>,
    pub registered: Mutex<Vec<NewShelter>>,
}

impl Default for FakeRepository {
    fn default() -> Self {
        Self {
            session: SessionStore::in_memory(),
            shelters: fixture_shelters(),
            delays: Mutex::new(VecDeque::new()),
            updates: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
        }
    }
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that already holds a stored session.
    pub fn logged_in() -> Self {
        let repo = Self::default();
        repo.session.save(&Session::new("token", "id")).unwrap();
        repo
    }

    /// Queue per-call delays, consumed in call order.
    pub fn with_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.delays.lock().unwrap().extend(delays);
        self
    }

    async fn pause(&self) {
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn require_token(&self) -> Result<SecretString, CoreError> {
        self.session.token()?.ok_or(CoreError::NotAuthenticated)
    }
}

impl ShelterRepository for FakeRepository {
    async fn list_shelters(&self) -> Result<Vec<Shelter>, CoreError> {
        self.pause().await;
        Ok(self.shelters.clone())
    }

    async fn get_shelter(&self, id: &str) -> Result<Shelter, CoreError> {
        self.pause().await;
        self.shelters
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                identifier: id.to_owned(),
            })
    }

    async fn login(&self, user: &str, password: &SecretString) -> Result<Session, CoreError> {
        self.pause().await;
        if user == VALID_USER && password.expose_secret() == VALID_PASSWORD {
            let session = Session::new("token", "id");
            self.session.save(&session)?;
            Ok(session)
        } else {
            Err(CoreError::AuthenticationFailed {
                message: "No token found".into(),
            })
        }
    }

    async fn register(&self, shelter: NewShelter) -> Result<(), CoreError> {
        self.pause().await;
        if shelter.name == TAKEN_NAME {
            return Err(CoreError::Server {
                status: 409,
                message: "Shelter already exists".into(),
            });
        }
        self.registered.lock().unwrap().push(shelter);
        Ok(())
    }

    async fn update_shelter(&self, id: &str, shelter: Shelter) -> Result<(), CoreError> {
        self.pause().await;
        self.require_token()?;
        if !self.shelters.iter().any(|s| s.id == id) {
            return Err(CoreError::NotFound {
                identifier: id.to_owned(),
            });
        }
        self.updates.lock().unwrap().push(shelter);
        Ok(())
    }

    async fn upload_photo(&self, id: &str, image: Vec<u8>, file_name: &str) -> Result<(), CoreError> {
        self.require_token()?;
        self.pause().await;
        self.uploads
            .lock()
            .unwrap()
            .push((id.to_owned(), image.len(), file_name.to_owned()));
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>, CoreError> {
        self.session.session()
    }

    fn logout(&self) -> Result<(), CoreError> {
        self.session.clear()
    }
}

fn shelter(id: &str, name: &str, category: ShelterCategory, photo_url: &str) -> Shelter {
    Shelter {
        id: id.into(),
        name: name.into(),
        password: "password".into(),
        phone_number: "630838080".into(),
        address: Address::new(40.4168, -3.7038),
        category,
        photo_url: photo_url.into(),
    }
}

/// Nine shelters; `id` is the canonical detail fixture and exactly one is named `Fran`.
pub fn fixture_shelters() -> Vec<Shelter> {
    vec![
        shelter("id", "name", ShelterCategory::ShelterPoint, ""),
        shelter("2", "Fran", ShelterCategory::Individual, ""),
        shelter("3", "Huellas", ShelterCategory::LocalGovernment, ""),
        shelter("4", "Patitas", ShelterCategory::Veterinary, "https://cdn.example.org/4.jpg"),
        shelter("5", "Bigotes", ShelterCategory::RetailPartner, ""),
        shelter("6", "Frana", ShelterCategory::Individual, ""),
        shelter("7", "fran", ShelterCategory::ShelterPoint, ""),
        shelter("8", "Colitas", ShelterCategory::LocalGovernment, ""),
        shelter("9", "Refugio Sur", ShelterCategory::Veterinary, ""),
    ]
}
