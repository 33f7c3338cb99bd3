// ── Repository ──
//
// The single facade the controllers depend on. Sequences remote calls,
// applies the DTO→domain mapping, and owns the session store (so it is
// the only component that reads or writes the bearer token).

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use shelterly_api::{Credentials, ShelterClient, ShelterDto};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{NewShelter, Session, Shelter, ShelterRow};
use crate::store::{SessionStore, ShelterCache};

/// Operations the view-state controllers need from the data layer.
///
/// Every method is a single-shot async result. Implemented by
/// [`Repository`] over HTTP, and by fixture doubles in tests.
pub trait ShelterRepository: Send + Sync + 'static {
    /// Fetch every shelter.
    fn list_shelters(&self) -> impl Future<Output = Result<Vec<Shelter>, CoreError>> + Send;

    /// Fetch one shelter; [`CoreError::NotFound`] on a lookup miss.
    fn get_shelter(&self, id: &str) -> impl Future<Output = Result<Shelter, CoreError>> + Send;

    /// Exchange credentials for a session and persist it before returning.
    fn login(
        &self,
        user: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    /// Submit a new shelter.
    fn register(&self, shelter: NewShelter) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Push an edited shelter back to the server (authenticated).
    fn update_shelter(
        &self,
        id: &str,
        shelter: Shelter,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Upload a photo for a shelter (authenticated).
    fn upload_photo(
        &self,
        id: &str,
        image: Vec<u8>,
        file_name: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// The persisted session, if any.
    fn current_session(&self) -> Result<Option<Session>, CoreError>;

    /// Forget the persisted session.
    fn logout(&self) -> Result<(), CoreError>;
}

/// HTTP-backed repository.
pub struct Repository {
    client: ShelterClient,
    session: SessionStore,
    cache: Option<Arc<dyn ShelterCache>>,
}

impl Repository {
    pub fn new(client: ShelterClient, session: SessionStore) -> Self {
        Self {
            client,
            session,
            cache: None,
        }
    }

    /// Build the HTTP client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, CoreError> {
        let client = ShelterClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::new(client, session))
    }

    /// Write every successful shelter listing through to `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn ShelterCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The last shelter list written to the cache (empty without a cache).
    pub fn cached_shelters(&self) -> Result<Vec<Shelter>, CoreError> {
        let Some(cache) = &self.cache else {
            return Ok(Vec::new());
        };
        cache.load()?.into_iter().map(Shelter::try_from).collect()
    }

    fn require_token(&self) -> Result<SecretString, CoreError> {
        self.session.token()?.ok_or(CoreError::NotAuthenticated)
    }

    /// Translate a failed authenticated call. A rejected token is dropped
    /// from the store so the next command starts anonymous.
    fn authenticated_failure(&self, err: shelterly_api::Error) -> CoreError {
        if err.is_auth_error() {
            warn!("stored session was rejected by the server; clearing it");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "failed to clear rejected session");
            }
        }
        err.into()
    }
}

impl ShelterRepository for Repository {
    async fn list_shelters(&self) -> Result<Vec<Shelter>, CoreError> {
        let shelters: Vec<Shelter> = self
            .client
            .list_shelters()
            .await?
            .into_iter()
            .map(Shelter::from)
            .collect();
        debug!(count = shelters.len(), "fetched shelters");

        if let Some(cache) = &self.cache {
            let rows: Vec<ShelterRow> = shelters.iter().map(ShelterRow::from).collect();
            if let Err(e) = cache.replace(&rows) {
                warn!(error = %e, "failed to update shelter cache (non-fatal)");
            }
        }
        Ok(shelters)
    }

    async fn get_shelter(&self, id: &str) -> Result<Shelter, CoreError> {
        match self.client.get_shelter(id).await {
            Ok(dto) => Ok(dto.into()),
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                identifier: id.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, user: &str, password: &SecretString) -> Result<Session, CoreError> {
        let credentials = Credentials::new(user, password.clone());
        let grant = self.client.sign_in(&credentials).await?;

        let session = Session::new(grant.token(), grant.shelter_id());
        self.session.save(&session)?;
        info!(shelter_id = %session.shelter_id, "logged in");
        Ok(session)
    }

    async fn register(&self, shelter: NewShelter) -> Result<(), CoreError> {
        self.client.sign_up(&shelter.into()).await?;
        info!("shelter registered");
        Ok(())
    }

    async fn update_shelter(&self, id: &str, shelter: Shelter) -> Result<(), CoreError> {
        let token = self.require_token()?;
        let dto = ShelterDto::from(shelter);
        match self.client.update_shelter(id, &dto, &token).await {
            Ok(_) => {
                debug!(shelter_id = id, "shelter updated");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                identifier: id.to_owned(),
            }),
            Err(e) => Err(self.authenticated_failure(e)),
        }
    }

    async fn upload_photo(&self, id: &str, image: Vec<u8>, file_name: &str) -> Result<(), CoreError> {
        let token = self.require_token()?;
        self.client
            .upload_photo(id, image, file_name, &token)
            .await
            .map_err(|e| self.authenticated_failure(e))?;
        debug!(shelter_id = id, file_name, "photo uploaded");
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>, CoreError> {
        self.session.session()
    }

    fn logout(&self) -> Result<(), CoreError> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }
}
