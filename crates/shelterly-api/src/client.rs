// Hand-crafted async HTTP client for the shelter marketplace API.
//
// Public endpoints: auth/signin, auth/signup, shelters, shelters/{id}
// Bearer-authenticated: PUT shelters/{id}, POST shelters/{id}/photo

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{Credentials, bearer_headers};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{NewShelterDto, ShelterDto, SignInRequest, SignInResponse};

/// Message used when sign-in yields no usable token.
pub const NO_TOKEN_MESSAGE: &str = "No token found";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pull a human-readable message out of an error body.
///
/// Prefers `{"message": …}`, then `{"error": …}`, then the raw text.
fn extract_message(raw: &str) -> Option<String> {
    if let Ok(body) = serde_json::from_str::<ErrorResponse>(raw) {
        if let Some(msg) = body.message.or(body.error) {
            return Some(msg);
        }
    }
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the shelter API.
///
/// Stateless apart from the connection pool: the bearer token is passed
/// per call, so the caller decides where tokens live.
#[derive(Debug, Clone)]
pub struct ShelterClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShelterClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins append
    /// instead of replacing the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are validated in the constructor; this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Exchange credentials for a `[token, shelterId]` pair.
    ///
    /// A 401/403, or a 2xx carrying an empty token, is reported as
    /// [`Error::Authentication`] with the server's message when present.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, Error> {
        let url = self.url(&["auth", "signin"]);
        debug!("POST {url}");

        let body = SignInRequest {
            user: &credentials.user,
            password: credentials.password.expose_secret(),
        };
        let resp = self.http.post(url).json(&body).send().await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let raw = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: extract_message(&raw).unwrap_or_else(|| NO_TOKEN_MESSAGE.into()),
            });
        }

        let grant: SignInResponse = Self::handle_response(resp).await?;
        if grant.token().is_empty() {
            return Err(Error::Authentication {
                message: NO_TOKEN_MESSAGE.into(),
            });
        }
        debug!(shelter_id = grant.shelter_id(), "sign-in successful");
        Ok(grant)
    }

    /// Register a new shelter. The response body (empty or a record) is ignored.
    pub async fn sign_up(&self, shelter: &NewShelterDto) -> Result<(), Error> {
        let url = self.url(&["auth", "signup"]);
        debug!("POST {url}");

        let resp = self.http.post(url).json(shelter).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Shelters ─────────────────────────────────────────────────────

    pub async fn list_shelters(&self) -> Result<Vec<ShelterDto>, Error> {
        self.get(&["shelters"]).await
    }

    pub async fn get_shelter(&self, id: &str) -> Result<ShelterDto, Error> {
        self.get(&["shelters", id]).await
    }

    /// Replace a shelter record. Requires a bearer token.
    pub async fn update_shelter(
        &self,
        id: &str,
        shelter: &ShelterDto,
        token: &SecretString,
    ) -> Result<ShelterDto, Error> {
        self.put_authenticated(&["shelters", id], shelter, token)
            .await
    }

    /// Upload a shelter photo as multipart form data (field `photo`).
    pub async fn upload_photo(
        &self,
        id: &str,
        image: Vec<u8>,
        file_name: &str,
        token: &SecretString,
    ) -> Result<(), Error> {
        let url = self.url(&["shelters", id, "photo"]);
        debug!(bytes = image.len(), "POST {url}");

        let part = Part::bytes(image)
            .file_name(file_name.to_owned())
            .mime_str("image/jpeg")?;
        let form = Form::new().part("photo", part);

        let resp = self
            .http
            .post(url)
            .headers(bearer_headers(token)?)
            .multipart(form)
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn put_authenticated<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
        token: &SecretString,
    ) -> Result<T, Error> {
        let url = self.url(segments);
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .headers(bearer_headers(token)?)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::NOT_FOUND => Error::NotFound {
                path: resp.url().path().to_owned(),
            },
            _ => {
                let raw = resp.text().await.unwrap_or_default();
                Error::Api {
                    status: status.as_u16(),
                    message: extract_message(&raw).unwrap_or_else(|| status.to_string()),
                }
            }
        }
    }
}
