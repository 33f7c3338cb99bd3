// shelterly-api: Async Rust client for the shelter marketplace HTTP API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::Credentials;
pub use client::{NO_TOKEN_MESSAGE, ShelterClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{AddressDto, NewShelterDto, ShelterDto, ShelterTypeDto, SignInResponse};
