// ── Domain model ──
//
// Canonical types shared by the repository, controllers, and front ends.
// Wire shapes live in `shelterly_api::types`; `crate::convert` bridges them.

pub mod session;
pub mod shelter;

pub use session::Session;
pub use shelter::{Address, NewShelter, Shelter, ShelterCategory, ShelterRow};
