// ── View-state controllers ──
//
// One controller per screen. Each owns its observable state in `watch`
// channels and runs async commands against an injected `ShelterRepository`.

pub mod detail;
pub mod login;
pub mod map;
pub mod register;
pub(crate) mod scope;

pub use detail::{DetailController, FieldEdit, SaveStatus};
pub use login::LoginController;
pub use map::{MapController, PanelState};
pub use register::RegisterController;

/// Tri-state screen status.
///
/// Every screen starts in `Loading`. A command moves it to `Success` or
/// `Error`; nothing moves it back except an explicit reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenState<T> {
    #[default]
    Loading,
    Success(T),
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The payload, when in `Success`.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The message, when in `Error`.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScreenState<U> {
        match self {
            Self::Loading => ScreenState::Loading,
            Self::Success(value) => ScreenState::Success(f(value)),
            Self::Error(message) => ScreenState::Error(message),
        }
    }
}

impl<T, E> From<Result<T, E>> for ScreenState<T>
where
    E: Into<crate::CoreError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e.into().user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn default_is_loading() {
        assert!(ScreenState::<()>::default().is_loading());
    }

    #[test]
    fn result_conversion_keeps_server_message() {
        let state: ScreenState<u8> = Err::<u8, _>(CoreError::Server {
            status: 400,
            message: "Phone already registered".into(),
        })
        .into();
        assert_eq!(state.error(), Some("Phone already registered"));
    }

    #[test]
    fn map_only_touches_success() {
        assert_eq!(ScreenState::Success(2).map(|n| n * 2), ScreenState::Success(4));
        assert_eq!(
            ScreenState::<u8>::Error("x".into()).map(|n| n * 2),
            ScreenState::Error("x".into())
        );
    }
}
