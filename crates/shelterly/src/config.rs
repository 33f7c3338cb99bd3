//! CLI configuration: thin wrapper around `shelterly_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --insecure, --timeout, --output).

use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use tracing::warn;

use shelterly_core::{ClientConfig, Repository, SessionStore, TlsVerification};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use shelterly_config::{
    Config, FileShelterCache, Profile, TokenStoreKind, config_path, load_config_or_default,
    open_session_store, profile_to_client_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate the active profile + global flags into a `ClientConfig`.
///
/// Flag overrides take priority over profile values. Without a profile,
/// `--server` alone is enough.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<ClientConfig, CliError> {
    let mut profile = match (config.profile(Some(profile_name)), &global.server) {
        (Ok((_, profile)), _) => profile.clone(),
        (Err(_), Some(server)) => Profile::new(server.clone()),
        (Err(_), None) if config.profiles.is_empty() => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
        (Err(e), None) => return Err(e.into()),
    };
    if let Some(server) = &global.server {
        profile.server.clone_from(server);
    }

    let mut client = profile_to_client_config(&profile, &config.defaults)?;
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    Ok(client)
}

/// Settle the effective output format: `--output` / `SHELTERLY_OUTPUT`
/// first, then `defaults.output` from the config file.
pub fn apply_output_default(global: &mut GlobalOpts, config: &Config) {
    global.output = match &global.output_flag {
        Some(format) => format.clone(),
        None => OutputFormat::from_str(&config.defaults.output, true).unwrap_or_else(|_| {
            warn!(value = %config.defaults.output, "unknown defaults.output, using table");
            OutputFormat::Table
        }),
    };
}

/// The session store for the active profile.
///
/// Flag-only invocations (no profile on disk) use the keyring under the
/// profile name, like a default profile would.
pub fn session_store(config: &Config, profile_name: &str) -> SessionStore {
    match config.profiles.get(profile_name) {
        Some(profile) => open_session_store(profile, profile_name),
        None => open_session_store(&Profile::new(String::new()), profile_name),
    }
}

/// Everything a server-bound command needs.
pub struct Context {
    pub repo: Arc<Repository>,
    pub profile: String,
}

pub fn build_context(global: &GlobalOpts) -> Result<Context, CliError> {
    let config = load_config_or_default();
    let profile = active_profile_name(global, &config);
    let client = resolve_client_config(global, &config, &profile)?;
    tracing::debug!(profile = %profile, url = %client.url, "resolved client config");

    let repo = Repository::from_config(&client, session_store(&config, &profile))?
        .with_cache(Arc::new(FileShelterCache::for_profile(&profile)));
    Ok(Context {
        repo: Arc::new(repo),
        profile,
    })
}
