//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Select;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, TokenStoreArg};
use crate::config::{self, Config, Profile, TokenStoreKind};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<TokenStoreArg> for TokenStoreKind {
    fn from(arg: TokenStoreArg) -> Self {
        match arg {
            TokenStoreArg::Keyring => Self::Keyring,
            TokenStoreArg::File => Self::File,
            TokenStoreArg::Memory => Self::Memory,
        }
    }
}

fn prompt_token_store() -> Result<TokenStoreKind, CliError> {
    let choices = &[
        "System keyring (recommended)",
        "File in the user data directory",
        "Nowhere (log in every run)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the session token be kept?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(match selection {
        1 => TokenStoreKind::File,
        2 => TokenStoreKind::Memory,
        _ => TokenStoreKind::Keyring,
    })
}

fn init(
    global: &GlobalOpts,
    server: Option<String>,
    token_store: Option<TokenStoreArg>,
) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);
    let interactive = std::io::stdin().is_terminal();

    if cfg.profiles.contains_key(&name)
        && !util::confirm(&format!("Profile '{name}' exists. Overwrite?"), global.yes || !interactive)?
    {
        return Ok(());
    }

    let server = match server.or_else(|| global.server.clone()) {
        Some(server) => server,
        None => util::prompt_text("API base URL")?,
    };
    let token_store = match token_store {
        Some(arg) => arg.into(),
        None if interactive => prompt_token_store()?,
        None => TokenStoreKind::default(),
    };

    let mut profile = Profile::new(server);
    profile.token_store = token_store;
    if global.insecure {
        profile.insecure = Some(true);
    }
    // Reject a bad URL before writing anything.
    config::profile_to_client_config(&profile, &cfg.defaults)?;

    cfg.profiles.insert(name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(name.clone());
    }
    config::save_config(&cfg)?;
    output::status(
        global,
        &format!("Profile '{name}' saved to {}", config::config_path().display()),
    );
    Ok(())
}

fn show(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = toml::to_string_pretty(cfg)
        .map_err(|e| CliError::Internal(format!("TOML serialization failed: {e}")))?;
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            server,
            token_store,
        } => init(global, server, token_store),

        ConfigCommand::Show => show(&config::load_config_or_default(), global),

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: format!(
                        "'{name}' not found (available: {})",
                        if available.is_empty() {
                            "none".to_owned()
                        } else {
                            available.join(", ")
                        }
                    ),
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::status(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}
