//! Command dispatch for server-bound subcommands.

pub mod auth;
pub mod config_cmd;
pub mod register;
pub mod shelters;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;

pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(ctx, args, global).await,
        Command::Logout => auth::logout(ctx, global),
        Command::Whoami => auth::whoami(ctx, global),
        Command::Shelters(args) => shelters::handle(ctx, args, global).await,
        Command::Register(args) => register::handle(ctx, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions commands are handled before dispatch".into(),
        )),
    }
}
