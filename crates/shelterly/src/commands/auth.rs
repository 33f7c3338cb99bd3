//! Session command handlers: login, logout, whoami.

use std::sync::Arc;

use secrecy::SecretString;
use serde::Serialize;

use shelterly_core::{LoginController, ScreenState, ShelterRepository};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct WhoAmI<'a> {
    profile: &'a str,
    shelter_id: &'a str,
}

pub async fn login(ctx: &Context, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let user = match args.user {
        Some(user) => user,
        None => util::prompt_text("User")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => util::prompt_password("Password")?,
    };

    let controller = LoginController::new(Arc::clone(&ctx.repo));
    let spinner = util::spinner(global, "Logging in...");
    controller.submit(&user, SecretString::from(password)).await;
    spinner.finish_and_clear();

    match controller.state() {
        ScreenState::Success(session) => {
            output::status(
                global,
                &format!("Logged in as shelter {}", session.shelter_id),
            );
            Ok(())
        }
        ScreenState::Error(message) => Err(CliError::AuthFailed { message }),
        ScreenState::Loading => Err(CliError::Internal("login did not complete".into())),
    }
}

pub fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    LoginController::new(Arc::clone(&ctx.repo)).logout()?;
    output::status(global, "Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let session = ctx
        .repo
        .current_session()?
        .ok_or_else(|| CliError::NotLoggedIn {
            profile: ctx.profile.clone(),
        })?;
    let me = WhoAmI {
        profile: &ctx.profile,
        shelter_id: &session.shelter_id,
    };
    let out = output::render_single(
        &global.output,
        &me,
        |m| format!("Shelter {} (profile {})", m.shelter_id, m.profile),
        |m| m.shelter_id.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
