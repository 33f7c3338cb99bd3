//! Registration command handler.

use std::sync::Arc;

use shelterly_core::{Address, NewShelter, RegisterController};

use crate::cli::{GlobalOpts, RegisterArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(ctx: &Context, args: RegisterArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => {
            let first = util::prompt_password("Password")?;
            let again = util::prompt_password("Repeat password")?;
            if first != again {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "passwords do not match".into(),
                });
            }
            first
        }
    };

    let shelter = NewShelter {
        name: args.name,
        password,
        phone_number: args.phone,
        address: Address::new(args.lat, args.lon),
        category: args.category.into(),
        photo_url: args.photo_url,
    };

    let controller = RegisterController::new(Arc::clone(&ctx.repo));
    let spinner = util::spinner(global, "Registering...");
    controller.submit(shelter).await;
    spinner.finish_and_clear();
    util::settled(controller.state())?;

    output::status(global, "Shelter registered. Log in with: shelterly login");
    Ok(())
}
