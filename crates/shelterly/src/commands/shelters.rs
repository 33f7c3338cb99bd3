//! Shelter command handlers.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use tabled::Tabled;

use shelterly_core::{
    Address, DetailController, FieldEdit, MapController, Repository, Shelter, ShelterRepository,
};

use crate::cli::{EditArgs, GlobalOpts, SheltersArgs, SheltersCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ShelterTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Photo")]
    photo: &'static str,
}

impl From<&Shelter> for ShelterTableRow {
    fn from(s: &Shelter) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            phone: s.phone_number.clone(),
            category: s.category.label(),
            location: format!("{:.5}, {:.5}", s.address.latitude, s.address.longitude),
            photo: if s.has_photo() { "yes" } else { "" },
        }
    }
}

fn detail_view(s: &Shelter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", s.id);
    let _ = writeln!(out, "Name:      {}", s.name);
    let _ = writeln!(out, "Phone:     {}", s.phone_number);
    let _ = writeln!(out, "Category:  {}", s.category.label());
    let _ = writeln!(
        out,
        "Location:  {:.5}, {:.5}",
        s.address.latitude, s.address.longitude
    );
    let photo = if s.has_photo() { s.photo_url.as_str() } else { "-" };
    let _ = write!(out, "Photo:     {photo}");
    out
}

fn print_list(shelters: &[Shelter], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        shelters,
        |s| ShelterTableRow::from(s),
        |s| s.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_one(shelter: &Shelter, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, shelter, detail_view, |s| s.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: SheltersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SheltersCommand::List { offline } => {
            let shelters = if offline {
                ctx.repo.cached_shelters()?
            } else {
                let map = MapController::new(Arc::clone(&ctx.repo));
                map.load().await;
                util::settled(map.shelters())?.to_vec()
            };
            print_list(&shelters, global)
        }

        SheltersCommand::Find { name } => {
            let map = MapController::new(Arc::clone(&ctx.repo));
            map.load().await;
            util::settled(map.shelters())?;
            let selected = map.select_by_name(&name);
            if selected.is_empty() {
                return Err(CliError::NotFound { identifier: name });
            }
            print_list(&selected, global)
        }

        SheltersCommand::Get { id } => {
            let detail = load_detail(ctx, &id).await;
            print_one(&util::settled(detail.state())?, global)
        }

        SheltersCommand::Edit(args) => edit(ctx, args, global).await,

        SheltersCommand::Photo { id, file } => photo(ctx, &id, &file, global).await,
    }
}

async fn load_detail(ctx: &Context, id: &str) -> DetailController<Repository> {
    let detail = DetailController::new(Arc::clone(&ctx.repo));
    detail.load(id).await;
    detail
}

fn require_login(ctx: &Context) -> Result<(), CliError> {
    if ctx.repo.current_session()?.is_none() {
        return Err(CliError::NotLoggedIn {
            profile: ctx.profile.clone(),
        });
    }
    Ok(())
}

fn collect_edits(args: EditArgs) -> Result<Vec<FieldEdit>, CliError> {
    let mut edits = Vec::new();
    if let Some(name) = args.name {
        edits.push(FieldEdit::Name(name));
    }
    if let Some(phone) = args.phone {
        edits.push(FieldEdit::Phone(phone));
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        edits.push(FieldEdit::Address(Address::new(lat, lon)));
    }
    if let Some(category) = args.category {
        edits.push(FieldEdit::Category(category.into()));
    }
    if let Some(password) = args.password {
        let password = if password.is_empty() {
            util::prompt_password("New password")?
        } else {
            password
        };
        edits.push(FieldEdit::Password(password));
    }
    if edits.is_empty() {
        return Err(CliError::Validation {
            field: "edit".into(),
            reason: "nothing to change; pass at least one of --name, --phone, --lat/--lon, \
                     --category, --password"
                .into(),
        });
    }
    Ok(edits)
}

async fn edit(ctx: &Context, args: EditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    require_login(ctx)?;
    let id = args.id.clone();
    let edits = collect_edits(args)?;

    let detail = load_detail(ctx, &id).await;
    util::settled(detail.state())?;
    for edit in edits {
        detail.edit(edit);
    }

    let spinner = util::spinner(global, "Saving...");
    let saved = detail.save().await;
    spinner.finish_and_clear();
    saved?;

    output::status(global, "Shelter updated");
    print_one(&util::settled(detail.state())?, global)
}

async fn photo(ctx: &Context, id: &str, file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    require_login(ctx)?;
    let image = tokio::fs::read(file).await?;
    if !image.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Err(CliError::Validation {
            field: "file".into(),
            reason: format!("{} is not a JPEG image", file.display()),
        });
    }

    let detail = load_detail(ctx, id).await;
    util::settled(detail.state())?;

    let spinner = util::spinner(global, "Uploading...");
    let uploaded = detail.attach_photo(image).await;
    let saved = match uploaded {
        Ok(()) => detail.save().await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();
    saved?;

    let shelter = util::settled(detail.state())?;
    output::status(global, &format!("Photo uploaded as {}", shelter.photo_url));
    Ok(())
}
