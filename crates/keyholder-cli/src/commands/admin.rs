//! `keyholder admin`: provision, remove and verify the admin account.

use keyholder_core::admin::{provision_admin, remove_admin, verify_admin, Provisioned, Removed};

use crate::app::AppContext;
use crate::cli::AdminSubcommand;
use crate::errors::CliError;
use crate::helpers::prompt_admin_password;
use crate::ui::{badge, Badge};

pub fn handle_admin(ctx: &AppContext, command: &AdminSubcommand) -> anyhow::Result<()> {
    match command {
        AdminSubcommand::Init => handle_init(ctx),
        AdminSubcommand::Delete => handle_delete(ctx),
        AdminSubcommand::Verify => handle_verify(ctx),
    }
}

fn handle_init(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let mut store = ctx.open_store()?;
    let password = prompt_admin_password(true)?;

    let (kind, message) = match provision_admin(&mut store, &password)? {
        Provisioned::Created => (Badge::Ok, "Admin user created"),
        Provisioned::AlreadyExists => (Badge::Info, "Admin user already exists"),
    };
    if !ctx.quiet() {
        println!("{}", badge(&ui, kind, message));
    }
    Ok(())
}

fn handle_delete(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let mut store = ctx.open_store()?;

    let (kind, message) = match remove_admin(&mut store)? {
        Removed::Deleted => (Badge::Ok, "Admin user deleted"),
        Removed::Missing => (Badge::Info, "No admin user to delete"),
    };
    if !ctx.quiet() {
        println!("{}", badge(&ui, kind, message));
    }
    Ok(())
}

fn handle_verify(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.open_store()?;
    let password = prompt_admin_password(false)?;

    if !verify_admin(&store, &password)? {
        return Err(CliError::auth_failed("Admin password is incorrect").into());
    }
    if !ctx.quiet() {
        println!("{}", badge(&ui, Badge::Ok, "Admin password verified"));
    }
    Ok(())
}
