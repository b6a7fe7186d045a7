//! Key commands: add, list, update, delete, decrypt.

use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use secrecy::ExposeSecret;

use keyholder_core::storage::{KeyFilter, KeyStore};
use keyholder_core::validation::validate_label;
use keyholder_core::{KeyService, KeyUpdate, KeyholderError};

use crate::app::AppContext;
use crate::cli::{AddArgs, DecryptArgs, DeleteArgs, ListArgs, UpdateArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_new_passphrase, prompt_passphrase, read_secret};
use crate::ui::{badge, hint, table, with_spinner, Badge};

fn format_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    validate_label(&args.label)?;
    let mut service = KeyService::new(ctx.open_store()?);
    if service.store().label_exists(&args.label)? {
        return Err(KeyholderError::AlreadyExists(format!("label \"{}\"", args.label)).into());
    }

    let secret = read_secret(args.secret.as_deref())?;
    let passphrase = prompt_new_passphrase()?;

    with_spinner(&ui, "Sealing secret", || {
        service.create(&args.label, &secret, &passphrase)
    })?;

    if !ctx.quiet() {
        println!(
            "{}",
            badge(&ui, Badge::Ok, &format!("Stored key \"{}\"", args.label))
        );
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json);
    let service = KeyService::new(ctx.open_store()?);

    let mut filter = KeyFilter::new();
    if let Some(ref text) = args.search {
        filter = filter.search(text);
    }
    if args.newest_first {
        filter = filter.newest_first();
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let keys = service.list(&filter)?;
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    if keys.is_empty() {
        if !ctx.quiet() {
            println!("{}", badge(&ui, Badge::Info, "No keys stored"));
            println!("{}", hint(&ui, "keyholder add <LABEL>"));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|key| {
            vec![
                key.label.clone(),
                format_time(&key.created_at),
                format_time(&key.updated_at),
            ]
        })
        .collect();
    println!("{}", table(&ui, &["LABEL", "CREATED", "UPDATED"], &rows));
    Ok(())
}

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    if args.rename.is_none() && args.secret.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to update.\nHint: Pass --rename NEW and/or --secret VALUE.",
        )
        .into());
    }

    let mut service = KeyService::new(ctx.open_store()?);
    if !service.store().label_exists(&args.label)? {
        return Err(KeyholderError::NotFound(format!("key \"{}\"", args.label)).into());
    }

    let passphrase = match args.secret {
        Some(_) => Some(prompt_new_passphrase()?),
        None => None,
    };
    let update = KeyUpdate {
        label: args.rename.as_deref(),
        secret: args.secret.as_deref(),
        passphrase: passphrase.as_ref().map(|p| p.as_str()),
    };

    let summary = with_spinner(&ui, "Re-sealing secret", || {
        service.update(&args.label, update)
    })?;

    if !ctx.quiet() {
        println!(
            "{}",
            badge(&ui, Badge::Ok, &format!("Updated key \"{}\"", summary.label))
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let mut service = KeyService::new(ctx.open_store()?);
    if !service.store().label_exists(&args.label)? {
        return Err(KeyholderError::NotFound(format!("key \"{}\"", args.label)).into());
    }

    if !args.force {
        if !ui.is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation.\nHint: Pass --force.",
            )
            .into());
        }
        let proceed = Confirm::new()
            .with_prompt(format!("Delete key \"{}\"?", args.label))
            .default(false)
            .interact()?;
        if !proceed {
            if !ctx.quiet() {
                println!("{}", badge(&ui, Badge::Warn, "Delete cancelled"));
            }
            return Ok(());
        }
    }

    service.delete(&args.label)?;
    if !ctx.quiet() {
        println!(
            "{}",
            badge(&ui, Badge::Ok, &format!("Deleted key \"{}\"", args.label))
        );
    }
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json);
    let service = KeyService::new(ctx.open_store()?);
    if !service.store().label_exists(&args.label)? {
        return Err(KeyholderError::NotFound(format!("key \"{}\"", args.label)).into());
    }

    let passphrase = prompt_passphrase()?;
    let secret = with_spinner(&ui, "Deriving key", || {
        service.decrypt(&args.label, &passphrase)
    })?;

    if ui.mode.is_json() {
        let value = serde_json::json!({
            "label": args.label,
            "secret": secret.expose_secret(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", secret.expose_secret());
    }
    Ok(())
}
