//! `keyholder init`: write the config file and create the database.

use std::path::PathBuf;

use keyholder_core::SqliteStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_database_path, write_config, KeyholderConfig};
use crate::ui::{badge, kv, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let config_path = ctx.config_path()?.to_path_buf();
    let existing = ctx.config()?;

    let database_path = match (args.path.as_deref().or(ctx.database_flag()), existing) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(config)) => PathBuf::from(&config.database.path),
        (None, None) => default_database_path()?,
    };

    let config_written = match existing {
        Some(_) => false,
        None => {
            write_config(&config_path, &KeyholderConfig::new(&database_path))?;
            true
        }
    };

    let store = SqliteStore::open(&database_path)?;
    store.check_integrity()?;

    if !ctx.quiet() {
        if config_written {
            println!(
                "{}",
                badge(&ui, Badge::Ok, &format!("Wrote config {}", config_path.display()))
            );
        } else {
            println!(
                "{}",
                badge(
                    &ui,
                    Badge::Info,
                    &format!("Config already exists at {}", config_path.display())
                )
            );
        }
        println!("{}", kv(&ui, "Database", &database_path.display().to_string()));
    }
    Ok(())
}
