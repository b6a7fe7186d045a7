use keyholder_core::KeyholderError;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::{badge, hint, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.open_store()?;

    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("{}", badge(&ui, Badge::Ok, "Integrity check passed"));
                println!("- sqlite pages: OK");
                println!("- sealed value headers: OK");
            }
            Ok(())
        }
        Err(err @ (KeyholderError::MalformedBlob(_) | KeyholderError::Storage(_))) => {
            eprintln!("{}", badge(&ui, Badge::Err, "Integrity check failed"));
            eprintln!("- error: {}", err);
            eprintln!("{}", hint(&ui, "Restore the database from a backup."));
            Err(CliError::IntegrityFailed(err.to_string()).into())
        }
        Err(err) => Err(err.into()),
    }
}
