//! Keyholder CLI - passphrase-sealed secret storage
//!
//! This is the command-line interface for Keyholder. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use clap::Parser;
use keyholder_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{admin, init, keys, maintenance, misc};
use crate::errors::{exit_code_for, hint_for};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    logging::init(&ctx.log_level());

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui(false);
        print_error(&ui_ctx, &e.to_string(), hint_for(&e));
        std::process::exit(exit_code_for(&e));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Add(args)) => keys::handle_add(ctx, args),
        Some(Commands::List(args)) => keys::handle_list(ctx, args),
        Some(Commands::Update(args)) => keys::handle_update(ctx, args),
        Some(Commands::Delete(args)) => keys::handle_delete(ctx, args),
        Some(Commands::Decrypt(args)) => keys::handle_decrypt(ctx, args),
        Some(Commands::Admin(args)) => admin::handle_admin(ctx, &args.command),
        Some(Commands::Check) => maintenance::handle_check(ctx),
        Some(Commands::Completions(args)) => misc::handle_completions(args),
        None => {
            println!("Keyholder v{}", VERSION);
            println!("\nQuickstart:");
            println!("  keyholder init");
            println!("  keyholder add github-token");
            println!("  keyholder list");
            println!("  keyholder decrypt github-token");
            println!("\nRun `keyholder --help` for full usage.");
            Ok(())
        }
    }
}
