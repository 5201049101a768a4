//! Sheetset CLI - typed datasets from spreadsheet-shaped files.

mod cli;
mod commands;
mod logger;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;
use sheetset::SheetsetError;

fn main() {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet));

    let ctx = Context {
        store: cli.store,
        config: cli.config,
        user: cli.user,
        strict_numbers: cli.strict_numbers,
    };

    let result = match cli.command {
        Commands::Ingest {
            source,
            range,
            json,
        } => commands::ingest::run(&ctx, source, range, json),

        Commands::List {
            start_after,
            limit,
            json,
        } => commands::list::run(&ctx, start_after, limit, json),

        Commands::Read { id, skip, limit } => commands::read::run(&ctx, id, skip, limit),

        Commands::Approve {
            id,
            file,
            name,
            columns,
            json,
        } => commands::approve::run(&ctx, id, file, name, columns, json),

        Commands::Archive { id } => commands::archive::run(&ctx, id),

        Commands::Sweep { json } => commands::sweep::run(&ctx, json),

        Commands::Show { id, json } => commands::show::run(&ctx, id, json),
    };

    if let Err(e) = result {
        match e.downcast_ref::<SheetsetError>() {
            Some(err) => eprintln!("Error [{}]: {}", err.reason(), err),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
