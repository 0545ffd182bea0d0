//! bugtrack CLI: the `bugtrack` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.verbose);
    let settings = support::load_settings_or_exit(&cli.config, cli.store_dir.as_deref());

    match cli.command {
        Commands::Report {
            title,
            description,
            priority,
            reporter,
            screenshot,
            json,
        } => commands::report::run(
            commands::report::Args {
                title,
                description,
                priority,
                reporter,
                screenshot,
                json,
            },
            &settings,
        ),

        Commands::List {
            search,
            status,
            priority,
            json,
        } => commands::list::run(search, status, priority, json, &settings),

        Commands::Show { id, json } => commands::show::run(id, json, &settings),

        Commands::Status { id, status, json } => commands::status::run(id, status, json, &settings),

        Commands::Assign { id, assignee, json } => {
            commands::assign::run(id, assignee, json, &settings)
        }

        Commands::Stats { json } => commands::stats::run(json, &settings),

        Commands::Team { json } => commands::team::run(json, &settings),
    }
}
