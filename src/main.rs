mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::commands::log::LogArgs;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let dir = args.dir.as_path();
    let actor = args.actor.as_deref();

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(dir, args.verbose),
        Commands::Snapshot { order_id, file } => {
            cli::commands::snapshot::execute(dir, actor, order_id, file)
        }
        Commands::Commit { order_id, file } => {
            cli::commands::commit::execute(dir, actor, order_id, file)
        }
        Commands::Diff { old, new } => cli::commands::diff::execute(dir, old, new),
        Commands::Record {
            order_id,
            action,
            field,
            old,
            new,
        } => cli::commands::record::execute(
            dir,
            actor,
            order_id,
            action,
            field.as_deref(),
            old.as_deref(),
            new.as_deref(),
        ),
        Commands::Log {
            order,
            action,
            user,
            from,
            to,
            search,
            sort,
            asc,
            page,
            per_page,
        } => cli::commands::log::execute(
            dir,
            &LogArgs {
                order: order.as_deref(),
                action: action.as_deref(),
                user: user.as_deref(),
                from: from.as_deref(),
                to: to.as_deref(),
                search: search.as_deref(),
                sort: Some(*sort),
                ascending: *asc,
                page: *page,
                per_page: *per_page,
            },
        ),
        Commands::Show { order_id, page } => cli::commands::show::execute(dir, order_id, *page),
        Commands::Delete { ids } => cli::commands::delete::execute(dir, ids),
        Commands::Cleanup { days } => cli::commands::cleanup::execute(dir, *days),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ordertrail=debug"
    } else {
        "ordertrail=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
