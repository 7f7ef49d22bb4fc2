use clap::Parser;

use batch_actions::cli::commands::{cmd_actions, cmd_apply, cmd_check};
use batch_actions::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config file > defaults
    let timeout_secs = cli.timeout_secs.unwrap_or(config.server.timeout_secs);
    let trace_path = cli.trace.as_deref().or(config.trace.path.as_deref());

    match cli.command {
        Commands::Actions => {
            cmd_actions();
        }
        Commands::Check { action, ids } => {
            cmd_check(&action, &ids, timeout_secs, cli.verbose)?;
        }
        Commands::Apply {
            action,
            ids,
            yes,
            params,
        } => {
            let clean = cmd_apply(
                &action,
                &ids,
                yes,
                &params,
                config.batch.allow_unregistered_actions,
                timeout_secs,
                trace_path,
                cli.verbose,
            )?;
            if !clean {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
