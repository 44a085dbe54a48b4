use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Sync {
            path,
            output,
            dry_run,
        } => handlers::sync::handle(&path, &output, dry_run, format),

        Commands::Info { path } => handlers::info::handle(&path, format),

        Commands::Watch {
            path,
            output,
            interval,
        } => handlers::watch::handle(&path, &output, interval, format),

        Commands::Init {
            path,
            template,
            root,
            force,
        } => handlers::init::handle(&path, template.into(), root, force, format),

        Commands::History { path, limit, style } => {
            handlers::history::handle(&path, limit, style.map(Into::into), format)
        }

        Commands::Reminder { path } => handlers::reminder::handle(&path),

        Commands::LogOp {
            operation_type,
            summary,
            path,
        } => handlers::log_op::handle(&path, &operation_type, &summary),
    }
}
