//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to `FlinkEnvService`.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use flinkenv_cli::handlers::update::UpdateArgs;
use flinkenv_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config).await?;

    match command {
        Commands::Add {
            name,
            flink_home,
            description,
            default,
        } => {
            handlers::add::execute(&ctx, &name, &flink_home, description, default).await?;
        }
        Commands::Update {
            identifier,
            name,
            flink_home,
            description,
            default,
        } => {
            let args = UpdateArgs {
                name,
                flink_home,
                description,
                make_default: default,
            };
            handlers::update::execute(&ctx, &identifier, args).await?;
        }
        Commands::List => {
            handlers::list::execute(&ctx).await?;
        }
        Commands::Show { identifier } => {
            handlers::show::execute(&ctx, &identifier).await?;
        }
        Commands::Conf { identifier, raw } => {
            handlers::conf::execute(&ctx, &identifier, raw).await?;
        }
        Commands::Sync { identifier } => {
            handlers::sync::execute(&ctx, &identifier).await?;
        }
        Commands::Remove { identifier, force } => {
            handlers::remove::execute(&ctx, &identifier, force).await?;
        }
        Commands::Default { identifier } => {
            handlers::default::execute(&ctx, identifier.as_deref()).await?;
        }
    }

    Ok(())
}
