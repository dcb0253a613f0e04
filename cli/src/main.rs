mod commands;
mod service;

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use console_command_core::{
    Catalog, CommandParser, CommandSpec, Console, ConsoleConfig, ConsoleError, ExitReason,
    HelpFormatter,
};
use tracing::{error, info};

use crate::service::ServiceHandle;

/// Output format for `--list-commands`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "service-console")]
#[command(about = "Operator console for a long-running service", version)]
struct Cli {
    /// Console configuration file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Message catalog (YAML or JSON), overrides the config file.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Prompt written before each line, overrides the config file.
    #[arg(long)]
    prompt: Option<String>,
    /// Player to start as online; repeatable.
    #[arg(long = "player")]
    players: Vec<String>,
    /// Print the registered commands and exit.
    #[arg(long)]
    list_commands: bool,
    /// Format for --list-commands.
    #[arg(long, default_value = "table")]
    format: ListFormat,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    // stdout belongs to the console, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ConsoleError> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    if let Some(catalog) = cli.catalog {
        config.catalog = Some(catalog);
    }
    if let Some(prompt) = cli.prompt {
        config.prompt = prompt;
    }

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::new(),
    };
    let registry = commands::build_registry(&config.parser, &catalog)?;

    if cli.list_commands {
        let specs: Vec<&CommandSpec> = registry.all().collect();
        let rendered = match cli.format {
            ListFormat::Table => HelpFormatter::new(&config.parser)
                .with_text(&catalog)
                .command_list(registry.all()),
            ListFormat::Json => serde_json::to_string_pretty(&specs)? + "\n",
            ListFormat::Yaml => serde_yaml::to_string(&specs)?,
        };
        print!("{rendered}");
        return Ok(());
    }

    let handle = ServiceHandle::new(cli.players);
    let parser = CommandParser::new(&registry)
        .with_config(config.parser.clone())?
        .with_text(&catalog);
    let console = Console::new(parser).with_prompt(&config.prompt);

    info!(commands = registry.len(), "starting console");
    let exit = thread::scope(|scope| {
        let console_thread = thread::Builder::new()
            .name("console".to_string())
            .spawn_scoped(scope, || {
                let mut ctx = handle.clone();
                let stdin = io::stdin().lock();
                let stdout = io::stdout().lock();
                let exit = console.run(stdin, stdout, &mut ctx, handle.shutdown_flag());
                // Any way out of the loop stops the service in an orderly way.
                handle.request_shutdown();
                exit
            })?;

        handle.run_until_shutdown();
        console_thread
            .join()
            .map_err(|_| io::Error::other("console thread panicked"))?
    })?;

    match exit {
        ExitReason::EndOfInput => info!("console input closed, service shut down"),
        ExitReason::ShutdownRequested => info!("stop command received, service shut down"),
        ExitReason::ShutdownSignal => info!("service shut down"),
    }
    if let Err(err) = io::stdout().flush() {
        error!(%err, "failed to flush stdout");
    }
    Ok(())
}
