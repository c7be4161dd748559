use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use cscheck_cli::config::{AppConfig, ConfigManager, get_config};
use cscheck_cli::output::{OutputFormat, create_formatter};
use cscheck_cli::progress::{ProgressRenderer, format_throughput, throughput_mbps};
use cscheck_cli::terminal;
use cscheck_core::{HashAlgorithm, HashJob, HashReport, JobEvent, JobRunner, Outcome};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

/// Printed when the requested algorithm name is not recognized
const FALLBACK_MESSAGE: &str = "Unknown hashing algorithm, default back to SHA256";

#[derive(Parser)]
#[command(name = "cscheck")]
#[command(author, version, about = "Verify files against reference checksums", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a file and compare it with a reference hash
    Check {
        /// Reference hash, hexadecimal in any case
        hash: String,

        /// File to verify
        file: PathBuf,

        /// Hash algorithm to use (defaults to hash.default_algorithm)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,
    },

    /// List supported hash algorithms
    Algorithms,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hash.default_algorithm)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., output.color_enabled)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("cscheck_core", log::LevelFilter::Debug)
            .filter_module("cscheck_cli", log::LevelFilter::Debug)
            .filter_module("cscheck", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check {
            hash,
            file,
            algorithm,
            format,
            no_progress,
        } => {
            let config = get_config()?;
            check_command(config, hash, file, algorithm, format, no_progress).await
        }
        Commands::Algorithms => {
            let config = get_config()?;
            algorithms_command(&config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { command } => {
            config_command(command)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn check_command(
    config: AppConfig,
    hash: String,
    file: PathBuf,
    algorithm: Option<String>,
    format: Option<OutputFormat>,
    no_progress: bool,
) -> Result<ExitCode> {
    let algorithm = select_algorithm(algorithm.as_deref(), &config);
    let format = format.unwrap_or_else(|| config.output_format());

    log::debug!("Checking {} with {algorithm}", file.display());

    let label = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let mut renderer = if terminal::should_show_progress(config.output.progress_enabled, no_progress)
    {
        ProgressRenderer::new(label)
    } else {
        ProgressRenderer::hidden(label)
    };

    let mut handle = JobRunner::new().submit(HashJob::new(hash, &file, algorithm));

    // Ctrl-C only raises the flag; the worker stops at its next read
    let cancel = handle.cancellation();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, cancelling");
            cancel.cancel();
        }
    });

    let mut result = None;
    while let Some(event) = handle.next_event().await {
        match event {
            JobEvent::Progress(update) => renderer.handle_update(update),
            JobEvent::Finished(finished) => result = Some(finished),
        }
    }

    interrupt.abort();
    renderer.finish();

    let report = match result.context("Hashing job ended without a result")? {
        Ok(report) => report,
        Err(e) => {
            log::debug!("Check of {} failed: {e:?}", file.display());
            let status = renderer
                .status()
                .timing
                .clone()
                .unwrap_or_else(|| format!("Operation failed: {e}"));
            eprintln!("{}", status.red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let use_color = terminal::should_use_color(config.output.color_enabled);
    let formatter = create_formatter(format, use_color);
    print!("{}", formatter.format_report(&report, renderer.status())?);
    if format == OutputFormat::Json {
        println!();
    }

    if format == OutputFormat::Text && terminal::is_interactive() {
        print_throughput(&report);
    }

    Ok(ExitCode::from(exit_status(report.outcome)))
}

/// Resolve the requested algorithm, or the configured default, falling back to SHA256
fn select_algorithm(requested: Option<&str>, config: &AppConfig) -> HashAlgorithm {
    let name = requested.unwrap_or(config.hash.default_algorithm.as_str());

    match HashAlgorithm::resolve(name) {
        Ok(algorithm) => algorithm,
        Err(e) => {
            log::debug!("{e}");
            eprintln!("{}", FALLBACK_MESSAGE.yellow());
            HashAlgorithm::SHA256
        }
    }
}

/// Process exit status: 0 match, 2 mismatch, 130 cancelled
fn exit_status(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Match => 0,
        Outcome::Mismatch => 2,
        Outcome::Cancelled => 130,
    }
}

fn print_throughput(report: &HashReport) {
    if report.outcome == Outcome::Cancelled {
        return;
    }
    if let Some(mbps) = throughput_mbps(report.bytes_read, report.elapsed) {
        eprintln!("Throughput: {}", format_throughput(mbps));
    }
}

fn algorithms_command(config: &AppConfig) {
    let default = HashAlgorithm::resolve(&config.hash.default_algorithm).unwrap_or_default();

    for algorithm in HashAlgorithm::ALL {
        let marker = if algorithm == default { " (default)" } else { "" };
        println!(
            "{:<10} {:>3} bytes  {:>3} hex chars{}",
            algorithm.name(),
            algorithm.digest_len(),
            algorithm.hex_len(),
            marker
        );
    }
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("Config file: {}", manager.get_config_path().display());

            // Group items by section
            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((rest.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
