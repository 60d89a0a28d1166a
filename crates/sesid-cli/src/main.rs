//! sesid - check, create and list Amazon SES domain identities
//!
//! Prints the DNS records (DKIM, verification, DMARC) and SMTP settings a
//! domain needs, and exports the records to `<domain>.dns.txt`.

mod commands;
mod terminal;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{CheckCommand, ListCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "SESID_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "SESID_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a domain identity and print its DNS records and SMTP settings
    Check(CheckCommand),
    /// List the identities registered in a region
    List(ListCommand),
}

fn log_filter(level: &str) -> String {
    format!(
        "sesid={level},\
         sesid_email={level},\
         aws_config=warn,\
         aws_smithy_runtime=warn,\
         aws_sdk_sesv2=warn,\
         aws_sdk_ses=warn,\
         hyper=warn,\
         rustls=warn",
        level = level
    )
}

fn init_logging(level: &str, format: &str) -> anyhow::Result<()> {
    // RUST_LOG, when set, takes full control of the filter
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        tracing_subscriber::EnvFilter::try_new(log_filter(level))?
    };

    // Logs go to stderr so prompts and records stay readable on stdout
    let fmt_layer = match format {
        "full" => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, &cli.log_format)?;

    match cli.command {
        Some(Commands::Check(check_cmd)) => check_cmd.execute(),
        Some(Commands::List(list_cmd)) => list_cmd.execute(),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
