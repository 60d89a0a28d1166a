pub mod check;
pub mod list;

pub use check::CheckCommand;
pub use list::ListCommand;

use colored::Colorize;
use sesid_email::EmailError;
use std::future::Future;
use tracing::{debug, info};

/// Run a command future on a fresh runtime, exiting cleanly on Ctrl+C.
pub fn run_interruptible<F>(command: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let rt = tokio::runtime::Runtime::new()?;
    run_until_interrupted(rt, command, tokio::signal::ctrl_c())
}

/// Drive `command` until it finishes or `interrupt` fires, whichever comes first.
///
/// The command runs as a spawned task; terminal reads inside it go through
/// `blocking_io` so the runtime's drivers keep polling `interrupt`.
pub fn run_until_interrupted<F, S>(
    rt: tokio::runtime::Runtime,
    command: F,
    interrupt: S,
) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
    S: Future<Output = std::io::Result<()>>,
{
    let finished = rt.block_on(async {
        let task = tokio::spawn(command);
        tokio::select! {
            joined = task => Ok(Some(joined)),
            signal = interrupt => signal.map(|_| None),
        }
    })?;

    match finished {
        Some(joined) => joined??,
        None => {
            info!("Received Ctrl+C, exiting");
            println!();
            println!("{}", "Interrupted.".bright_yellow());
            // The reader thread may still be blocked on stdin; don't wait for it.
            rt.shutdown_background();
        }
    }
    Ok(())
}

/// Validation failures end the command quietly; everything else propagates
pub fn finish(result: Result<(), EmailError>) -> anyhow::Result<()> {
    match result {
        Err(EmailError::Validation(message)) => {
            debug!("Command stopped: {}", message);
            println!("{} {}", "✗".bright_red(), message.bright_white());
            Ok(())
        }
        other => other.map_err(anyhow::Error::from),
    }
}
