//! Process startup: parse arguments, install logging, run one command

use clap::Parser;
use std::io::Write;
use std::time::Duration;

use super::cli::args::{Args, Command};
use super::cli::display;
use super::error::CommandError;
use crate::core::error_handling::{exit_code_for, log_error_with_context};
use crate::core::logging::init_logging;
use crate::queue::{PersistentQueue, QueueConfig};

/// Run the `durq` binary and return its exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_settings()) {
        eprintln!("Error: {}", e);
        return 78;
    }
    log::debug!("Arguments: {:?}", args);

    let config = match args.resolve_queue_config() {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Loading configuration");
            return exit_code_for(&e);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&args.command, &config, &mut out) {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, command_context(&args.command));
            e.exit_code()
        }
    }
}

/// Open the queue, execute `command`, and close the queue again
///
/// The queue is closed even when the command fails; a close failure is only
/// reported if the command itself succeeded.
pub fn run(
    command: &Command,
    config: &QueueConfig,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let queue = PersistentQueue::open_with_config(config)?;
    let result = execute(&queue, command, out);
    let closed = queue.close();

    match (result, closed) {
        (Err(e), Err(close_error)) => {
            log::warn!("Closing queue after failure: {}", close_error);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => Ok(closed?),
    }
}

fn execute(
    queue: &PersistentQueue,
    command: &Command,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    match command {
        Command::Push { data } => {
            for record in data {
                let position = queue.try_push(record.as_bytes())?;
                writeln!(out, "{}", position)?;
            }
        }
        Command::Pop { timeout_ms } => {
            let payload = match timeout_ms {
                Some(ms) => queue.pop_timeout(Duration::from_millis(*ms))?,
                None => queue.try_pop()?,
            };
            display::write_payload(out, &payload)?;
        }
        Command::Peek { timeout_ms } => {
            let payload = match timeout_ms {
                Some(ms) => queue.last_timeout(Duration::from_millis(*ms))?,
                None => queue.try_last()?,
            };
            display::write_payload(out, &payload)?;
        }
        Command::Ack => queue.delete_last()?,
        Command::Stats => {
            let stats = queue.stats()?;
            let table = display::stats_table(&stats);
            write!(out, "{}", table)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn command_context(command: &Command) -> &'static str {
    match command {
        Command::Push { .. } => "Pushing records",
        Command::Pop { .. } => "Popping record",
        Command::Peek { .. } => "Peeking at record",
        Command::Ack => "Acknowledging record",
        Command::Stats => "Reading statistics",
    }
}
