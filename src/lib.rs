// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod event;
pub mod exec;
pub mod filter;
pub mod logging;
pub mod rules;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{resolve_config, ConfigFile};
use crate::console::Console;
use crate::engine::{shutdown_channel, spawn_ctrl_c_listener, Dispatcher};
use crate::exec::ShellExecutor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (or the built-in tables)
/// - the console on STDOUT
/// - the shell executor and the dispatcher
/// - the event input (STDIN or `--input`)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let console = Console::stdout(!args.no_color);
    let executor = ShellExecutor::new(console.clone());
    let dispatcher = Dispatcher::new(cfg.filter, cfg.table, console, executor);

    let input = open_input(&args).await?;

    // Ctrl-C → stop before the next event.
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    spawn_ctrl_c_listener(shutdown_tx);

    dispatcher.run(input, shutdown_rx).await?;
    Ok(())
}

async fn open_input(args: &CliArgs) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening event input {:?}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

/// Simple dry-run output: print both tables in evaluation order.
fn print_dry_run(cfg: &ConfigFile) {
    println!("rebuildwatch dry-run");
    println!();

    println!("ignore rules ({}):", cfg.filter.rules().len());
    for rule in cfg.filter.rules() {
        println!("  - {rule}");
    }
    println!();

    let reload = cfg.table.reload();
    println!("reload signals:");
    println!("  server:  {}", reload.server);
    println!("  browser: {}", reload.browser);
    println!();

    println!("dispatch rules ({}), first match wins:", cfg.table.rules().len());
    for rule in cfg.table.rules() {
        println!("  - {}", rule.name);
        println!("      contains: {:?}", rule.contains);
        if rule.is_pass_through() {
            println!("      (pass-through)");
            continue;
        }
        if let Some(ref cmd) = rule.command {
            println!("      cmd: {cmd}");
        }
        if !rule.post.is_empty() {
            println!("      reload: {:?}", rule.post);
        }
    }

    debug!("dry-run complete (no execution)");
}
